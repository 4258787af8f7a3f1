use batch_thumbnails::{
    BackgroundMode, OutputFormat, RunConfiguration, WorkerPool, expand_patterns, run_batch,
    thumbnail_path,
};
use color_eyre::Result;
use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};
use temp_dir::TempDir;
use tracing_test::traced_test;

fn write_jpeg(path: &Path, width: u32, height: u32) -> Result<()> {
    RgbImage::from_pixel(width, height, Rgb([180, 90, 40]))
        .save_with_format(path, ImageFormat::Jpeg)?;
    Ok(())
}

fn write_png(path: &Path, width: u32, height: u32) -> Result<()> {
    RgbaImage::from_pixel(width, height, Rgba([40, 90, 180, 255]))
        .save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// A JPEG cut off right after its header.
fn write_truncated_jpeg(path: &Path) -> Result<()> {
    write_jpeg(path, 64, 64)?;
    let bytes = fs::read(path)?;
    fs::write(path, &bytes[..16])?;
    Ok(())
}

fn assert_square(path: &Path, size: u32, format: ImageFormat) -> Result<()> {
    let thumb = image::ImageReader::open(path)?.with_guessed_format()?;
    assert_eq!(thumb.format(), Some(format), "{}", path.display());
    let thumb = thumb.decode()?;
    assert_eq!((thumb.width(), thumb.height()), (size, size), "{}", path.display());
    Ok(())
}

#[test]
#[traced_test]
fn one_corrupt_file_does_not_affect_the_others() {
    let dir = TempDir::new().expect("temp dir");
    let a = dir.path().join("a.jpg");
    let b = dir.path().join("b.jpg");
    let c = dir.path().join("c.png");
    write_jpeg(&a, 200, 100).expect("a.jpg");
    write_truncated_jpeg(&b).expect("b.jpg");
    write_png(&c, 50, 120).expect("c.png");

    let config =
        RunConfiguration::new(64, OutputFormat::Jpeg, BackgroundMode::Auto).expect("config");
    let pool = WorkerPool::new(2).expect("pool");
    let summary = run_batch(vec![a.clone(), b.clone(), c.clone()], &config, &pool);

    assert_eq!(summary.attempted, 3);
    assert_eq!(summary.written, 2);
    assert_eq!(summary.failed, 1);

    assert_square(&dir.path().join("a.jpg.thumb.jpg"), 64, ImageFormat::Jpeg).expect("a thumb");
    assert_square(&dir.path().join("c.png.thumb.jpg"), 64, ImageFormat::Jpeg).expect("c thumb");
    assert!(!dir.path().join("b.jpg.thumb.jpg").exists());

    // Worker threads log inside the caller's span, so their lines are captured here.
    assert!(logs_contain("b.jpg"));
    logs_assert(|lines: &[&str]| {
        let warnings: Vec<&&str> = lines.iter().filter(|line| line.contains("WARN")).collect();
        match warnings.as_slice() {
            [only] if only.contains("cannot decode") && only.contains("b.jpg") => Ok(()),
            other => Err(format!("expected one decode warning for b.jpg, got {other:?}")),
        }
    });
}

#[test]
fn png_output_is_transparent_by_default() -> Result<()> {
    let dir = TempDir::new()?;
    let input = dir.path().join("photo.jpg");
    write_jpeg(&input, 30, 20)?;

    let config = RunConfiguration::new(48, OutputFormat::Png, BackgroundMode::Auto)?;
    let summary = run_batch([input.clone()], &config, &WorkerPool::new(1)?);
    assert_eq!(summary.written, 1);

    let output = thumbnail_path(&input, OutputFormat::Png);
    assert!(output.to_string_lossy().ends_with("photo.jpg.thumb.png"));
    assert_square(&output, 48, ImageFormat::Png)?;

    let thumb = image::open(&output)?;
    assert!(thumb.color().has_alpha());
    let thumb = thumb.to_rgba8();
    assert_eq!(thumb.get_pixel(0, 0)[3], 0);
    assert_eq!(thumb.get_pixel(47, 47)[3], 0);
    assert_eq!(thumb.get_pixel(24, 24)[3], 255);
    Ok(())
}

#[test]
fn rerun_replaces_previous_output() -> Result<()> {
    let dir = TempDir::new()?;
    let input = dir.path().join("photo.png");
    write_png(&input, 300, 300)?;

    let output = thumbnail_path(&input, OutputFormat::Jpeg);
    let stale = vec![0u8; 1 << 20];
    fs::write(&output, &stale)?;

    let config = RunConfiguration::new(32, OutputFormat::Jpeg, BackgroundMode::White)?;
    let pool = WorkerPool::new(2)?;
    for _ in 0..2 {
        let summary = run_batch([input.clone()], &config, &pool);
        assert_eq!(summary.written, 1);

        let len = fs::metadata(&output)?.len();
        assert!(len > 0 && len < stale.len() as u64);
        assert_square(&output, 32, ImageFormat::Jpeg)?;
    }
    Ok(())
}

#[test]
fn every_globbed_file_is_attempted_for_any_worker_count() -> Result<()> {
    let dir = TempDir::new()?;
    let mut inputs: Vec<PathBuf> = Vec::new();
    for i in 0..12 {
        let path = dir.path().join(format!("img{i:02}.png"));
        if i % 4 == 0 {
            fs::write(&path, b"broken")?;
        } else {
            write_png(&path, 10 + i, 40)?;
        }
        inputs.push(path);
    }
    // Narrow enough that earlier runs' `.thumb.png` files never match.
    let pattern = format!(
        "{}/img??.png",
        glob::Pattern::escape(&dir.path().to_string_lossy())
    );
    let config = RunConfiguration::new(16, OutputFormat::Png, BackgroundMode::Black)?;

    for workers in [1, 2, 5, 16] {
        let pool = WorkerPool::new(workers)?;
        let summary = run_batch(expand_patterns(&[pattern.as_str()]), &config, &pool);

        assert_eq!(summary.attempted, 12, "{workers} workers");
        assert_eq!(summary.written, 9, "{workers} workers");
        assert_eq!(summary.failed, 3, "{workers} workers");
        for (i, input) in inputs.iter().enumerate() {
            let output = thumbnail_path(input, OutputFormat::Png);
            assert_eq!(output.exists(), i % 4 != 0, "{}", output.display());
        }
    }
    Ok(())
}
