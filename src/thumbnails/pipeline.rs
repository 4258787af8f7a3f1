use crate::config::{JPEG_QUALITY, OutputFormat, RunConfiguration};
use crate::error::ThumbnailError;
use crate::thumbnails::canvas::composite;
use image::buffer::ConvertBuffer;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{
    DynamicImage, ExtendedColorType, ImageEncoder, ImageReader, ImageResult, RgbImage, RgbaImage,
};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Where the thumbnail for `input` is written: `<input>.thumb.<ext>`, next to
/// the source.
pub fn thumbnail_path(input: &Path, format: OutputFormat) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(".thumb.");
    name.push(format.extension());
    PathBuf::from(name)
}

fn decode(path: &Path) -> Result<DynamicImage, ThumbnailError> {
    let file = File::open(path).map_err(|source| ThumbnailError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let decode_failure = |source| ThumbnailError::DecodeFailure {
        path: path.to_path_buf(),
        source,
    };
    ImageReader::new(BufReader::new(file))
        .with_guessed_format()
        .map_err(|e| decode_failure(image::ImageError::IoError(e)))?
        .decode()
        .map_err(decode_failure)
}

fn encode<W: Write>(canvas: &RgbaImage, format: OutputFormat, writer: W) -> ImageResult<()> {
    let (width, height) = canvas.dimensions();
    match format {
        OutputFormat::Png => PngEncoder::new(writer).write_image(
            canvas.as_raw(),
            width,
            height,
            ExtendedColorType::Rgba8,
        ),
        OutputFormat::Jpeg => {
            // JPEG has no alpha channel; it is dropped and the color values kept.
            let flat: RgbImage = canvas.convert();
            JpegEncoder::new_with_quality(writer, JPEG_QUALITY).write_image(
                flat.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )
        }
    }
}

/// Decodes `path`, composites it onto the configured canvas and writes the
/// result next to the source, overwriting any earlier thumbnail.
///
/// Returns the path of the written thumbnail.
///
/// # Errors
///
/// One [`ThumbnailError`] per failed step. A failure after the output file was
/// created leaves that file behind, possibly truncated.
pub fn generate_thumbnail(
    path: &Path,
    config: &RunConfiguration,
) -> Result<PathBuf, ThumbnailError> {
    let source = decode(path)?;

    let canvas = composite(&source, config.size(), config.background()).map_err(|source| {
        ThumbnailError::ResizeFailure {
            path: path.to_path_buf(),
            source,
        }
    })?;
    drop(source);

    let output = thumbnail_path(path, config.format());
    let file = File::create(&output).map_err(|source| ThumbnailError::DestinationUnavailable {
        path: output.clone(),
        source,
    })?;

    let encode_failure = |source| ThumbnailError::EncodeFailure {
        path: output.clone(),
        source,
    };
    let mut writer = BufWriter::new(file);
    encode(&canvas, config.format(), &mut writer).map_err(encode_failure)?;
    writer
        .flush()
        .map_err(|e| encode_failure(image::ImageError::IoError(e)))?;

    Ok(output)
}

/// Runs [`generate_thumbnail`] for one work item and reports the outcome to
/// the log. Failures stop here; the caller only learns whether a thumbnail
/// was written.
pub fn process_one(path: &Path, config: &RunConfiguration) -> Option<PathBuf> {
    match generate_thumbnail(path, config) {
        Ok(output) => {
            debug!(input = %path.display(), output = %output.display(), "thumbnail written");
            Some(output)
        }
        Err(err) => {
            warn!("{err}");
            None
        }
    }
}
