use batch_thumbnails::{
    BackgroundMode, DEFAULT_SIZE, OutputFormat, RunConfiguration, WorkerPool,
    default_worker_count, expand_patterns, logging, run_batch,
};
use clap::Parser;
use tracing::info;

/// Write a square thumbnail next to every matching image.
#[derive(Parser, Debug)]
#[command(name = "batch_thumbnails", version)]
struct Cli {
    /// Glob patterns selecting the source images.
    #[arg(required = true)]
    patterns: Vec<String>,

    /// Length of one side of the square thumbnail, in pixels.
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    size: u32,

    /// Write PNG instead of JPEG.
    #[arg(long)]
    png: bool,

    /// Use a black background.
    #[arg(long)]
    black: bool,

    /// Use a white background (wins over --black).
    #[arg(long)]
    white: bool,

    /// Number of worker threads [default: available parallelism].
    #[arg(long)]
    workers: Option<usize>,

    /// Log every written thumbnail.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let format = if cli.png {
        OutputFormat::Png
    } else {
        OutputFormat::Jpeg
    };
    let config = RunConfiguration::new(
        cli.size,
        format,
        BackgroundMode::from_flags(cli.white, cli.black),
    )?;
    let pool = WorkerPool::new(cli.workers.unwrap_or_else(default_worker_count))?;

    info!(
        workers = pool.worker_count(),
        size = config.size(),
        format = ?config.format(),
        background = ?config.background(),
        "generating thumbnails"
    );

    let summary = run_batch(expand_patterns(&cli.patterns), &config, &pool);

    info!(
        attempted = summary.attempted,
        written = summary.written,
        failed = summary.failed,
        "done"
    );
    Ok(())
}
