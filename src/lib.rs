//! # Batch Thumbnail Generation
//!
//! Turns a batch of images into fixed-size square thumbnails. Each source is
//! shrunk (never enlarged) to fit the square with a Lanczos3 filter, centered
//! on a white, black or transparent background, and written next to the
//! source as `<input>.thumb.jpg` (quality 80) or `<input>.thumb.png`.
//!
//! Images are processed in parallel by a fixed-size [`WorkerPool`]. Every
//! file is handled on its own: an unreadable, corrupt or unwritable file is
//! logged and skipped without affecting the rest of the batch.
//!
//! Supported inputs are JPEG, PNG, GIF and TIFF, detected from the file
//! contents rather than the extension.
//!
//! ## Example
//!
//! ```no_run
//! use batch_thumbnails::{
//!     BackgroundMode, OutputFormat, RunConfiguration, WorkerPool, expand_patterns, run_batch,
//! };
//!
//! fn main() -> color_eyre::Result<()> {
//!     let config = RunConfiguration::new(256, OutputFormat::Png, BackgroundMode::Auto)?;
//!     let pool = WorkerPool::new(4)?;
//!
//!     let summary = run_batch(expand_patterns(&["photos/*.jpg"]), &config, &pool);
//!     println!("{} of {} thumbnails written", summary.written, summary.attempted);
//!     Ok(())
//! }
//! ```

// Run-wide settings: size, output format and background.
mod config;
// Error types for items, configuration and the pool.
mod error;
// Glob expansion into work items.
mod inputs;
// Stderr diagnostics for the command-line tool.
pub mod logging;
// The worker pool that drains the work queue.
mod pool;
// Compositing, the per-file pipeline and batch runs.
mod thumbnails;

pub use config::{
    Background, BackgroundMode, DEFAULT_SIZE, JPEG_QUALITY, OutputFormat, RunConfiguration,
    default_worker_count,
};
pub use error::{ConfigError, PoolError, ThumbnailError};
pub use inputs::expand_patterns;
pub use pool::WorkerPool;
pub use thumbnails::canvas::{centered_offset, composite, fit_within};
pub use thumbnails::pipeline::{generate_thumbnail, process_one, thumbnail_path};
pub use thumbnails::{BatchSummary, run_batch};
