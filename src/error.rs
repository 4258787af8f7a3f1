use std::path::PathBuf;

/// Why a single source image did not produce a thumbnail.
///
/// Every variant is terminal for the item it was raised for and nothing else;
/// the batch keeps going.
#[derive(Debug, thiserror::Error)]
pub enum ThumbnailError {
    /// The input path could not be opened.
    #[error("cannot open {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The bytes at the input path are not a supported, intact image.
    #[error("cannot decode {}: {source}", path.display())]
    DecodeFailure {
        path: PathBuf,
        source: image::ImageError,
    },
    /// The resampler rejected the image.
    #[error("cannot resize {}: {source}", path.display())]
    ResizeFailure {
        path: PathBuf,
        source: fast_image_resize::ResizeError,
    },
    /// The output file could not be created.
    #[error("cannot create {}: {source}", path.display())]
    DestinationUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The canvas could not be written out in the target format.
    #[error("cannot encode {}: {source}", path.display())]
    EncodeFailure {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Rejected run configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("thumbnail size must be at least 1 pixel")]
    ZeroSize,
}

/// The worker pool could not be started.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("worker count must be at least 1")]
    ZeroWorkers,
    #[error("failed to build worker thread pool: {0}")]
    Build(#[from] rayon::ThreadPoolBuildError),
}
