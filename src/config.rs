use crate::error::ConfigError;
use image::Rgba;
use std::num::NonZeroUsize;
use std::thread;

/// Side length of the thumbnail when none is given.
pub const DEFAULT_SIZE: u32 = 128;

/// Quality factor handed to the JPEG encoder.
pub const JPEG_QUALITY: u8 = 80;

/// Container format of the written thumbnails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Jpeg,
    Png,
}

impl OutputFormat {
    /// File extension appended after `.thumb`.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }
}

/// The background the user asked for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackgroundMode {
    /// Transparent for PNG output, white otherwise.
    #[default]
    Auto,
    White,
    Black,
}

impl BackgroundMode {
    /// Maps the `--white` / `--black` flags. White wins when both are set.
    pub fn from_flags(white: bool, black: bool) -> Self {
        if white {
            BackgroundMode::White
        } else if black {
            BackgroundMode::Black
        } else {
            BackgroundMode::Auto
        }
    }

    /// Picks the fill for `format`: explicit white, then explicit black, then
    /// transparent for PNG, then white.
    pub fn resolve(self, format: OutputFormat) -> Background {
        match (self, format) {
            (BackgroundMode::White, _) => Background::White,
            (BackgroundMode::Black, _) => Background::Black,
            (BackgroundMode::Auto, OutputFormat::Png) => Background::Transparent,
            (BackgroundMode::Auto, OutputFormat::Jpeg) => Background::White,
        }
    }
}

/// Solid fill painted under the resized image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Background {
    White,
    Black,
    Transparent,
}

impl Background {
    /// The fill as a non-premultiplied RGBA pixel.
    pub fn rgba(self) -> Rgba<u8> {
        match self {
            Background::White => Rgba([255, 255, 255, 255]),
            Background::Black => Rgba([0, 0, 0, 255]),
            Background::Transparent => Rgba([0, 0, 0, 0]),
        }
    }
}

/// Settings shared read-only by every worker for the whole run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfiguration {
    size: u32,
    format: OutputFormat,
    background: BackgroundMode,
}

impl RunConfiguration {
    /// Validates and freezes the run settings. A zero `size` is rejected here so
    /// that the compositor never sees it.
    pub fn new(
        size: u32,
        format: OutputFormat,
        background: BackgroundMode,
    ) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::ZeroSize);
        }
        Ok(Self {
            size,
            format,
            background,
        })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn background_mode(&self) -> BackgroundMode {
        self.background
    }

    /// The fill actually used for the canvas.
    pub fn background(&self) -> Background {
        self.background.resolve(self.format)
    }
}

impl Default for RunConfiguration {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            format: OutputFormat::default(),
            background: BackgroundMode::default(),
        }
    }
}

/// Number of execution units on this host, or 1 if it cannot be queried.
pub fn default_worker_count() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}
