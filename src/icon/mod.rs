//! Launcher icon generation.
//!
//! # Modules
//!
//! - [`density`]: Density bucket table and icon layer names
//! - [`color`]: `#RRGGBB` background color parsing
//! - [`mask`]: Circular mask and destination-in compositing
//! - [`adaptive`]: `mipmap-anydpi-v26` adaptive-icon descriptors
//! - [`generate`]: Per-density rendering and encoding

pub mod adaptive;
pub mod color;
pub mod density;
pub mod generate;
pub mod mask;

pub use color::HexColor;
pub use density::{DENSITIES, Density, IconLayer};
pub use generate::{IconOptions, generate_adaptive_icons};

use image::ImageFormat;
use serde::Deserialize;

/// Raster format for generated icon layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconFormat {
    /// Lossless WebP (default).
    #[default]
    Webp,
    Png,
}

impl IconFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Webp => "webp",
            Self::Png => "png",
        }
    }

    pub const fn image_format(self) -> ImageFormat {
        match self {
            Self::Webp => ImageFormat::WebP,
            Self::Png => ImageFormat::Png,
        }
    }
}
