//! Density buckets and the layers generated for each of them.

use super::IconFormat;

/// A named screen density bucket and its launcher icon size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Density {
    pub label: &'static str,
    pub size: u32,
}

impl Density {
    /// Resource directory name, e.g. `mipmap-xhdpi`.
    pub fn dir_name(&self) -> String {
        format!("mipmap-{}", self.label)
    }
}

/// Launcher icon sizes, smallest first. Order defines directory creation order.
pub const DENSITIES: [Density; 5] = [
    Density { label: "mdpi", size: 48 },
    Density { label: "hdpi", size: 72 },
    Density { label: "xhdpi", size: 96 },
    Density { label: "xxhdpi", size: 144 },
    Density { label: "xxxhdpi", size: 192 },
];

/// Image files written into every density directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconLayer {
    /// Resized source, referenced by the adaptive icon.
    Foreground,
    /// Same pixels as the foreground, for pre-API-26 launchers.
    Legacy,
    /// Foreground clipped to the inscribed circle.
    Round,
    /// Flat opaque fill.
    Background,
}

impl IconLayer {
    pub const ALL: [IconLayer; 4] = [
        IconLayer::Foreground,
        IconLayer::Legacy,
        IconLayer::Round,
        IconLayer::Background,
    ];

    /// Resource name without extension, as referenced by `@mipmap/<name>`.
    pub const fn resource_name(self) -> &'static str {
        match self {
            Self::Foreground => "ic_launcher_foreground",
            Self::Legacy => "ic_launcher",
            Self::Round => "ic_launcher_round",
            Self::Background => "ic_launcher_background",
        }
    }

    pub fn file_name(self, format: IconFormat) -> String {
        format!("{}.{}", self.resource_name(), format.extension())
    }
}
