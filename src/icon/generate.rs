use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};
use rayon::prelude::*;

use super::adaptive::write_adaptive_descriptors;
use super::mask::round_icon;
use super::{DENSITIES, Density, HexColor, IconFormat, IconLayer};
use crate::debug;

/// Rendering settings shared by all densities.
#[derive(Debug, Clone, Copy, Default)]
pub struct IconOptions {
    pub format: IconFormat,
    pub background: HexColor,
}

/// Files written by one generation run.
#[derive(Debug, Default)]
pub struct IconSet {
    pub files: Vec<PathBuf>,
}

/// Generate launcher icons for every density plus the adaptive descriptors.
///
/// Densities render in parallel; each writes only its own `mipmap-<label>`
/// directory. Any decode, encode or I/O error aborts generation.
pub fn generate_adaptive_icons(
    input: &Path,
    output: &Path,
    options: &IconOptions,
) -> Result<IconSet> {
    let source = image::open(input)
        .with_context(|| format!("failed to decode source image `{}`", input.display()))?;
    debug!("icons"; "source {}: {}x{}", input.display(), source.width(), source.height());

    let rendered: Vec<Vec<PathBuf>> = DENSITIES
        .par_iter()
        .map(|density| render_density(&source, output, density, options))
        .collect::<Result<_>>()?;

    let mut files: Vec<PathBuf> = rendered.into_iter().flatten().collect();
    files.extend(write_adaptive_descriptors(output)?);

    Ok(IconSet { files })
}

/// Render the four layers of a single density bucket.
fn render_density(
    source: &DynamicImage,
    output: &Path,
    density: &Density,
    options: &IconOptions,
) -> Result<Vec<PathBuf>> {
    let dir = output.join(density.dir_name());
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create directory `{}`", dir.display()))?;

    let size = density.size;
    // Resize once: foreground, legacy and round all derive from this buffer.
    let resized = source
        .resize_exact(size, size, FilterType::Lanczos3)
        .to_rgba8();
    let round = round_icon(&resized);
    let background = RgbaImage::from_pixel(size, size, options.background.to_rgba());

    let mut files = Vec::with_capacity(IconLayer::ALL.len());
    for layer in IconLayer::ALL {
        let img = match layer {
            IconLayer::Foreground | IconLayer::Legacy => &resized,
            IconLayer::Round => &round,
            IconLayer::Background => &background,
        };
        let path = dir.join(layer.file_name(options.format));
        img.save_with_format(&path, options.format.image_format())
            .with_context(|| format!("failed to encode `{}`", path.display()))?;
        files.push(path);
    }

    debug!("icons"; "{} ({size}px)", density.dir_name());
    Ok(files)
}
