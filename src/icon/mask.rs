use image::{GrayImage, Luma, RgbaImage};

/// Samples per axis when estimating circle coverage of a pixel.
const SUPERSAMPLE: u32 = 4;

/// Build a `size×size` coverage mask of the inscribed circle.
///
/// 255 = pixel entirely inside, 0 = entirely outside, edge pixels are
/// proportional to the covered area.
pub fn circle_mask(size: u32) -> GrayImage {
    let radius = size as f32 / 2.0;
    let radius_sq = radius * radius;
    let step = 1.0 / SUPERSAMPLE as f32;
    let total = SUPERSAMPLE * SUPERSAMPLE;

    GrayImage::from_fn(size, size, |x, y| {
        let mut inside = 0;
        for sy in 0..SUPERSAMPLE {
            let dy = y as f32 + (sy as f32 + 0.5) * step - radius;
            for sx in 0..SUPERSAMPLE {
                let dx = x as f32 + (sx as f32 + 0.5) * step - radius;
                if dx * dx + dy * dy <= radius_sq {
                    inside += 1;
                }
            }
        }
        Luma([((inside * 255 + total / 2) / total) as u8])
    })
}

/// Destination-in composite: keep `img` only where `mask` covers it.
pub fn apply_dest_in(img: &mut RgbaImage, mask: &GrayImage) {
    debug_assert_eq!(img.dimensions(), mask.dimensions());

    for (pixel, coverage) in img.pixels_mut().zip(mask.pixels()) {
        let alpha = u16::from(pixel[3]) * u16::from(coverage[0]);
        pixel[3] = ((alpha + 127) / 255) as u8;
    }
}

/// Clip `img` to its inscribed circle.
pub fn round_icon(img: &RgbaImage) -> RgbaImage {
    let mut round = img.clone();
    apply_dest_in(&mut round, &circle_mask(img.width()));
    round
}
