//! Native raster of the birthday sign.
//!
//! Glyph coverage comes from fontdue; the dark outline is grown from that
//! coverage with a distance transform, and the white fill is laid over it.
//! Output matches what the web front-end reads back from its 2D canvas:
//! straight-alpha RGBA8 rows, text centred in a 2048x512 image.

use fontdue::layout::{
    CoordinateSystem, HorizontalAlign, Layout, LayoutSettings, TextStyle, VerticalAlign,
};
use std::path::{Path, PathBuf};

pub const SIGN_IMAGE_WIDTH: u32 = 2048;
pub const SIGN_IMAGE_HEIGHT: u32 = 512;
pub const SIGN_FONT_PX: f32 = 170.0;
// Half the 22px canvas stroke, which straddles the glyph contour
pub const SIGN_OUTLINE_RADIUS: f32 = 11.0;
pub const SIGN_OUTLINE_ALPHA: f32 = 0.85;
pub const SIGN_FILL_ALPHA: f32 = 0.98;

/// Tried in order when no font is given on the command line.
pub const DEFAULT_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// Raster of the birthday sign, tightly packed RGBA8 rows.
pub struct SignImage {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

pub fn load_font(path: &Path) -> anyhow::Result<fontdue::Font> {
    let bytes = std::fs::read(path)
        .map_err(|e| anyhow::anyhow!("read {}: {e}", path.display()))?;
    fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
        .map_err(|e| anyhow::anyhow!("parse {}: {e}", path.display()))
}

/// The explicit path if given, otherwise the first default that loads.
pub fn find_font(explicit: Option<PathBuf>) -> Option<(PathBuf, fontdue::Font)> {
    if let Some(path) = explicit {
        return match load_font(&path) {
            Ok(font) => Some((path, font)),
            Err(e) => {
                log::warn!("[sign] {e}");
                None
            }
        };
    }
    DEFAULT_FONT_PATHS.iter().map(PathBuf::from).find_map(|path| {
        let font = load_font(&path).ok()?;
        Some((path, font))
    })
}

/// Per-pixel glyph coverage in \[0, 1\] for `text` centred in a `width` x `height` box.
pub fn coverage(font: &fontdue::Font, text: &str, px: f32, width: u32, height: u32) -> Vec<f32> {
    let (w, h) = (width as usize, height as usize);
    let mut out = vec![0.0f32; w * h];

    let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
    layout.reset(&LayoutSettings {
        max_width: Some(width as f32),
        max_height: Some(height as f32),
        horizontal_align: HorizontalAlign::Center,
        vertical_align: VerticalAlign::Middle,
        ..LayoutSettings::default()
    });
    layout.append(&[font], &TextStyle::new(text, px, 0));

    for g in layout
        .glyphs()
        .iter()
        .filter(|g| g.char_data.rasterize() && g.width > 0 && g.height > 0)
    {
        let (metrics, bitmap) = font.rasterize_config(g.key);
        let x0 = g.x.round() as i64;
        let y0 = g.y.round() as i64;
        for row in 0..metrics.height {
            let y = y0 + row as i64;
            if y < 0 || y >= h as i64 {
                continue;
            }
            for col in 0..metrics.width {
                let x = x0 + col as i64;
                if x < 0 || x >= w as i64 {
                    continue;
                }
                let c = bitmap[row * metrics.width + col] as f32 / 255.0;
                let dst = &mut out[y as usize * w + x as usize];
                *dst = dst.max(c);
            }
        }
    }
    out
}

/// Grow `cov` outward by `radius` pixels with a two-pass chamfer distance
/// transform. Alpha falls from 1 to 0 over the pixel past `radius`.
pub fn outline(cov: &[f32], width: usize, height: usize, radius: f32) -> Vec<f32> {
    const DIAG: f32 = std::f32::consts::SQRT_2;
    let far = (width + height) as f32;
    let mut dist: Vec<f32> = cov
        .iter()
        .map(|&c| if c >= 0.5 { 0.0 } else { far })
        .collect();

    let at = |x: usize, y: usize| y * width + x;
    for y in 0..height {
        for x in 0..width {
            let mut d = dist[at(x, y)];
            if x > 0 {
                d = d.min(dist[at(x - 1, y)] + 1.0);
            }
            if y > 0 {
                d = d.min(dist[at(x, y - 1)] + 1.0);
                if x > 0 {
                    d = d.min(dist[at(x - 1, y - 1)] + DIAG);
                }
                if x + 1 < width {
                    d = d.min(dist[at(x + 1, y - 1)] + DIAG);
                }
            }
            dist[at(x, y)] = d;
        }
    }
    for y in (0..height).rev() {
        for x in (0..width).rev() {
            let mut d = dist[at(x, y)];
            if x + 1 < width {
                d = d.min(dist[at(x + 1, y)] + 1.0);
            }
            if y + 1 < height {
                d = d.min(dist[at(x, y + 1)] + 1.0);
                if x + 1 < width {
                    d = d.min(dist[at(x + 1, y + 1)] + DIAG);
                }
                if x > 0 {
                    d = d.min(dist[at(x - 1, y + 1)] + DIAG);
                }
            }
            dist[at(x, y)] = d;
        }
    }

    dist.iter()
        .zip(cov)
        .map(|(&d, &c)| (radius + 1.0 - d).clamp(0.0, 1.0).max(c))
        .collect()
}

/// White fill over a black outline, as straight-alpha RGBA8.
pub fn composite(fill: &[f32], outline: &[f32]) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(fill.len() * 4);
    for (&f, &o) in fill.iter().zip(outline) {
        let a_fill = f * SIGN_FILL_ALPHA;
        let a_line = o * SIGN_OUTLINE_ALPHA;
        let a = a_fill + a_line * (1.0 - a_fill);
        let white = if a > 0.0 { a_fill / a } else { 0.0 };
        let v = (white * 255.0).round() as u8;
        rgba.extend_from_slice(&[v, v, v, (a * 255.0).round() as u8]);
    }
    rgba
}

pub fn rasterize(font: &fontdue::Font, text: &str) -> SignImage {
    let (w, h) = (SIGN_IMAGE_WIDTH, SIGN_IMAGE_HEIGHT);
    let fill = coverage(font, text, SIGN_FONT_PX, w, h);
    let line = outline(&fill, w as usize, h as usize, SIGN_OUTLINE_RADIUS);
    SignImage {
        rgba: composite(&fill, &line),
        width: w,
        height: h,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(width: usize, height: usize, x0: usize, x1: usize, y0: usize, y1: usize) -> Vec<f32> {
        let mut cov = vec![0.0; width * height];
        for y in y0..y1 {
            for x in x0..x1 {
                cov[y * width + x] = 1.0;
            }
        }
        cov
    }

    #[test]
    fn outline_reaches_radius_and_stops() {
        let (w, h) = (64, 32);
        let cov = square(w, h, 20, 30, 10, 20);
        let line = outline(&cov, w, h, 4.0);
        // inside and four pixels out along a row are fully covered
        assert_eq!(line[15 * w + 25], 1.0);
        assert_eq!(line[15 * w + 33], 1.0);
        assert_eq!(line[15 * w + 34], 0.0);
        // three diagonal steps off the corner is 4.24 away: partly covered
        let diag = line[22 * w + 32];
        assert!(diag > 0.7 && diag < 0.8, "{diag}");
        // far corner of the image untouched
        assert_eq!(line[0], 0.0);
    }

    #[test]
    fn outline_on_empty_coverage_is_empty() {
        let line = outline(&vec![0.0; 16 * 16], 16, 16, 11.0);
        assert!(line.iter().all(|&a| a == 0.0));
    }

    #[test]
    fn fill_sits_on_top_of_the_outline() {
        let rgba = composite(&[1.0, 0.0, 0.0], &[1.0, 1.0, 0.0]);
        // fill pixel: near white, near opaque
        assert!(rgba[0..3].iter().all(|&c| c >= 245));
        assert!(rgba[3] >= 250);
        // outline only: black at 0.85
        assert_eq!(&rgba[4..8], &[0, 0, 0, 217]);
        // background: transparent
        assert_eq!(&rgba[8..12], &[0, 0, 0, 0]);
    }

    #[test]
    fn system_font_renders_centred_text() {
        let Some((path, font)) = find_font(None) else {
            eprintln!("no default font installed, skipping");
            return;
        };
        let img = rasterize(&font, "Happy Birthday");
        assert_eq!(img.rgba.len(), (img.width * img.height * 4) as usize, "{}", path.display());

        let (w, h) = (img.width as usize, img.height as usize);
        let opaque = |x: usize, y: usize| img.rgba[(y * w + x) * 4 + 3] > 0;
        assert!(!opaque(0, 0) && !opaque(w - 1, h - 1));
        let cols: Vec<usize> = (0..w).filter(|&x| (0..h).any(|y| opaque(x, y))).collect();
        assert!(!cols.is_empty(), "{}", path.display());
        let (first, last) = (cols[0], cols[cols.len() - 1]);
        // layout centres advances, not ink, so allow for side bearings
        assert!((first as i64 + last as i64 - w as i64 + 1).abs() < 40, "{first}..{last}");
    }
}
