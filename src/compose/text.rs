//! Text faces for composed canvases.
//!
//! Two kinds of face draw black ink onto a white [`GrayImage`]:
//!
//! - **Bitmap**: the Spleen PSF2 fonts compiled into the binary, always
//!   available, monospaced
//! - **TTF**: any TrueType/OpenType file loaded through ab_glyph, rendered
//!   with anti-aliased coverage (the gray edges are dithered later)

use std::path::Path;

use ab_glyph::{Font, FontArc, GlyphId, PxScale, ScaleFont, point};
use image::{GrayImage, Luma};
use spleen_font::{FONT_8X16, FONT_12X24, PSF2Font};

use crate::error::PrintError;

/// Built-in bitmap font sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitmapSize {
    /// Spleen 8×16
    Small,
    /// Spleen 12×24
    Large,
}

impl BitmapSize {
    fn char_width(self) -> usize {
        match self {
            BitmapSize::Small => 8,
            BitmapSize::Large => 12,
        }
    }

    fn char_height(self) -> usize {
        match self {
            BitmapSize::Small => 16,
            BitmapSize::Large => 24,
        }
    }

    fn font_data(self) -> &'static [u8] {
        match self {
            BitmapSize::Small => FONT_8X16,
            BitmapSize::Large => FONT_12X24,
        }
    }
}

/// A font at a fixed size.
#[derive(Clone)]
pub enum Face {
    Bitmap(BitmapSize),
    Ttf { font: FontArc, scale: PxScale },
}

impl std::fmt::Debug for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Face::Bitmap(size) => f.debug_tuple("Bitmap").field(size).finish(),
            Face::Ttf { scale, .. } => f.debug_struct("Ttf").field("px", &scale.y).finish(),
        }
    }
}

impl Face {
    /// Read a TTF/OTF file into a shareable font handle.
    pub fn load_font(path: &Path) -> Result<FontArc, PrintError> {
        let bytes = std::fs::read(path)
            .map_err(|e| PrintError::Font(format!("Failed to read {}: {}", path.display(), e)))?;
        FontArc::try_from_vec(bytes)
            .map_err(|e| PrintError::Font(format!("Failed to parse {}: {}", path.display(), e)))
    }

    pub fn ttf(font: FontArc, pixel_height: f32) -> Self {
        Face::Ttf {
            font,
            scale: PxScale::from(pixel_height),
        }
    }

    /// Height of one line of text in pixels.
    pub fn line_height(&self) -> usize {
        match self {
            Face::Bitmap(size) => size.char_height(),
            Face::Ttf { font, scale } => {
                let scaled = font.as_scaled(*scale);
                (scaled.ascent() - scaled.descent()).ceil() as usize
            }
        }
    }

    /// Advance width of `text` in pixels.
    pub fn text_width(&self, text: &str) -> usize {
        match self {
            Face::Bitmap(size) => text.chars().count() * size.char_width(),
            Face::Ttf { font, scale } => {
                let scaled = font.as_scaled(*scale);
                let mut width = 0.0f32;
                let mut prev: Option<GlyphId> = None;
                for ch in text.chars() {
                    let id = scaled.glyph_id(ch);
                    if let Some(prev) = prev {
                        width += scaled.kern(prev, id);
                    }
                    width += scaled.h_advance(id);
                    prev = Some(id);
                }
                width.ceil() as usize
            }
        }
    }

    /// Draw `text` with its top-left corner at `(x, y)`, clipping at the
    /// canvas edges.
    pub fn draw(&self, canvas: &mut GrayImage, x: usize, y: usize, text: &str) -> Result<(), PrintError> {
        match self {
            Face::Bitmap(size) => draw_bitmap(canvas, *size, x, y, text),
            Face::Ttf { font, scale } => {
                draw_ttf(canvas, font, *scale, x, y, text);
                Ok(())
            }
        }
    }

    /// Greedy word wrap to `max_width` pixels.
    ///
    /// Words longer than a whole line are broken between characters.
    pub fn wrap(&self, text: &str, max_width: usize) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();

        for word in text.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if self.text_width(&candidate) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            if self.text_width(word) <= max_width {
                current = word.to_string();
            } else {
                for ch in word.chars() {
                    current.push(ch);
                    if self.text_width(&current) > max_width && current.chars().count() > 1 {
                        current.pop();
                        lines.push(std::mem::take(&mut current));
                        current.push(ch);
                    }
                }
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }

        lines
    }
}

fn ink(canvas: &mut GrayImage, x: usize, y: usize, coverage: f32) {
    if x >= canvas.width() as usize || y >= canvas.height() as usize {
        return;
    }
    let darkness = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
    let pixel = canvas.get_pixel_mut(x as u32, y as u32);
    pixel[0] = pixel[0].min(255 - darkness);
}

fn draw_bitmap(canvas: &mut GrayImage, size: BitmapSize, x: usize, y: usize, text: &str) -> Result<(), PrintError> {
    let mut font = PSF2Font::new(size.font_data())
        .map_err(|_| PrintError::Font("built-in Spleen font failed to load".to_string()))?;

    let mut cursor_x = x;
    for ch in text.chars() {
        let utf8 = ch.to_string();
        if let Some(glyph) = font.glyph_for_utf8(utf8.as_bytes()) {
            for (row_y, row) in glyph.enumerate() {
                for (col_x, on) in row.enumerate() {
                    if on {
                        ink(canvas, cursor_x + col_x, y + row_y, 1.0);
                    }
                }
            }
        }
        cursor_x += size.char_width();
    }
    Ok(())
}

fn draw_ttf(canvas: &mut GrayImage, font: &FontArc, scale: PxScale, x: usize, y: usize, text: &str) {
    let scaled = font.as_scaled(scale);
    let baseline = y as f32 + scaled.ascent();
    let mut caret = x as f32;
    let mut prev: Option<GlyphId> = None;

    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = prev {
            caret += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(scale, point(caret, baseline));
        caret += scaled.h_advance(id);
        prev = Some(id);

        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|px, py, coverage| {
                let gx = bounds.min.x as i64 + px as i64;
                let gy = bounds.min.y as i64 + py as i64;
                if gx >= 0 && gy >= 0 {
                    ink(canvas, gx as usize, gy as usize, coverage);
                }
            });
        }
    }
}

/// Paint every pixel of a canvas white.
pub fn blank_canvas(width: usize, height: usize) -> GrayImage {
    GrayImage::from_pixel(width as u32, height as u32, Luma([255]))
}
