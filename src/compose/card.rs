//! # Tweet Cards
//!
//! Lays out a social-media style card on a white canvas the width of the
//! paper:
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │                  8px                     │
//! │ ┌──────┐                                 │
//! │ │ pic  │ @username                       │  row height = max(40, name)
//! │ └──────┘                                 │
//! │                  10px                    │
//! │ Body text, word-wrapped to the full      │  each line + 4px
//! │ width of the paper                       │
//! │                  10px                    │
//! │ Jan 5, 2025                              │
//! │                  40px                    │  room for the tear bar
//! └──────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use image::DynamicImage;
use image::imageops;

use super::image::{fit_height, open};
use super::text::{BitmapSize, Face, blank_canvas};
use crate::error::PrintError;
use crate::render::source::PixelGrid;

/// Profile thumbnail height in pixels
pub const PROFILE_HEIGHT: usize = 40;

const PADDING_TOP: usize = 8;
const PADDING_BOTTOM: usize = 40;
const SECTION_SPACING: usize = 10;
const LINE_SPACING: usize = 4;
const NAME_GAP: usize = 6;

/// Card content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub profile: PathBuf,
    pub username: String,
    pub text: String,
    pub date: String,
}

/// Faces for the three text roles of a card.
#[derive(Debug, Clone)]
pub struct CardFaces {
    pub username: Face,
    pub body: Face,
    pub date: Face,
}

impl CardFaces {
    /// Built-in Spleen faces: 12×24 for name and body, 8×16 for the date.
    pub fn bitmap() -> Self {
        Self {
            username: Face::Bitmap(BitmapSize::Large),
            body: Face::Bitmap(BitmapSize::Large),
            date: Face::Bitmap(BitmapSize::Small),
        }
    }

    /// One TTF font at 24 / 22 / 18 px.
    pub fn ttf(path: &Path) -> Result<Self, PrintError> {
        let font = Face::load_font(path)?;
        Ok(Self {
            username: Face::ttf(font.clone(), 24.0),
            body: Face::ttf(font.clone(), 22.0),
            date: Face::ttf(font, 18.0),
        })
    }

    /// TTF faces when a font path is configured, bitmap faces otherwise.
    pub fn load(font: Option<&Path>) -> Result<Self, PrintError> {
        match font {
            Some(path) => Self::ttf(path),
            None => Ok(Self::bitmap()),
        }
    }
}

impl Card {
    /// Load the profile picture and lay the card out `width` dots wide.
    ///
    /// ## Errors
    ///
    /// `SourceNotFound` / `UnsupportedImage` for the profile picture.
    pub fn render(&self, faces: &CardFaces, width: usize) -> Result<PixelGrid, PrintError> {
        let profile = open(&self.profile)?;
        self.render_with_profile(&profile, faces, width)
    }

    /// Lay the card out around an already decoded profile picture.
    pub fn render_with_profile(
        &self,
        profile: &DynamicImage,
        faces: &CardFaces,
        width: usize,
    ) -> Result<PixelGrid, PrintError> {
        let thumb = fit_height(profile, PROFILE_HEIGHT)?;
        let handle = format!("@{}", self.username);
        let lines = faces.body.wrap(&self.text, width);

        let name_row = PROFILE_HEIGHT.max(faces.username.line_height());
        let body_line = faces.body.line_height() + LINE_SPACING;
        let body_height = lines.len() * body_line;
        let height = PADDING_TOP
            + name_row
            + SECTION_SPACING
            + body_height
            + SECTION_SPACING
            + faces.date.line_height()
            + PADDING_BOTTOM;

        let mut canvas = blank_canvas(width, height);
        imageops::replace(&mut canvas, &thumb, 0, PADDING_TOP as i64);

        faces
            .username
            .draw(&mut canvas, thumb.width() as usize + NAME_GAP, PADDING_TOP, &handle)?;

        let mut y = PADDING_TOP + name_row + SECTION_SPACING;
        for line in &lines {
            faces.body.draw(&mut canvas, 0, y, line)?;
            y += body_line;
        }

        faces.date.draw(&mut canvas, 0, y + SECTION_SPACING, &self.date)?;

        tracing::debug!(width, height, lines = lines.len(), "composed card");
        Ok(PixelGrid::from(canvas))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::source::GrayscaleSource;
    use image::{GrayImage, Luma};

    fn card(text: &str) -> Card {
        Card {
            profile: PathBuf::from("unused.png"),
            username: "ferris".to_string(),
            text: text.to_string(),
            date: "Jan 5, 2025".to_string(),
        }
    }

    fn profile() -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(80, 80, Luma([0])))
    }

    #[test]
    fn test_card_height_bitmap() {
        let grid = card("hello world")
            .render_with_profile(&profile(), &CardFaces::bitmap(), 384)
            .unwrap();
        // 8 + 40 + 10 + (24 + 4) + 10 + 16 + 40
        assert_eq!(grid.width(), 384);
        assert_eq!(grid.height(), 152);
    }

    #[test]
    fn test_card_grows_with_text() {
        let faces = CardFaces::bitmap();
        let short = card("short").render_with_profile(&profile(), &faces, 384).unwrap();
        let long = card(&"word ".repeat(40)).render_with_profile(&profile(), &faces, 384).unwrap();
        // 200 chars at 32 per line -> 7 lines
        assert_eq!(long.height() - short.height(), 6 * 28);
    }

    #[test]
    fn test_profile_is_pasted() {
        let grid = card("hi")
            .render_with_profile(&profile(), &CardFaces::bitmap(), 384)
            .unwrap();
        // Thumbnail is 40x40 black at (0, 8)
        assert_eq!(grid.gray(0, 8), 0);
        assert_eq!(grid.gray(39, 47), 0);
        assert_eq!(grid.gray(0, 7), 255);
        assert_eq!(grid.gray(0, 48), 255);
    }

    #[test]
    fn test_bottom_padding_blank() {
        let grid = card("hi")
            .render_with_profile(&profile(), &CardFaces::bitmap(), 384)
            .unwrap();
        let height = grid.height();
        for y in height - PADDING_BOTTOM..height {
            for x in 0..384 {
                assert_eq!(grid.gray(x, y), 255);
            }
        }
    }

    #[test]
    fn test_missing_profile() {
        let err = card("hi").render(&CardFaces::bitmap(), 384).unwrap_err();
        assert!(matches!(err, PrintError::SourceNotFound(_)));
    }

    #[test]
    fn test_missing_font() {
        let err = CardFaces::load(Some(Path::new("/nonexistent/DejaVuSans.ttf"))).unwrap_err();
        assert!(matches!(err, PrintError::Font(_)));
    }
}
