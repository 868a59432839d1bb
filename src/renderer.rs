use crate::annotations::Annotation;
use crate::colors::color_of;
use ab_glyph::{FontRef, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use thiserror::Error;

static FONT_BYTES: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

const STROKE_WIDTH: i64 = 3;
const LABEL_SCALE: f32 = 16.0;

#[derive(Error, Debug)]
pub enum RendererError {
    #[error("Failed to parse embedded font: {0}")]
    InvalidFont(#[from] ab_glyph::InvalidFont),
}

/// Draws labeled bounding boxes onto decoded images. Holds the parsed
/// label font; everything else is per-call.
pub struct Renderer {
    font: FontRef<'static>,
}

impl Renderer {
    pub fn new() -> Result<Self, RendererError> {
        let font = FontRef::try_from_slice(FONT_BYTES)?;
        Ok(Self { font })
    }

    /// Draws each annotation in input order: a 3px outlined rectangle plus
    /// the label text at a fixed offset from the top-left corner, both in
    /// the label's palette color. Out-of-bounds geometry is clipped by the
    /// drawing primitives; inverted corners are normalized first.
    pub fn render(&self, image: &mut RgbImage, annotations: &[Annotation]) {
        for annotation in annotations {
            let color = Rgb(color_of(&annotation.label));

            let (x0, x1) = ordered(annotation.x, annotation.x + annotation.width);
            let (y0, y1) = ordered(annotation.y, annotation.y + annotation.height);

            for inset in 0..STROKE_WIDTH {
                let width = x1 - x0 - 2 * inset;
                let height = y1 - y0 - 2 * inset;
                if width <= 0 || height <= 0 {
                    break;
                }
                let rect = Rect::at(clamp_i32(x0 + inset), clamp_i32(y0 + inset))
                    .of_size(width as u32, height as u32);
                draw_hollow_rect_mut(image, rect, color);
            }

            draw_text_mut(
                image,
                color,
                clamp_i32(annotation.x + 5),
                clamp_i32(annotation.y - 10),
                PxScale::from(LABEL_SCALE),
                &self.font,
                &annotation.label,
            );
        }
    }
}

fn ordered(a: i64, b: i64) -> (i64, i64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn clamp_i32(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
