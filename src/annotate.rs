//! Overlay rendering
//!
//! Pure functions: the caller's buffer is cloned, drawn on and
//! returned. Every shot gets a green circle at its radius with a red
//! center dot and optionally a yellow 1-based index label; a 1-inch
//! reference bar whose pixel length equals the calibration's
//! pixels-per-inch is anchored near the top-right corner so inspected
//! images carry a calibration-accurate ruler.

use crate::metrics::Calibration;
use crate::models::{ColorImage, Shot};
use crate::utils::draw::{
    GLYPH_HEIGHT, draw_circle, draw_disk, draw_hline, draw_text, draw_vline, text_width,
};

const CIRCLE_COLOR: [u8; 3] = [0, 255, 0];
const CENTER_COLOR: [u8; 3] = [255, 0, 0];
const LABEL_COLOR: [u8; 3] = [255, 255, 0];
const SCALE_FG: [u8; 3] = [255, 255, 255];
const SCALE_BG: [u8; 3] = [0, 0, 0];

/// Stroke width of the shot circles
const CIRCLE_THICKNESS: i32 = 2;
/// Margin between the scale bar and the image edges
const SCALE_MARGIN: i32 = 20;
/// Label magnification for the built-in font
const TEXT_SCALE: i32 = 2;

/// Render the shot overlay and reference scale onto a copy of the
/// image. The input buffer is never mutated.
pub fn annotate(image: &ColorImage, shots: &[Shot], calibration: &Calibration, numbered: bool) -> ColorImage {
    let mut out = image.clone();
    draw_shots(&mut out, shots, numbered);
    draw_reference_scale(&mut out, calibration.pixels_per_inch);
    out
}

/// Draw shot circles, center dots and optional index labels
pub fn draw_shots(image: &mut ColorImage, shots: &[Shot], numbered: bool) {
    for (i, shot) in shots.iter().enumerate() {
        draw_circle(image, shot.x, shot.y, shot.radius, CIRCLE_COLOR, CIRCLE_THICKNESS);
        draw_disk(image, shot.x, shot.y, 2, CENTER_COLOR);
        if numbered {
            let label = (i + 1).to_string();
            draw_text(
                image,
                &label,
                shot.x - 10,
                shot.y - 20 - GLYPH_HEIGHT * TEXT_SCALE,
                TEXT_SCALE,
                LABEL_COLOR,
            );
        }
    }
}

/// Draw the 1-inch reference bar: black underlay, white line, end
/// ticks and a "1 inch" label, anchored top-right
pub fn draw_reference_scale(image: &mut ColorImage, pixels_per_inch: f64) {
    let length = pixels_per_inch.round() as i32;
    let end_x = image.width() as i32 - SCALE_MARGIN;
    let start_x = end_x - length;
    let y = SCALE_MARGIN + 30;

    draw_hline(image, start_x, end_x, y, SCALE_BG, 5);
    draw_hline(image, start_x, end_x, y, SCALE_FG, 3);

    let tick_half = 5;
    for x in [start_x, end_x] {
        draw_vline(image, x, y - tick_half, y + tick_half, SCALE_BG, 3);
        draw_vline(image, x, y - tick_half, y + tick_half, SCALE_FG, 2);
    }

    let label = "1 inch";
    let text_x = start_x + (length - text_width(label, TEXT_SCALE)) / 2;
    let text_y = y - 10 - GLYPH_HEIGHT * TEXT_SCALE;
    // black offset underlay keeps the label readable on light paper
    draw_text(image, label, text_x + 1, text_y + 1, TEXT_SCALE, SCALE_BG);
    draw_text(image, label, text_x, text_y, TEXT_SCALE, SCALE_FG);
}
