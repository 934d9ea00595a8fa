//! Raster drawing primitives for the annotator
//!
//! Circles, lines and a tiny built-in 5×7 bitmap font covering the
//! glyphs the overlay actually uses (shot indices and the "1 inch"
//! scale label). All primitives clip at the image border.

use crate::models::ColorImage;

/// Draw a circle outline of the given stroke thickness
pub fn draw_circle(img: &mut ColorImage, cx: i32, cy: i32, radius: i32, color: [u8; 3], thickness: i32) {
    let half = thickness as f64 * 0.5;
    let reach = radius + thickness;
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let dist = ((dx * dx + dy * dy) as f64).sqrt();
            if (dist - radius as f64).abs() <= half {
                img.put(cx + dx, cy + dy, color);
            }
        }
    }
}

/// Draw a filled circle
pub fn draw_disk(img: &mut ColorImage, cx: i32, cy: i32, radius: i32, color: [u8; 3]) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                img.put(cx + dx, cy + dy, color);
            }
        }
    }
}

/// Draw a horizontal line segment centered on `y` with the given
/// stroke thickness
pub fn draw_hline(img: &mut ColorImage, x0: i32, x1: i32, y: i32, color: [u8; 3], thickness: i32) {
    let half = thickness / 2;
    for yy in y - half..y - half + thickness {
        for x in x0.min(x1)..=x0.max(x1) {
            img.put(x, yy, color);
        }
    }
}

/// Draw a vertical line segment centered on `x` with the given stroke
/// thickness
pub fn draw_vline(img: &mut ColorImage, x: i32, y0: i32, y1: i32, color: [u8; 3], thickness: i32) {
    let half = thickness / 2;
    for xx in x - half..x - half + thickness {
        for y in y0.min(y1)..=y0.max(y1) {
            img.put(xx, y, color);
        }
    }
}

/// Glyph cell width including inter-glyph spacing, before scaling
pub const GLYPH_ADVANCE: i32 = 6;
/// Glyph height before scaling
pub const GLYPH_HEIGHT: i32 = 7;

/// 5×7 glyph rows, bit 4 = leftmost column. Only the glyphs the
/// annotator emits are defined; anything else renders as blank.
fn glyph(ch: char) -> [u8; 7] {
    match ch {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        'i' => [0x04, 0x00, 0x0C, 0x04, 0x04, 0x04, 0x0E],
        'n' => [0x00, 0x00, 0x16, 0x19, 0x11, 0x11, 0x11],
        'c' => [0x00, 0x00, 0x0E, 0x10, 0x10, 0x11, 0x0E],
        'h' => [0x10, 0x10, 0x16, 0x19, 0x11, 0x11, 0x11],
        _ => [0; 7],
    }
}

/// Render text with the built-in font; (x, y) is the top-left corner,
/// `scale` the integer pixel magnification
pub fn draw_text(img: &mut ColorImage, text: &str, x: i32, y: i32, scale: i32, color: [u8; 3]) {
    let mut pen_x = x;
    for ch in text.chars() {
        let rows = glyph(ch);
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..5 {
                if bits >> (4 - col) & 1 == 1 {
                    for sy in 0..scale {
                        for sx in 0..scale {
                            img.put(
                                pen_x + col * scale + sx,
                                y + row as i32 * scale + sy,
                                color,
                            );
                        }
                    }
                }
            }
        }
        pen_x += GLYPH_ADVANCE * scale;
    }
}

/// Pixel width of rendered text at the given scale
pub fn text_width(text: &str, scale: i32) -> i32 {
    text.chars().count() as i32 * GLYPH_ADVANCE * scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_stroke_leaves_interior_untouched() {
        let mut img = ColorImage::filled(64, 64, [0, 0, 0]);
        draw_circle(&mut img, 32, 32, 10, [0, 255, 0], 2);
        assert_eq!(img.get(32, 32), [0, 0, 0]);
        assert_eq!(img.get(42, 32), [0, 255, 0]);
        assert_eq!(img.get(32, 22), [0, 255, 0]);
    }

    #[test]
    fn disk_fills_center() {
        let mut img = ColorImage::filled(16, 16, [0, 0, 0]);
        draw_disk(&mut img, 8, 8, 3, [255, 0, 0]);
        assert_eq!(img.get(8, 8), [255, 0, 0]);
        assert_eq!(img.get(8, 12), [0, 0, 0]);
    }

    #[test]
    fn drawing_clips_at_borders() {
        let mut img = ColorImage::filled(8, 8, [0, 0, 0]);
        draw_circle(&mut img, 0, 0, 5, [1, 1, 1], 2);
        draw_text(&mut img, "8", -3, -3, 1, [2, 2, 2]);
        // no panic is the assertion; spot-check an in-bounds ring pixel
        assert_eq!(img.get(5, 0), [1, 1, 1]);
    }

    #[test]
    fn text_marks_pixels() {
        let mut img = ColorImage::filled(32, 16, [0, 0, 0]);
        draw_text(&mut img, "1", 0, 0, 1, [255, 255, 0]);
        // '1' has its stem in column 2
        assert_eq!(img.get(2, 3), [255, 255, 0]);
        assert_eq!(text_width("1 inch", 2), 72);
    }
}
