//! Preview renderer
//!
//! Rasterizes a simple top-down view of the placed board so callers
//! can show something before opening the Gerber files in a viewer:
//! substrate, outline, corner mounting holes, pads and courtyards.

use image::{Rgb, RgbImage};

use crate::gerber::{pin_position, PIN_PITCH};
use crate::model::{BoardParameters, Component, Position};

/// Render scale in pixels per mm.
const SCALE: f64 = 4.0;
/// Empty border around the board, in pixels.
const MARGIN: u32 = 16;

const BACKGROUND: Rgb<u8> = Rgb([24, 24, 28]);
const SUBSTRATE: Rgb<u8> = Rgb([16, 94, 48]);
const OUTLINE: Rgb<u8> = Rgb([214, 178, 76]);
const PAD: Rgb<u8> = Rgb([222, 192, 96]);
const COURTYARD: Rgb<u8> = Rgb([236, 236, 236]);
const HOLE: Rgb<u8> = Rgb([32, 32, 36]);

/// Render the preview image for a placed design.
pub fn render(
    board: &BoardParameters,
    components: &[Component],
    positions: &[Position],
) -> RgbImage {
    let width = (board.width * SCALE).ceil() as u32 + 2 * MARGIN;
    let height = (board.height * SCALE).ceil() as u32 + 2 * MARGIN;
    let mut image = RgbImage::from_pixel(width, height, BACKGROUND);

    fill_rect(
        &mut image,
        px(0.0),
        px(0.0),
        px(board.width),
        px(board.height),
        SUBSTRATE,
    );
    stroke_rect(
        &mut image,
        px(0.0),
        px(0.0),
        px(board.width),
        px(board.height),
        OUTLINE,
    );

    // Corner mounting holes, matching the drill plan's 5mm inset.
    for (x, y) in [
        (5.0, 5.0),
        (5.0, board.height - 5.0),
        (board.width - 5.0, 5.0),
        (board.width - 5.0, board.height - 5.0),
    ] {
        fill_disc(&mut image, px(x), px(y), (1.6 * SCALE) as i64, HOLE);
    }

    for (component, position) in components.iter().zip(positions) {
        let half_w = ((component.pin_count() as f64 * PIN_PITCH) / 2.0).max(PIN_PITCH);
        stroke_rect(
            &mut image,
            px(position.x - half_w),
            px(position.y - 1.0),
            px(position.x + half_w),
            px(position.y + 1.0),
            COURTYARD,
        );
        for pin in 0..component.pin_count() {
            let p = pin_position(component, *position, pin);
            fill_disc(&mut image, px(p.x), px(p.y), (0.5 * SCALE) as i64, PAD);
        }
    }

    image
}

/// Board mm to image pixel coordinate.
fn px(mm: f64) -> i64 {
    (mm * SCALE).round() as i64 + MARGIN as i64
}

fn put(image: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < image.width() && (y as u32) < image.height() {
        image.put_pixel(x as u32, y as u32, color);
    }
}

fn fill_rect(image: &mut RgbImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>) {
    for y in y0..=y1 {
        for x in x0..=x1 {
            put(image, x, y, color);
        }
    }
}

fn stroke_rect(image: &mut RgbImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>) {
    for x in x0..=x1 {
        put(image, x, y0, color);
        put(image, x, y1, color);
    }
    for y in y0..=y1 {
        put(image, x0, y, color);
        put(image, x1, y, color);
    }
}

fn fill_disc(image: &mut RgbImage, cx: i64, cy: i64, radius: i64, color: Rgb<u8>) {
    for y in (cy - radius)..=(cy + radius) {
        for x in (cx - radius)..=(cx + radius) {
            let dx = x - cx;
            let dy = y - cy;
            if dx * dx + dy * dy <= radius * radius {
                put(image, x, y, color);
            }
        }
    }
}
