//! Rotated sprite blit.
//!
//! The display toolkit has plain image drawing but nothing that rotates, so
//! the football carries its own blit: inverse nearest-neighbour sampling
//! about the sprite center, skipping pixels the transparency mask marks off.
//! The sprite art is inscribed with enough margin that no rotation clips.

use embedded_graphics::{
    draw_target::DrawTarget,
    pixelcolor::{raw::RawU16, Rgb565},
    prelude::{Pixel, Point},
};
use libm::{cosf, sinf};

use crate::assets::Asset;

/// Draw `asset` unrotated with its top-left at `origin`.
pub fn draw<D>(target: &mut D, asset: &Asset, origin: Point) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let w = asset.width();
    let h = asset.height();
    let pixels = (0..h)
        .flat_map(move |y| (0..w).map(move |x| (x, y)))
        .filter_map(|(x, y)| {
            if !asset.is_opaque(x, y) {
                return None;
            }
            let color = Rgb565::from(RawU16::new(asset.pixel(x, y)));
            Some(Pixel(origin + Point::new(x as i32, y as i32), color))
        });
    target.draw_iter(pixels)
}

/// Draw `asset` with its top-left at `origin`, rotated `angle_deg` clockwise
/// about its center.
pub fn draw_rotated<D>(
    target: &mut D,
    asset: &Asset,
    origin: Point,
    angle_deg: f32,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let rad = angle_deg * (core::f32::consts::PI / 180.0);
    let (sin, cos) = (sinf(rad), cosf(rad));
    let w = asset.width() as i32;
    let h = asset.height() as i32;
    let cx = (w - 1) as f32 / 2.0;
    let cy = (h - 1) as f32 / 2.0;

    let pixels = (0..h)
        .flat_map(move |dy| (0..w).map(move |dx| (dx, dy)))
        .filter_map(|(dx, dy)| {
            // Inverse-rotate the destination pixel into source space.
            let fx = dx as f32 - cx;
            let fy = dy as f32 - cy;
            let sx = (fx * cos + fy * sin + cx + 0.5) as i32;
            let sy = (-fx * sin + fy * cos + cy + 0.5) as i32;
            if sx < 0 || sy < 0 || sx >= w || sy >= h {
                return None;
            }
            let (sx, sy) = (sx as u32, sy as u32);
            if !asset.is_opaque(sx, sy) {
                return None;
            }
            let color = Rgb565::from(RawU16::new(asset.pixel(sx, sy)));
            Some(Pixel(origin + Point::new(dx, dy), color))
        });

    target.draw_iter(pixels)
}
