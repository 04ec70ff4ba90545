/**
 * This module rasterizes a cloud of complex points into an image buffer.
 * Each point lands in a subpixel bin; a pixel's final color is the point
 * color blended toward the background by its subpixel coverage, which
 * antialiases the edges of dense regions without tracking per-point alpha.
 */
use image::Pixel;
use num::complex::Complex64;

use crate::core::image_utils::{ImageSpecification, SubpixelGridMask, UpsampledPixelMapper};

pub type PointImageBuffer = image::ImageBuffer<image::Rgba<u8>, Vec<u8>>;

/**
 * Rasterizes `points` into a newly allocated image buffer.
 *
 * Points that fall outside the view rectangle are silently ignored; the
 * caller picks an `ImageSpecification` wide enough for the subject.
 */
pub fn rasterize_point_cloud(
    points: &[Complex64],
    background_color: image::Rgba<u8>,
    point_color: image::Rgba<u8>,
    subpixel_antialiasing: i32,
    image_specification: &ImageSpecification,
) -> PointImageBuffer {
    assert!(subpixel_antialiasing > 0 && subpixel_antialiasing <= 8);

    let resolution = &image_specification.resolution;
    let mut imgbuf = PointImageBuffer::new(resolution[0], resolution[1]);
    for (_, _, pixel) in imgbuf.enumerate_pixels_mut() {
        *pixel = background_color;
    }

    let mut subpixel_mask = nalgebra::DMatrix::from_element(
        resolution[0] as usize,
        resolution[1] as usize,
        SubpixelGridMask::new(),
    );

    let pixel_mapper = UpsampledPixelMapper::new(image_specification, subpixel_antialiasing);

    for point in points {
        let index = pixel_mapper.inverse_map(&nalgebra::Vector2::new(point.re, point.im));
        let (x, y) = index.pixel;
        // Points left of or above the frame map to negative raw indices,
        // which integer division rounds toward pixel zero. Reject them
        // before the subpixel mask sees a negative coordinate.
        if index.subpixel.0 < 0 || index.subpixel.1 < 0 {
            continue;
        }
        if x >= 0 && (x as u32) < resolution[0] && y >= 0 && (y as u32) < resolution[1] {
            subpixel_mask[(x as usize, y as usize)].insert(subpixel_antialiasing, index.subpixel);
        }
    }

    // Blend each pixel from the background toward the point color, weighted
    // by the fraction of its subpixel grid that was hit.
    let coverage_scale = 1.0 / ((subpixel_antialiasing * subpixel_antialiasing) as f32);
    for (x, y, pixel) in imgbuf.enumerate_pixels_mut() {
        let coverage =
            coverage_scale * (subpixel_mask[(x as usize, y as usize)].count_ones() as f32);
        if coverage > 0.0 {
            let mut colored = point_color;
            colored.apply2(&background_color, |point: u8, background: u8| -> u8 {
                ((point as f32) * coverage + (background as f32) * (1.0 - coverage)) as u8
            });
            *pixel = colored;
        }
    }

    imgbuf
}
