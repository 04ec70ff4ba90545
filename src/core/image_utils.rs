use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/**
 * Fully specifies both an image resolution and how it is anchored into the
 * complex plane in which the root clouds live. The height in "real" space is
 * derived from the aspect ratio of the image and the specified width.
 */
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ImageSpecification {
    pub resolution: nalgebra::Vector2<u32>,
    pub center: nalgebra::Vector2<f64>,
    pub width: f64,
}

impl ImageSpecification {
    pub fn height(&self) -> f64 {
        self.width * (self.resolution[1] as f64) / (self.resolution[0] as f64)
    }

    /**
     * Returns a new image specification with the same center and width, but
     * with resolution scaled by `subpixel_count`. Used by the antialiasing
     * pass of the scatter rasterizer.
     */
    pub fn upsample(&self, subpixel_count: i32) -> ImageSpecification {
        assert!(subpixel_count > 0);
        ImageSpecification {
            resolution: self.resolution * (subpixel_count as u32),
            center: self.center,
            width: self.width,
        }
    }
}

#[derive(Clone, Debug)]
/**
 * Affine map between pixel indices and one axis of the complex plane.
 */
pub struct LinearPixelMap {
    offset: f64,
    slope: f64,
}

impl LinearPixelMap {
    /**
     * @param n: number of pixels spanned by [x0,x1]
     * @param x0: output of the map at 0
     * @param x1: output of the map at n-1
     */
    pub fn new(n: u32, x0: f64, x1: f64) -> LinearPixelMap {
        assert!(n > 0);
        let offset = x0;
        let slope = (x1 - x0) / ((n - 1) as f64);
        LinearPixelMap { offset, slope }
    }

    pub fn new_from_center_and_width(n: u32, center: f64, width: f64) -> LinearPixelMap {
        LinearPixelMap::new(n, center - 0.5 * width, center + 0.5 * width)
    }

    // Map from pixel (integer) to point (float)
    pub fn map(&self, index: u32) -> f64 {
        self.offset + self.slope * (index as f64)
    }

    // Maps from point to pixel.
    pub fn inverse_map(&self, point: f64) -> i32 {
        ((point - self.offset) / self.slope) as i32
    }
}

#[derive(Clone, Debug)]
pub struct PixelMapper {
    width: LinearPixelMap,
    height: LinearPixelMap,
}

impl PixelMapper {
    pub fn new(image_specification: &ImageSpecification) -> PixelMapper {
        PixelMapper {
            width: LinearPixelMap::new_from_center_and_width(
                image_specification.resolution[0],
                image_specification.center[0],
                image_specification.width,
            ),
            height: LinearPixelMap::new_from_center_and_width(
                image_specification.resolution[1],
                image_specification.center[1],
                -image_specification.height(), // Image coordinates are upside down.
            ),
        }
    }

    pub fn inverse_map(&self, point: &nalgebra::Vector2<f64>) -> (i32, i32) {
        (
            self.width.inverse_map(point[0]),
            self.height.inverse_map(point[1]),
        )
    }

    pub fn map(&self, point: &(u32, u32)) -> (f64, f64) {
        let (x, y) = point;
        (self.width.map(*x), self.height.map(*y))
    }
}

/**
 * Coordinate of a subpixel within the entire image.
 */
pub struct SubpixelIndex {
    pub pixel: (i32, i32),
    pub subpixel: (i32, i32),
}

/**
 * Used for antialiasing calculations. Splits a query into a pixel index and a
 * subpixel index.
 */
pub struct UpsampledPixelMapper {
    pixel_mapper: PixelMapper,
    subpixel_count: i32,
}

impl UpsampledPixelMapper {
    pub fn new(
        image_specification: &ImageSpecification,
        subpixel_count: i32,
    ) -> UpsampledPixelMapper {
        UpsampledPixelMapper {
            pixel_mapper: PixelMapper::new(&image_specification.upsample(subpixel_count)),
            subpixel_count,
        }
    }

    pub fn inverse_map(&self, point: &nalgebra::Vector2<f64>) -> SubpixelIndex {
        let (x_raw, y_raw) = self.pixel_mapper.inverse_map(point);
        SubpixelIndex {
            pixel: (x_raw / self.subpixel_count, y_raw / self.subpixel_count),
            subpixel: (x_raw % self.subpixel_count, y_raw % self.subpixel_count),
        }
    }
}

/**
 * Bitmask over a square grid of subpixels, with a maximum bin count of 8 per
 * side. The mask is stored in the bits of a u64 integer as a space
 * optimization; `count_ones` gives the subpixel coverage of the pixel.
 */
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubpixelGridMask {
    bitmask: u64,
}

impl SubpixelGridMask {
    pub fn new() -> SubpixelGridMask {
        SubpixelGridMask { bitmask: 0 }
    }

    pub fn insert(&mut self, count_per_side: i32, coordinate: (i32, i32)) {
        let (x, y) = coordinate;
        assert!(x >= 0 && x < count_per_side);
        assert!(y >= 0 && y < count_per_side);
        let index = x * count_per_side + y;
        self.bitmask |= 1 << index;
    }

    pub fn count_ones(&self) -> u32 {
        self.bitmask.count_ones()
    }
}

impl Default for SubpixelGridMask {
    fn default() -> Self {
        Self::new()
    }
}

pub fn write_image_to_file_or_panic<F, T, E>(filename: std::path::PathBuf, save_lambda: F)
where
    F: FnOnce(&PathBuf) -> Result<T, E>,
{
    save_lambda(&filename)
        .unwrap_or_else(|_| panic!("ERROR:  Unable to write image file: {}", filename.display()));
    println!("INFO:  Wrote image file to: {}", filename.display());
}
