use serde::{Deserialize, Serialize};

use crate::core::image_utils::ImageSpecification;
use crate::core::task_graph::{ExecutorBackend, ResourceHints};

/**
 * The arithmetic progression of leading coefficients, one frame per value.
 * Half-open interval [start, stop), generated once at startup.
 */
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ParameterSweep {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl ParameterSweep {
    pub fn values(&self) -> Vec<f64> {
        iter_num_tools::arange(self.start..self.stop, self.step).collect()
    }
}

/**
 * Explicit, immutable render style for every frame in a sweep. Passed into
 * the render step by value; there is no process-wide style state.
 */
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FrameStyle {
    pub background_color_rgba: [u8; 4],
    pub point_color_rgba: [u8; 4],
    pub subpixel_antialiasing: i32,
}

/**
 * Complete set of parameters that are fed in from the JSON for one sweep of
 * the quartic root-cloud pipeline.
 */
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PolyrootsParams {
    pub sweep: ParameterSweep,
    /// (t1, t2) pairs drawn per frame; each pair yields four roots.
    pub sample_count: u32,
    pub image_specification: ImageSpecification,
    pub style: FrameStyle,
    pub frame_rate: u32,
    pub backend: ExecutorBackend,
    pub frame_hints: ResourceHints,
    pub video_hints: ResourceHints,
    pub frame_base: String,
    pub video_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sweep_is_half_open() {
        let sweep = ParameterSweep {
            start: 0.0,
            stop: 1.0,
            step: 0.25,
        };
        let values = sweep.values();
        assert_eq!(values.len(), 4);
        assert_relative_eq!(values[0], 0.0);
        assert_relative_eq!(values[3], 0.75);
    }

    #[test]
    fn test_oversized_step_yields_a_single_frame() {
        // The original exploration used a step far larger than the range,
        // collapsing the sweep to its start value.
        let sweep = ParameterSweep {
            start: 0.01,
            stop: 15.0,
            step: 300.0,
        };
        let values = sweep.values();
        assert_eq!(values.len(), 1);
        assert_relative_eq!(values[0], 0.01);
    }
}
