/**
 * One unit of work: sample the root cloud for a single leading coefficient,
 * rasterize it, and write the frame artifact (plus a JSON sidecar carrying
 * the caption) at the path determined by the frame index.
 */
use serde::{Deserialize, Serialize};

use crate::core::file_io::{serialize_to_json_or_panic, FilePrefix};
use crate::core::image_utils::write_image_to_file_or_panic;
use crate::core::point_render::rasterize_point_cloud;
use crate::core::stopwatch::Stopwatch;
use crate::core::task_graph::UnitOfWorkResult;
use crate::core::video::FRAME_EXTENSION;
use crate::quartic::params::PolyrootsParams;
use crate::quartic::roots::sample_root_cloud;

/**
 * Written next to each frame. The rendered image itself is bare (no axes,
 * no text), so the formula and the swept coefficient live here.
 */
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FrameCaption {
    pub formula: String,
    pub parameter: f64,
    pub frame_index: usize,
    pub sample_count: u32,
}

/// The quartic family with the swept coefficient substituted in.
pub fn formula_caption(a: f64) -> String {
    format!(
        "{:.2}*x^4 + (t2^4 - i*t2^2 - 1)*x^2 + (t1^4 + t1^2 - i*t1 - 1) = 0,  |t1| = |t2| = 1",
        a
    )
}

pub fn render_frame(
    params: &PolyrootsParams,
    frame_index: usize,
    a: f64,
    file_prefix: &FilePrefix,
) -> UnitOfWorkResult {
    let mut stopwatch = Stopwatch::new(format!("Frame {}", frame_index));

    let mut rng = rand::thread_rng();
    let cloud = sample_root_cloud(a, params.sample_count as usize, &mut rng)?;
    stopwatch.record_split("sample_and_solve".to_owned());

    let imgbuf = rasterize_point_cloud(
        &cloud,
        image::Rgba(params.style.background_color_rgba),
        image::Rgba(params.style.point_color_rgba),
        params.style.subpixel_antialiasing,
        &params.image_specification,
    );
    stopwatch.record_split("rasterize".to_owned());

    write_image_to_file_or_panic(file_prefix.indexed_path(frame_index, FRAME_EXTENSION), |f| {
        imgbuf.save(f)
    });
    serialize_to_json_or_panic(
        file_prefix.indexed_path(frame_index, "json"),
        &FrameCaption {
            formula: formula_caption(a),
            parameter: a,
            frame_index,
            sample_count: params.sample_count,
        },
    );
    stopwatch.record_split("write_artifacts".to_owned());

    stopwatch.display(&mut std::io::stdout().lock())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formula_caption_substitutes_the_coefficient() {
        let caption = formula_caption(8.0);
        assert!(caption.starts_with("8.00*x^4"));
        assert!(caption.contains("|t1| = |t2| = 1"));
    }
}
