use crate::core::file_io::{serialize_to_json_or_panic, FilePrefix};
use crate::core::task_graph::{ArrayNode, FanInNode, TaskGraph};
use crate::core::video::{encode_video, VideoEncodeSettings};
use crate::quartic::frame::render_frame;
use crate::quartic::params::PolyrootsParams;

pub type PipelineResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/**
 * The whole pipeline: one array node drawing every frame of the sweep, and
 * one fan-in node that assembles the video once all frames exist. Returns an
 * error if any unit of work failed; the video node is starved (never run) in
 * that case.
 */
pub fn render_sweep(params: &PolyrootsParams, mut file_prefix: FilePrefix) -> PipelineResult {
    file_prefix.create_and_step_into_sub_directory("quartic_sweep");
    file_prefix.file_base = params.frame_base.clone();

    let sweep_values = params.sweep.values();
    if sweep_values.is_empty() {
        return Err("parameter sweep is empty; nothing to render".into());
    }
    println!(
        "INFO:  Sweep of {} frames, {} samples each",
        sweep_values.len(),
        params.sample_count
    );

    // Record the resolved parameters next to the artifacts they produced.
    serialize_to_json_or_panic(file_prefix.with_suffix("_params.json"), params);

    let settings = VideoEncodeSettings {
        frame_rate: params.frame_rate,
        frame_prefix: file_prefix.clone(),
        output_path: file_prefix.directory_path.join(&params.video_name),
    };
    let frame_count = sweep_values.len();

    let mut graph = TaskGraph::new();
    graph.add_array(ArrayNode {
        name: "draw_frame".to_owned(),
        count: frame_count,
        hints: params.frame_hints,
        work: Box::new(|index| render_frame(params, index, sweep_values[index], &file_prefix)),
    });
    graph.add_fan_in(FanInNode {
        name: "assemble_video".to_owned(),
        depends_on: "draw_frame".to_owned(),
        hints: params.video_hints,
        work: Box::new(move || encode_video(&settings, frame_count)),
    });

    graph.run(params.backend)
}

/**
 * One unit of work by itself, selected by sweep index. Useful for tuning
 * style and view parameters without paying for the whole sweep.
 */
pub fn render_single_frame(
    params: &PolyrootsParams,
    frame_index: usize,
    mut file_prefix: FilePrefix,
) -> PipelineResult {
    file_prefix.create_and_step_into_sub_directory("quartic_frame");
    file_prefix.file_base = params.frame_base.clone();

    let sweep_values = params.sweep.values();
    let a = *sweep_values.get(frame_index).ok_or_else(|| {
        format!(
            "frame index {} is out of range for a sweep of {} frames",
            frame_index,
            sweep_values.len()
        )
    })?;

    render_frame(params, frame_index, a, &file_prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::image_utils::ImageSpecification;
    use crate::core::task_graph::{ExecutorBackend, ResourceHints};
    use crate::quartic::params::{FrameStyle, ParameterSweep};

    fn tiny_params() -> PolyrootsParams {
        PolyrootsParams {
            sweep: ParameterSweep {
                start: 1.0,
                stop: 3.0,
                step: 1.0,
            },
            sample_count: 50,
            image_specification: ImageSpecification {
                resolution: nalgebra::Vector2::new(32, 32),
                center: nalgebra::Vector2::new(0.0, 0.0),
                width: 4.0,
            },
            style: FrameStyle {
                background_color_rgba: [244, 240, 231, 255],
                point_color_rgba: [38, 38, 38, 255],
                subpixel_antialiasing: 2,
            },
            frame_rate: 30,
            backend: ExecutorBackend::Serial,
            frame_hints: ResourceHints::default(),
            video_hints: ResourceHints::default(),
            frame_base: String::from("polyroots"),
            video_name: String::from("polyroots.mp4"),
        }
    }

    #[test]
    fn test_single_frame_index_out_of_range() {
        let params = tiny_params();
        let file_prefix = FilePrefix {
            directory_path: std::env::temp_dir()
                .join(format!("polyroots_cli_test_{}", std::process::id())),
            file_base: String::from("result"),
        };
        // The sweep [1.0, 3.0) with step 1.0 has exactly two frames.
        assert!(render_single_frame(&params, 2, file_prefix).is_err());
    }
}
