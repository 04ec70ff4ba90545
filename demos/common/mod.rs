use std::path::PathBuf;

use polyroots_renderer::{
    cli::render::{render_single_frame, render_sweep},
    core::file_io::FilePrefix,
    quartic::params::PolyrootsParams,
};

pub fn build_output_path(project: &str) -> std::path::PathBuf {
    let directory_path: PathBuf = ["out", project].iter().collect();
    std::fs::create_dir_all(&directory_path).unwrap();
    directory_path
}

pub fn read_params(demo_name: &str) -> PolyrootsParams {
    let params_name = String::from("demos/") + demo_name + "/params.json";
    serde_json::from_str(
        &std::fs::read_to_string(params_name).expect("Unable to read param file"),
    )
    .unwrap()
}

pub fn file_prefix(demo_name: &str) -> FilePrefix {
    FilePrefix {
        directory_path: build_output_path(demo_name),
        file_base: String::from("result"),
    }
}

#[allow(dead_code)]
pub fn render_sweep_demo(demo_name: &str) {
    render_sweep(&read_params(demo_name), file_prefix(demo_name)).unwrap();
}

#[allow(dead_code)]
pub fn render_single_frame_demo(demo_name: &str, frame_index: usize) {
    render_single_frame(&read_params(demo_name), frame_index, file_prefix(demo_name)).unwrap();
}
