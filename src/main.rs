use clap::Parser;
use polyroots_renderer::cli::args::{CommandsEnum, PolyrootsRendererArgs};
use polyroots_renderer::cli::render::{render_single_frame, render_sweep};
use polyroots_renderer::core::file_io::{
    build_output_path_with_date_time, extract_base_name, maybe_date_time_string, FilePrefix,
};
use polyroots_renderer::quartic::params::PolyrootsParams;

fn main() {
    let args: PolyrootsRendererArgs = PolyrootsRendererArgs::parse();

    let polyroots_params = |path: &str| -> PolyrootsParams {
        serde_json::from_str(&std::fs::read_to_string(path).expect("Unable to read param file"))
            .expect("Unable to parse param file")
    };

    let build_file_prefix = |params_path: &str, date_time_out: bool| -> FilePrefix {
        FilePrefix {
            directory_path: build_output_path_with_date_time(
                params_path,
                "render",
                &maybe_date_time_string(date_time_out),
            ),
            file_base: extract_base_name(params_path).to_owned(),
        }
    };

    let result = match &args.command {
        Some(CommandsEnum::Render(params)) => render_sweep(
            &polyroots_params(&params.params_path),
            build_file_prefix(&params.params_path, params.date_time_out),
        ),

        Some(CommandsEnum::Frame(params)) => render_single_frame(
            &polyroots_params(&params.params_path),
            params.frame_index,
            build_file_prefix(&params.params_path, params.date_time_out),
        ),

        None => {
            println!("Default command (nothing specified!)");
            Ok(())
        }
    };

    if let Err(error) = result {
        eprintln!("ERROR:  {}", error);
        std::process::exit(1);
    }
}
