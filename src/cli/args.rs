use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct PolyrootsRendererArgs {
    #[command(subcommand)]
    pub command: Option<CommandsEnum>,
}

#[derive(Debug, Subcommand)]
pub enum CommandsEnum {
    /// Render every frame of the parameter sweep, then assemble the video.
    Render(ParameterFilePath),
    /// Render a single frame of the sweep (one unit of work, no video).
    Frame(SingleFrameArgs),
}

#[derive(Debug, Args)]
pub struct ParameterFilePath {
    pub params_path: String,

    #[clap(long, short)]
    pub date_time_out: bool,
}

#[derive(Debug, Args)]
pub struct SingleFrameArgs {
    pub params_path: String,

    /// Index into the parameter sweep.
    pub frame_index: usize,

    #[clap(long, short)]
    pub date_time_out: bool,
}
