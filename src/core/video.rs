/**
 * Assembles the rendered frame sequence into an H.264 MP4 by driving the
 * system `ffmpeg` binary through an explicit argument list. Using the system
 * binary avoids native FFmpeg dev header/lib requirements; using an argument
 * vector (never a shell string) keeps the invocation inspectable and
 * testable.
 */
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::core::file_io::FilePrefix;
use crate::core::task_graph::UnitOfWorkResult;

pub const FRAME_EXTENSION: &str = "png";

#[derive(Debug, Clone)]
pub struct VideoEncodeSettings {
    pub frame_rate: u32,
    pub frame_prefix: FilePrefix,
    pub output_path: PathBuf,
}

impl VideoEncodeSettings {
    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.frame_prefix.indexed_path(index, FRAME_EXTENSION)
    }

    /// The full ffmpeg argument vector, mirroring:
    /// `ffmpeg -y -r <fps> -i <base>_%d.png -c:v libx264 -vf fps=<fps> -pix_fmt yuv420p <out>`
    pub fn ffmpeg_args(&self) -> Vec<String> {
        vec![
            String::from("-y"),
            String::from("-loglevel"),
            String::from("error"),
            String::from("-r"),
            self.frame_rate.to_string(),
            String::from("-i"),
            self.frame_prefix
                .indexed_path_pattern(FRAME_EXTENSION)
                .display()
                .to_string(),
            String::from("-c:v"),
            String::from("libx264"),
            String::from("-vf"),
            format!("fps={}", self.frame_rate),
            String::from("-pix_fmt"),
            String::from("yuv420p"),
            self.output_path.display().to_string(),
        ]
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/**
 * Fails fast, listing the missing indices, rather than letting ffmpeg stop
 * early at the first gap in the sequence.
 */
pub fn verify_frame_sequence(settings: &VideoEncodeSettings, frame_count: usize) -> UnitOfWorkResult {
    let missing: Vec<usize> = (0..frame_count)
        .filter(|&index| !settings.frame_path(index).exists())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "missing {} of {} expected frames in {} (first missing index: {})",
            missing.len(),
            frame_count,
            settings.frame_prefix.directory_path.display(),
            missing[0]
        )
        .into())
    }
}

/**
 * The assembly unit of work: verifies that every upstream frame artifact
 * exists, then encodes the sequence. A non-zero ffmpeg exit is an error
 * carrying the captured stderr; there is no partial-video fallback.
 */
pub fn encode_video(settings: &VideoEncodeSettings, frame_count: usize) -> UnitOfWorkResult {
    verify_frame_sequence(settings, frame_count)?;

    if !is_ffmpeg_on_path() {
        return Err("ffmpeg is required for video assembly, but was not found on PATH".into());
    }

    let output = Command::new("ffmpeg")
        .args(settings.ffmpeg_args())
        .stdin(Stdio::null())
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!(
            "ffmpeg exited with status {}: {}",
            output.status,
            stderr.trim()
        )
        .into());
    }

    println!(
        "INFO:  Wrote video file to: {}",
        settings.output_path.display()
    );
    Ok(())
}
