use serde::Serialize;
use std::path::PathBuf;

pub fn extract_base_name(path: &str) -> &str {
    std::path::Path::new(path)
        .file_stem() // Get the base name component of the path
        .and_then(|name| name.to_str())
        .expect("Unable to extract base name")
}

pub fn build_output_path_with_date_time(
    params_path: &str,
    project: &str,
    datetime: &Option<String>,
) -> std::path::PathBuf {
    let mut dirs = vec!["out", project, extract_base_name(params_path)];
    if let Some(inner_datetime_str) = datetime {
        dirs.push(inner_datetime_str);
    }

    let directory_path: PathBuf = dirs.iter().collect();
    std::fs::create_dir_all(&directory_path).unwrap();
    directory_path
}

pub fn date_time_string() -> String {
    use chrono::{Datelike, Local, Timelike};
    let local_time = Local::now();
    format!(
        "{:04}{:02}{:02}_{:02}{:02}{:02}",
        local_time.year(),
        local_time.month(),
        local_time.day(),
        local_time.hour(),
        local_time.minute(),
        local_time.second()
    )
}

pub fn maybe_date_time_string(enable: bool) -> Option<String> {
    if enable {
        Option::Some(date_time_string())
    } else {
        Option::None
    }
}

/**
 * Store a path and prefix together, making it easy to generate the whole
 * family of per-frame artifacts (`<base>_<index>.<ext>`) plus the artifacts
 * shared by a sweep (the video, the resolved parameter dump).
 */
#[derive(Debug, Clone)]
pub struct FilePrefix {
    pub directory_path: std::path::PathBuf,
    pub file_base: String,
}

impl FilePrefix {
    pub fn with_suffix(&self, suffix: &str) -> std::path::PathBuf {
        self.directory_path.join(self.file_base.clone() + suffix)
    }

    /// Path of the artifact for one unit of work. The index is the only
    /// varying part, so re-running an index lands on the same path.
    pub fn indexed_path(&self, index: usize, extension: &str) -> std::path::PathBuf {
        self.directory_path
            .join(format!("{}_{}.{}", self.file_base, index, extension))
    }

    /// The `%d` input pattern that ffmpeg uses to read the frame sequence.
    pub fn indexed_path_pattern(&self, extension: &str) -> std::path::PathBuf {
        self.directory_path
            .join(format!("{}_%d.{}", self.file_base, extension))
    }

    pub fn create_and_step_into_sub_directory(&mut self, sub_directory: &str) {
        self.directory_path = self.directory_path.join(sub_directory);
        std::fs::create_dir_all(&self.directory_path).unwrap();
    }
}

pub fn serialize_to_json_or_panic<T: Serialize>(filename: std::path::PathBuf, data: &T) {
    let json = serde_json::to_string_pretty(data).expect("Unable to serialize data to JSON");
    std::fs::write(&filename, json)
        .unwrap_or_else(|_| panic!("Unable to write JSON file: {}", filename.display()));
}
