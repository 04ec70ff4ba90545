#[cfg(test)]
mod tests {
    use glob::glob;
    use polyroots_renderer::quartic::params::PolyrootsParams;
    use serde::de::DeserializeOwned;
    use std::any::type_name;
    use std::fs;

    fn parse_all_parameter_files_or_panic<T: DeserializeOwned>(directory: &str) {
        let pattern = format!("{}/**/params.json", directory);

        // Use glob to find all matching .json files.
        // For each match, ensure that we can (1) open the file and (2) parse
        // it into the specified parameter type.
        let mut file_count = 0;
        for entry in glob(&pattern).expect("Failed to read glob pattern") {
            match entry {
                Ok(path) => {
                    let content = fs::read_to_string(&path)
                        .unwrap_or_else(|_| panic!("Failed to read file: {:?}", path));

                    let result: Result<T, _> = serde_json::from_str(&content);

                    match result {
                        Ok(_) => file_count += 1,
                        Err(err) => {
                            panic!(
                                "Failed to parse JSON file: {:?} as parameter type: `{}`.\n\n{:?}\n",
                                path,
                                type_name::<T>(),
                                err
                            );
                        }
                    }
                }
                Err(e) => panic!("Failed to read path: {:?}. Check permissions.", e),
            }
        }
        assert!(file_count > 0, "No parameter files found in: {}", directory);
    }

    #[test]
    fn test_ensure_all_demo_parameter_files_can_be_parsed() {
        parse_all_parameter_files_or_panic::<PolyrootsParams>("demos");
    }
}
