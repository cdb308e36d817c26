use std::path::{Path, PathBuf};

pub const SOURCE_EXTENSION: &str = "csv";
pub const OUTPUT_EXTENSION: &str = "json";

/// `<dir>/<stem>.csv` becomes `<dir>/<stem>.json`.
pub fn output_path_for(source: &Path) -> PathBuf {
    source.with_extension(OUTPUT_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_keeps_directory_and_stem() {
        assert_eq!(
            output_path_for(Path::new("data/in/people.csv")),
            PathBuf::from("data/in/people.json")
        );
        assert_eq!(output_path_for(Path::new("people.csv")), PathBuf::from("people.json"));
    }

    #[test]
    fn test_output_path_only_swaps_last_extension() {
        assert_eq!(
            output_path_for(Path::new("/tmp/report.2024.csv")),
            PathBuf::from("/tmp/report.2024.json")
        );
    }
}
