use crate::core::reader::read_csv;
use crate::core::writer::write_json;
use crate::domain::model::{ConversionReport, ConvertJob};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ConvertError, Result};
use tokio::sync::{mpsc, oneshot};

/// Smallest buffer tokio allows; the reader stays at most one record ahead.
pub const HANDOFF_CAPACITY: usize = 1;

/// Runs the reader and writer stages concurrently and waits for the
/// writer's completion signal.
pub struct ConvertPipeline {
    job: ConvertJob,
}

impl ConvertPipeline {
    pub fn new(job: ConvertJob) -> Self {
        Self { job }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.job())
    }

    pub async fn run(self) -> Result<ConversionReport> {
        tracing::debug!(
            "Converting {} -> {} (separator: {}, pretty: {})",
            self.job.source_path.display(),
            self.job.output_path.display(),
            self.job.separator,
            self.job.pretty
        );

        let (tx, rx) = mpsc::channel(HANDOFF_CAPACITY);
        let (done_tx, done_rx) = oneshot::channel();

        let reader_job = self.job.clone();
        let reader = tokio::task::spawn_blocking(move || read_csv(reader_job, tx));
        let writer = tokio::spawn(write_json(self.job, rx, done_tx));

        let write = match done_rx.await {
            Ok(summary) => summary,
            // The writer dropped its completion sender without reporting,
            // so it failed; its own error is the one worth surfacing.
            Err(_) => {
                return Err(writer
                    .await?
                    .err()
                    .unwrap_or(ConvertError::HandoffClosedError))
            }
        };
        let read = reader.await??;

        Ok(ConversionReport { read, write })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Separator;
    use std::path::{Path, PathBuf};

    struct MockConfig {
        source_path: PathBuf,
        separator: Separator,
        pretty: bool,
    }

    impl ConfigProvider for MockConfig {
        fn source_path(&self) -> &Path {
            &self.source_path
        }

        fn separator(&self) -> Separator {
            self.separator
        }

        fn pretty(&self) -> bool {
            self.pretty
        }
    }

    fn write_source(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_run_converts_and_skips_bad_rows() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(dir.path(), "people.csv", "name,age\nalice,30\nbob,25\ncarol\n");
        let config = MockConfig {
            source_path: source,
            separator: Separator::Comma,
            pretty: false,
        };

        let report = ConvertPipeline::from_config(&config).run().await.unwrap();

        assert_eq!(report.read.rows_read, 2);
        assert_eq!(report.read.rows_skipped, 1);
        assert_eq!(report.write.records_written, 2);
        assert_eq!(report.write.output_path, dir.path().join("people.json"));

        let output: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&report.write.output_path).unwrap())
                .unwrap();
        assert_eq!(
            output,
            serde_json::json!([
                {"name": "alice", "age": "30"},
                {"name": "bob", "age": "25"}
            ])
        );
    }

    #[tokio::test]
    async fn test_run_preserves_order_across_many_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut content = String::from("id,square\n");
        for i in 0..500 {
            content.push_str(&format!("{},{}\n", i, i * i));
        }
        let source = write_source(dir.path(), "squares.csv", &content);
        let config = MockConfig {
            source_path: source,
            separator: Separator::Comma,
            pretty: true,
        };

        let report = ConvertPipeline::from_config(&config).run().await.unwrap();
        assert_eq!(report.write.records_written, 500);

        let output: Vec<serde_json::Value> =
            serde_json::from_str(&std::fs::read_to_string(&report.write.output_path).unwrap())
                .unwrap();
        for (i, item) in output.iter().enumerate() {
            assert_eq!(item["id"], i.to_string());
            assert_eq!(item["square"], (i * i).to_string());
        }
    }

    #[tokio::test]
    async fn test_run_honors_semicolon_separator() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(dir.path(), "cities.csv", "city;country\nLyon;France\n");
        let config = MockConfig {
            source_path: source,
            separator: Separator::Semicolon,
            pretty: false,
        };

        let report = ConvertPipeline::from_config(&config).run().await.unwrap();
        let output = std::fs::read_to_string(&report.write.output_path).unwrap();
        assert_eq!(output, r#"[{"city":"Lyon","country":"France"}]"#);
    }

    #[tokio::test]
    async fn test_run_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(dir.path(), "empty.csv", "name,age\n");
        let config = MockConfig {
            source_path: source,
            separator: Separator::Comma,
            pretty: true,
        };

        let report = ConvertPipeline::from_config(&config).run().await.unwrap();
        assert_eq!(report.write.records_written, 0);
        assert_eq!(
            std::fs::read_to_string(&report.write.output_path).unwrap(),
            "[]\n"
        );
    }

    #[tokio::test]
    async fn test_run_keeps_rows_after_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("cities.csv");
        std::fs::write(&source, b"name,city\nalice,Paris\nbob,Z\xfcrich\ncarol,Rome\n").unwrap();
        let config = MockConfig {
            source_path: source,
            separator: Separator::Comma,
            pretty: false,
        };

        let report = ConvertPipeline::from_config(&config).run().await.unwrap();
        assert_eq!(report.write.records_written, 3);

        let output: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&report.write.output_path).unwrap())
                .unwrap();
        assert_eq!(output[1]["city"], "Z\u{fffd}rich");
        assert_eq!(output[2]["name"], "carol");
    }

    #[tokio::test]
    async fn test_run_reports_reader_failure() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(dir.path(), "blank.csv", "");
        let config = MockConfig {
            source_path: source,
            separator: Separator::Comma,
            pretty: false,
        };

        let result = ConvertPipeline::from_config(&config).run().await;
        assert!(matches!(result, Err(ConvertError::MissingHeaderError { .. })));
    }

    #[tokio::test]
    async fn test_run_reports_writer_failure() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(dir.path(), "people.csv", "name\nalice\n");
        let job = ConvertJob {
            source_path: source,
            output_path: dir.path().join("no-such-dir").join("people.json"),
            separator: Separator::Comma,
            pretty: false,
        };

        let result = ConvertPipeline::new(job).run().await;
        assert!(matches!(result, Err(ConvertError::IoError(_))));
    }
}
