use crate::domain::model::Separator;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::paths::SOURCE_EXTENSION;
use crate::utils::validation::{
    validate_file_exists, validate_file_extension, validate_path, Validate,
};
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Parser)]
#[command(name = "csvtojson")]
#[command(about = "Convert a CSV file into a JSON array of objects")]
pub struct CliConfig {
    #[arg(long, value_enum, default_value_t = Separator::Comma, help = "CSV field separator")]
    pub separator: Separator,

    #[arg(long, help = "Write indented JSON")]
    pub pretty: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log resource usage after the conversion")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[arg(value_name = "CSV_FILE", help = "Path to the CSV file to convert")]
    pub csv_file: PathBuf,
}

impl ConfigProvider for CliConfig {
    fn source_path(&self) -> &Path {
        &self.csv_file
    }

    fn separator(&self) -> Separator {
        self.separator
    }

    fn pretty(&self) -> bool {
        self.pretty
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("csv_file", &self.csv_file)?;
        validate_file_extension("csv_file", &self.csv_file, SOURCE_EXTENSION)?;
        validate_file_exists(&self.csv_file)?;
        Ok(())
    }
}
