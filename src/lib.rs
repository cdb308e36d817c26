pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use core::pipeline::ConvertPipeline;
pub use core::reader::RecordReader;
pub use core::writer::JsonArrayWriter;
pub use domain::model::{ConversionReport, ConvertJob, Header, Record, Separator};
pub use domain::ports::ConfigProvider;
pub use utils::error::{ConvertError, Result, RowError};
