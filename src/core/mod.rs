pub mod pipeline;
pub mod reader;
pub mod writer;

pub use crate::domain::model::{ConvertJob, Header, Record, Separator};
pub use crate::domain::ports::ConfigProvider;
pub use crate::utils::error::Result;
