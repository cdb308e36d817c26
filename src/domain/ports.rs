use crate::domain::model::{ConvertJob, Separator};
use crate::utils::paths::output_path_for;
use std::path::Path;

pub trait ConfigProvider: Send + Sync {
    fn source_path(&self) -> &Path;
    fn separator(&self) -> Separator;
    fn pretty(&self) -> bool;

    /// Snapshot of the settings the two pipeline stages run with.
    fn job(&self) -> ConvertJob {
        ConvertJob {
            source_path: self.source_path().to_path_buf(),
            output_path: output_path_for(self.source_path()),
            separator: self.separator(),
            pretty: self.pretty(),
        }
    }
}
