use crate::utils::error::{ConvertError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let display = path.to_string_lossy();
    if display.is_empty() {
        return Err(ConvertError::MissingArgumentError {
            field: field_name.to_string(),
        });
    }

    if display.contains('\0') {
        return Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: display.into_owned(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extension(field_name: &str, path: &Path, expected: &str) -> Result<()> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(extension) if extension == expected => Ok(()),
        Some(extension) => Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.display().to_string(),
            reason: format!(
                "Unsupported file extension: {}. Expected: {}",
                extension, expected
            ),
        }),
        None => Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.display().to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(ConvertError::FileNotFoundError {
            path: path.display().to_string(),
        });
    }
    Ok(())
}
