use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Field names taken from the first row of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    fields: Vec<String>,
}

impl Header {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// First field name that appears more than once, if any.
    pub fn first_duplicate(&self) -> Option<&str> {
        self.fields
            .iter()
            .enumerate()
            .find(|(i, name)| self.fields[..*i].contains(name))
            .map(|(_, name)| name.as_str())
    }
}

/// One data row keyed by the shared header.
///
/// Always holds exactly `header.len()` values; built only through
/// [`Record::from_row`] after the length check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    header: Arc<Header>,
    values: Vec<String>,
}

impl Record {
    /// Returns `None` when the row does not have one value per header field.
    pub fn from_row(header: Arc<Header>, values: Vec<String>) -> Option<Self> {
        if values.len() != header.len() {
            return None;
        }
        Some(Self { header, values })
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.header
            .fields()
            .iter()
            .position(|name| name == field)
            .map(|i| self.values[i].as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.header
            .fields()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        f.write_str("}")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Separator {
    #[default]
    Comma,
    Semicolon,
}

impl Separator {
    pub fn as_byte(self) -> u8 {
        match self {
            Separator::Comma => b',',
            Separator::Semicolon => b';',
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Separator::Comma => f.write_str("comma"),
            Separator::Semicolon => f.write_str("semicolon"),
        }
    }
}

/// Everything both pipeline stages need, handed to each by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertJob {
    pub source_path: PathBuf,
    pub output_path: PathBuf,
    pub separator: Separator,
    pub pretty: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadSummary {
    pub rows_read: u64,
    pub rows_skipped: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    pub records_written: u64,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub read: ReadSummary,
    pub write: WriteSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Arc<Header> {
        Arc::new(Header::new(names.iter().map(|s| s.to_string()).collect()))
    }

    #[test]
    fn test_record_requires_matching_length() {
        let h = header(&["name", "age"]);
        assert!(Record::from_row(h.clone(), vec!["carol".to_string()]).is_none());
        let record = Record::from_row(h, vec!["alice".to_string(), "30".to_string()]).unwrap();
        assert_eq!(record.get("name"), Some("alice"));
        assert_eq!(record.get("age"), Some("30"));
        assert_eq!(record.get("email"), None);
    }

    #[test]
    fn test_record_serializes_values_as_strings() {
        let h = header(&["id", "active"]);
        let record = Record::from_row(h, vec!["7".to_string(), "true".to_string()]).unwrap();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, serde_json::json!({"id": "7", "active": "true"}));
    }

    #[test]
    fn test_first_duplicate() {
        assert_eq!(header(&["a", "b", "c"]).first_duplicate(), None);
        assert_eq!(header(&["a", "b", "a"]).first_duplicate(), Some("a"));
    }

    #[test]
    fn test_record_display() {
        let h = header(&["name", "age"]);
        let record = Record::from_row(h, vec!["bob".to_string(), "25".to_string()]).unwrap();
        assert_eq!(record.to_string(), "{name=bob, age=25}");
    }
}
