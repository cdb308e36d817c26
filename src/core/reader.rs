use crate::domain::model::{ConvertJob, Header, ReadSummary, Record, Separator};
use crate::utils::error::{ConvertError, Result, RowError};
use csv::ByteRecord;
use std::fs::File;
use std::io::Read;
use std::sync::Arc;
use tokio::sync::mpsc;

const UTF8_BOM: char = '\u{feff}';

/// Streams [`Record`]s out of delimited text, one row at a time.
///
/// The first row is consumed as the [`Header`] on construction. Rows are
/// read with flexible field counts so that a short or long row surfaces as
/// a [`RowError`] instead of aborting the whole stream. Cells are decoded
/// lossily, so bytes that are not valid UTF-8 become U+FFFD rather than
/// failing the row.
pub struct RecordReader<R: Read> {
    inner: csv::Reader<R>,
    header: Arc<Header>,
    row: ByteRecord,
}

impl<R: Read> RecordReader<R> {
    pub fn from_reader(reader: R, separator: Separator, source_name: &str) -> Result<Self> {
        let mut inner = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(separator.as_byte())
            .from_reader(reader);

        let mut row = ByteRecord::new();
        if !inner.read_byte_record(&mut row)? {
            return Err(ConvertError::MissingHeaderError {
                path: source_name.to_string(),
            });
        }

        let mut fields = decode_cells(&row);
        if let Some(first) = fields.first_mut() {
            if let Some(stripped) = first.strip_prefix(UTF8_BOM) {
                *first = stripped.to_string();
            }
        }

        let header = Header::new(fields);
        if let Some(field) = header.first_duplicate() {
            return Err(ConvertError::DuplicateHeaderError {
                field: field.to_string(),
            });
        }
        tracing::debug!("Header fields: {:?}", header.fields());

        Ok(Self {
            inner,
            header: Arc::new(header),
            row,
        })
    }

    pub fn header(&self) -> &Arc<Header> {
        &self.header
    }

    /// `None` at end of input. Read failures are fatal and returned as `Err`
    /// from the outer result; the inner result carries per-row problems.
    pub fn next_record(&mut self) -> Result<Option<std::result::Result<Record, RowError>>> {
        if !self.inner.read_byte_record(&mut self.row)? {
            return Ok(None);
        }

        let line = self.row.position().map(|p| p.line()).unwrap_or_default();
        let values = decode_cells(&self.row);
        let found = values.len();

        Ok(Some(
            Record::from_row(Arc::clone(&self.header), values).ok_or(RowError::LengthMismatch {
                line,
                expected: self.header.len(),
                found,
            }),
        ))
    }
}

fn decode_cells(row: &ByteRecord) -> Vec<String> {
    row.iter()
        .map(|cell| String::from_utf8_lossy(cell).into_owned())
        .collect()
}

/// Reader stage: parses the source and feeds the handoff.
///
/// Runs on a blocking thread. Dropping `tx` on return closes the handoff,
/// which is how the writer learns the stream has ended.
pub fn read_csv(job: ConvertJob, tx: mpsc::Sender<Record>) -> Result<ReadSummary> {
    let file = File::open(&job.source_path)?;
    let source_name = job.source_path.display().to_string();
    let reader = RecordReader::from_reader(file, job.separator, &source_name)?;
    forward_records(reader, &tx)
}

pub(crate) fn forward_records<R: Read>(
    mut reader: RecordReader<R>,
    tx: &mpsc::Sender<Record>,
) -> Result<ReadSummary> {
    let mut summary = ReadSummary::default();

    while let Some(parsed) = reader.next_record()? {
        match parsed {
            Ok(record) => {
                tracing::info!("{}", record);
                tx.blocking_send(record)
                    .map_err(|_| ConvertError::HandoffClosedError)?;
                summary.rows_read += 1;
            }
            Err(e) => {
                tracing::warn!("{}...Skipping", e);
                summary.rows_skipped += 1;
            }
        }
    }

    tracing::debug!(
        "Reached end of input: {} rows forwarded, {} skipped",
        summary.rows_read,
        summary.rows_skipped
    );
    Ok(summary)
}
