use crate::domain::model::{ConvertJob, Record, WriteSummary};
use crate::utils::error::Result;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};
use tokio::sync::{mpsc, oneshot};

const INDENT: &[u8] = b"  ";

/// Incrementally writes a JSON array, one element per [`Record`].
///
/// `[` goes out on [`open`](Self::open), each [`write`](Self::write) adds
/// the separator and one object, and [`close`](Self::close) writes `]` and
/// shuts the sink down. Nothing but the element being encoded is held in
/// memory.
pub struct JsonArrayWriter<W> {
    sink: W,
    pretty: bool,
    first: bool,
    written: u64,
    buf: Vec<u8>,
}

impl<W: AsyncWrite + Unpin> JsonArrayWriter<W> {
    pub async fn open(mut sink: W, pretty: bool) -> Result<Self> {
        sink.write_all(b"[").await?;
        Ok(Self {
            sink,
            pretty,
            first: true,
            written: 0,
            buf: Vec::new(),
        })
    }

    pub async fn write(&mut self, record: &Record) -> Result<()> {
        self.buf.clear();
        if !self.first {
            self.buf.push(b',');
        }
        if self.pretty {
            self.buf.push(b'\n');
            encode_pretty(&mut self.buf, record)?;
        } else {
            serde_json::to_writer(&mut self.buf, record)?;
        }

        self.sink.write_all(&self.buf).await?;
        self.first = false;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    /// Writes the closing bracket, flushes and shuts down the sink.
    pub async fn close(mut self) -> Result<W> {
        if self.pretty && !self.first {
            self.sink.write_all(b"\n").await?;
        }
        self.sink.write_all(b"]").await?;
        if self.pretty {
            self.sink.write_all(b"\n").await?;
        }
        self.sink.flush().await?;
        self.sink.shutdown().await?;
        Ok(self.sink)
    }
}

// Objects are pretty-printed with a two-space indent, then every line is
// shifted by one more level so they nest under the array bracket.
fn encode_pretty(out: &mut Vec<u8>, record: &Record) -> Result<()> {
    let mut object = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut object, PrettyFormatter::with_indent(INDENT));
    record.serialize(&mut serializer)?;

    for (i, line) in object.split(|b| *b == b'\n').enumerate() {
        if i > 0 {
            out.push(b'\n');
        }
        out.extend_from_slice(INDENT);
        out.extend_from_slice(line);
    }
    Ok(())
}

/// Drains the handoff into `writer` in arrival order until the reader
/// closes it.
pub async fn drain_records<W: AsyncWrite + Unpin>(
    writer: &mut JsonArrayWriter<W>,
    rx: &mut mpsc::Receiver<Record>,
) -> Result<()> {
    while let Some(record) = rx.recv().await {
        writer.write(&record).await?;
    }
    Ok(())
}

/// Writer stage: owns the output file for the whole run and reports on
/// `done` once the array is closed.
pub async fn write_json(
    job: ConvertJob,
    mut rx: mpsc::Receiver<Record>,
    done: oneshot::Sender<WriteSummary>,
) -> Result<WriteSummary> {
    let file = File::create(&job.output_path).await?;
    tracing::info!("Writing to JSON file {}", job.output_path.display());

    let mut writer = JsonArrayWriter::open(BufWriter::new(file), job.pretty).await?;
    drain_records(&mut writer, &mut rx).await?;

    let records_written = writer.written();
    writer.close().await?;
    tracing::info!("Completed");

    let summary = WriteSummary {
        records_written,
        output_path: job.output_path,
    };
    if done.send(summary.clone()).is_err() {
        tracing::debug!("Completion receiver dropped before the writer finished");
    }
    Ok(summary)
}
