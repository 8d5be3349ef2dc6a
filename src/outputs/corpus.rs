//! Corpus record writer.
//!
//! [`CorpusWriter`] owns the append-only output stream for the duration of
//! one source's crawl. It is generic over [`AsyncWrite`] so tests can write
//! into an in-memory buffer while production writes the per-language corpus
//! file opened by [`open_corpus_file`].

use crate::models::CorpusRecord;
use std::error::Error;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, instrument};

/// Writes framed corpus records to an append-only text stream.
#[derive(Debug)]
pub struct CorpusWriter<W> {
    sink: W,
    records_written: usize,
}

impl<W: AsyncWrite + Unpin> CorpusWriter<W> {
    /// Wrap an output stream.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            records_written: 0,
        }
    }

    /// Append one record.
    ///
    /// Header lines carry the `# ` comment marker; the optional title and
    /// the paragraphs are written bare, one per line.
    pub async fn write_record(&mut self, record: &CorpusRecord) -> Result<(), Box<dyn Error>> {
        let mut framed = String::new();
        framed.push_str(&format!("# Location: {}\n", record.location));
        framed.push_str(&format!("# Genre: {}\n", record.genre));
        if let Some(ref pubdate) = record.publication_date {
            framed.push_str(&format!("# Publication-Date: {}\n", pubdate));
        }
        if let Some(ref title) = record.title {
            framed.push_str(title);
            framed.push('\n');
        }
        for paragraph in &record.paragraphs {
            framed.push_str(paragraph);
            framed.push('\n');
        }
        self.sink.write_all(framed.as_bytes()).await?;
        self.records_written += 1;
        debug!(location = %record.location, paragraphs = record.paragraphs.len(), "Wrote corpus record");
        Ok(())
    }

    /// Flush the underlying stream and report how many records were written.
    pub async fn finish(mut self) -> Result<usize, Box<dyn Error>> {
        self.sink.flush().await?;
        info!(records = self.records_written, "Corpus output flushed");
        Ok(self.records_written)
    }
}

#[cfg(test)]
impl CorpusWriter<std::io::Cursor<Vec<u8>>> {
    /// Test helper: surrender the buffered output as a UTF-8 string.
    pub(crate) fn into_string(self) -> String {
        String::from_utf8(self.sink.into_inner()).unwrap()
    }
}

/// Open the per-language corpus file for appending, creating the output
/// directory as needed.
///
/// The file lands at `{output_dir}/{language}.txt`.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir, language = %language))]
pub async fn open_corpus_file(
    output_dir: &str,
    language: &str,
) -> Result<CorpusWriter<File>, Box<dyn Error>> {
    fs::create_dir_all(output_dir).await?;
    let path = format!("{}/{}.txt", output_dir.trim_end_matches('/'), language);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .await?;
    info!(%path, "Opened corpus output file");
    Ok(CorpusWriter::new(file))
}
