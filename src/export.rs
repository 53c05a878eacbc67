//! CSV export of the answer history.
//!
//! Fields are quoted only when they contain a delimiter, quote or newline,
//! so plain rows come out exactly as a bare comma join would.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, Terminator, WriterBuilder};
use thiserror::Error;
use tracing::info;

use crate::models::{AnsweredRecord, QuizSet};

pub const EXPORT_FILE_NAME: &str = "quiz_resultados.csv";
pub const EXPORT_MIME_TYPE: &str = "text/csv";

const HEADER: [&str; 3] = ["Question", "Correct Answers", "Selected Answers"];
const VALUE_SEPARATOR: &str = "; ";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("there are no answers to export yet")]
    NothingToExport,

    #[error("failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("exported CSV is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Encodes the header plus one row per record, without a trailing newline.
pub fn encode_csv(history: &[AnsweredRecord], quiz: QuizSet<'_>) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for record in history {
        let (correct, selected) = match quiz.question(record.question_index) {
            Some(question) => (
                join_options(question.option_texts(&record.correct)),
                join_options(question.option_texts(&record.selected)),
            ),
            None => (String::new(), String::new()),
        };
        writer.write_record([record.question_text.as_str(), correct.as_str(), selected.as_str()])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))?;
    let mut text = String::from_utf8(bytes)?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// Writes [`EXPORT_FILE_NAME`] into `dir`, replacing any earlier export.
///
/// The file is closed before this returns.
pub fn write_csv(
    dir: &Path,
    history: &[AnsweredRecord],
    quiz: QuizSet<'_>,
) -> Result<PathBuf, ExportError> {
    if history.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    let content = encode_csv(history, quiz)?;
    let path = dir.join(EXPORT_FILE_NAME);
    let io_error = |source: io::Error| ExportError::Io {
        path: path.clone(),
        source,
    };

    fs::create_dir_all(dir).map_err(io_error)?;
    {
        let mut file = BufWriter::new(File::create(&path).map_err(io_error)?);
        file.write_all(content.as_bytes()).map_err(io_error)?;
        file.flush().map_err(io_error)?;
    }

    info!(
        path = %path.display(),
        rows = history.len(),
        mime = EXPORT_MIME_TYPE,
        "exported quiz results"
    );
    Ok(path)
}

fn join_options<'a>(texts: impl Iterator<Item = &'a str>) -> String {
    texts.collect::<Vec<_>>().join(VALUE_SEPARATOR)
}
