use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::constants::records::DELIMITER;
use crate::errors::PrepError;
use crate::types::{Label, LanguageCode, RecordIndex};

/// Normalized classification example, persisted as one tab-separated line.
///
/// Field order on disk is fixed: `id`, `label`, `premise`, `hypothesis`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Raw input line index assigned at conversion time.
    pub id: RecordIndex,
    /// Gold label, carried through unchanged.
    pub label: Label,
    /// First sentence.
    pub premise: String,
    /// Second sentence.
    pub hypothesis: String,
}

/// Raw NLI corpus row as found in the MNLI/XNLI jsonl releases.
///
/// MNLI rows carry no `language` field; filters treat that as "no language".
#[derive(Clone, Debug, Deserialize)]
pub struct RawNliRow {
    /// Language code, absent for monolingual corpora.
    #[serde(default)]
    pub language: Option<LanguageCode>,
    /// Gold label.
    pub gold_label: Label,
    /// Premise sentence.
    pub sentence1: String,
    /// Hypothesis sentence.
    pub sentence2: String,
}

/// Raw PAWS-X corpus row.
#[derive(Clone, Debug, Deserialize)]
pub struct RawPawsRow {
    /// First sentence of the paraphrase pair.
    pub sentence1: String,
    /// Second sentence of the paraphrase pair.
    pub sentence2: String,
}

/// Raw MARC review row.
#[derive(Clone, Debug, Deserialize)]
pub struct RawMarcRow {
    /// Review body text.
    pub review_body: String,
}

/// Raw WikiAnn NER row.
#[derive(Clone, Debug, Deserialize)]
pub struct RawNerRow {
    /// Whitespace-separable surface tokens.
    pub tokens: Vec<String>,
}

/// Read all records from a tab-separated record file.
///
/// Parsing is deliberately permissive: rows with a wrong field count produce
/// misaligned records (missing fields become empty strings, extras are
/// dropped) rather than an error. Regenerating previously written outputs
/// with stricter parsing would silently diverge from existing files, so the
/// historical behavior is kept.
pub fn read_records(path: &Path) -> Result<Vec<Record>, PrepError> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .from_reader(file);
    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let field = |idx: usize| row.get(idx).unwrap_or("").to_string();
        records.push(Record {
            id: field(0),
            label: field(1),
            premise: field(2),
            hypothesis: field(3),
        });
    }
    Ok(records)
}

/// Write records as tab-separated lines, creating parent directories.
pub fn write_records<'a, I>(path: &Path, records: I) -> Result<(), PrepError>
where
    I: IntoIterator<Item = &'a Record>,
{
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .from_path(path)?;
    for record in records {
        writer.write_record([
            record.id.as_str(),
            record.label.as_str(),
            record.premise.as_str(),
            record.hypothesis.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Read one deserializable JSON value per line from `path`.
///
/// Blank lines are skipped; any malformed line is a decode error.
pub fn read_json_lines<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, PrepError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut rows = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        rows.push(serde_json::from_str(&line)?);
    }
    Ok(rows)
}
