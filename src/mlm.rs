use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::constants::mlm::{CONLLU_TEXT_PREFIX, CONLLU_TRAIN_SUFFIX, SENTENCE_SEPARATOR};
use crate::data::{RawMarcRow, RawNerRow, RawNliRow, RawPawsRow, read_json_lines, read_records};
use crate::errors::PrepError;
use crate::layout::DataLayout;
use crate::tasks::{LingualSetting, Task};
use crate::types::{LanguageCode, Sentence};

/// How sentence pairs are laid out in MLM pretraining text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SentenceLayout {
    /// Premise and hypothesis each on their own line.
    Separate,
    /// One `premise [SEP] hypothesis` line per pair.
    Joined,
}

impl SentenceLayout {
    fn emit(self, first: &str, second: &str, sentences: &mut Vec<Sentence>) {
        match self {
            SentenceLayout::Separate => {
                sentences.push(first.to_string());
                sentences.push(second.to_string());
            }
            SentenceLayout::Joined => {
                sentences.push(format!("{first}{SENTENCE_SEPARATOR}{second}"));
            }
        }
    }
}

fn write_sentence_lines(out_file: &Path, sentences: &[Sentence]) -> Result<(), PrepError> {
    if let Some(parent) = out_file.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(out_file)?);
    for sentence in sentences {
        writeln!(writer, "{sentence}")?;
    }
    writer.flush()?;
    Ok(())
}

fn skip_existing(path: &Path) -> bool {
    if path.is_file() {
        debug!(path = %path.display(), "MLM output exists, skipping");
        return true;
    }
    false
}

/// Emit MLM text from a raw NLI jsonl file, optionally filtered by language.
pub fn write_nli_sentences(
    raw_jsonl: &Path,
    out_file: &Path,
    languages: Option<&[LanguageCode]>,
    layout: SentenceLayout,
) -> Result<(), PrepError> {
    if skip_existing(out_file) {
        return Ok(());
    }
    let rows: Vec<RawNliRow> = read_json_lines(raw_jsonl)?;
    let mut sentences = Vec::new();
    for row in rows {
        let keep = match (languages, &row.language) {
            (None, _) => true,
            (Some(languages), Some(language)) => languages.contains(language),
            (Some(_), None) => false,
        };
        if keep {
            layout.emit(&row.sentence1, &row.sentence2, &mut sentences);
        }
    }
    write_sentence_lines(out_file, &sentences)?;
    info!(lines = sentences.len(), path = %out_file.display(), "wrote NLI MLM text");
    Ok(())
}

/// Emit MLM text from an already-converted record file.
pub fn write_record_sentences(
    records_tsv: &Path,
    out_file: &Path,
    layout: SentenceLayout,
) -> Result<(), PrepError> {
    if skip_existing(out_file) {
        return Ok(());
    }
    let records = read_records(records_tsv)?;
    let mut sentences = Vec::new();
    for record in &records {
        layout.emit(&record.premise, &record.hypothesis, &mut sentences);
    }
    write_sentence_lines(out_file, &sentences)?;
    info!(lines = sentences.len(), path = %out_file.display(), "wrote record MLM text");
    Ok(())
}

/// Emit MLM text from per-language PAWS-X loose-JSON training files.
pub fn write_pawsx_sentences(
    loose_json_files: &[PathBuf],
    out_file: &Path,
    layout: SentenceLayout,
) -> Result<(), PrepError> {
    if skip_existing(out_file) {
        return Ok(());
    }
    let mut sentences = Vec::new();
    for path in loose_json_files {
        let rows: Vec<RawPawsRow> = read_json_lines(path)?;
        for row in rows {
            layout.emit(&row.sentence1, &row.sentence2, &mut sentences);
        }
    }
    write_sentence_lines(out_file, &sentences)?;
    info!(lines = sentences.len(), path = %out_file.display(), "wrote PAWS-X MLM text");
    Ok(())
}

/// Emit MLM text from MARC loose-JSON review rows.
pub fn write_marc_sentences(loose_json: &Path, out_file: &Path) -> Result<(), PrepError> {
    if skip_existing(out_file) {
        return Ok(());
    }
    let rows: Vec<RawMarcRow> = read_json_lines(loose_json)?;
    let sentences: Vec<Sentence> = rows.into_iter().map(|row| row.review_body).collect();
    write_sentence_lines(out_file, &sentences)?;
    info!(lines = sentences.len(), path = %out_file.display(), "wrote MARC MLM text");
    Ok(())
}

/// Emit MLM text from WikiAnn loose-JSON token rows.
pub fn write_ner_sentences(loose_json: &Path, out_file: &Path) -> Result<(), PrepError> {
    if skip_existing(out_file) {
        return Ok(());
    }
    let rows: Vec<RawNerRow> = read_json_lines(loose_json)?;
    let sentences: Vec<Sentence> = rows.into_iter().map(|row| row.tokens.join(" ")).collect();
    write_sentence_lines(out_file, &sentences)?;
    info!(lines = sentences.len(), path = %out_file.display(), "wrote NER MLM text");
    Ok(())
}

/// Emit MLM text from Universal Dependencies treebank roots.
///
/// Each root contributes its first `*train.conllu` file (path-sorted for
/// determinism); the emitted lines are the `# text = ...` metadata values.
pub fn write_pos_sentences(
    treebank_roots: &[PathBuf],
    out_file: &Path,
) -> Result<(), PrepError> {
    if skip_existing(out_file) {
        return Ok(());
    }
    let mut sentences = Vec::new();
    for root in treebank_roots {
        let Some(train_file) = find_conllu_train(root) else {
            return Err(PrepError::Configuration(format!(
                "no {CONLLU_TRAIN_SUFFIX} file under {}",
                root.display()
            )));
        };
        let reader = BufReader::new(File::open(&train_file)?);
        for line in reader.lines() {
            let line = line?;
            if let Some(text) = line.strip_prefix(CONLLU_TEXT_PREFIX) {
                sentences.push(text.to_string());
            }
        }
    }
    write_sentence_lines(out_file, &sentences)?;
    info!(lines = sentences.len(), path = %out_file.display(), "wrote POS MLM text");
    Ok(())
}

fn find_conllu_train(root: &Path) -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .map(|name| name.ends_with(CONLLU_TRAIN_SUFFIX))
                .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();
    candidates.sort();
    candidates.into_iter().next()
}

/// Per-task raw inputs feeding MLM text generation.
#[derive(Clone, Debug)]
pub struct MlmSources {
    /// XNLI dev jsonl (NLI sentences).
    pub xnli_dev: PathBuf,
    /// Universal Dependencies treebank roots (POS sentences).
    pub pos_treebank_roots: Vec<PathBuf>,
    /// Per-language PAWS-X training loose-JSON files.
    pub pawsx_train_json: Vec<PathBuf>,
    /// MARC training loose-JSON file.
    pub marc_train_json: PathBuf,
    /// WikiAnn training loose-JSON file.
    pub ner_train_json: PathBuf,
}

/// Dispatches MLM text generation per task and lingual setting.
pub struct MlmGenerator {
    layout: DataLayout,
    sources: MlmSources,
}

impl MlmGenerator {
    /// Create a generator writing under `layout` from `sources`.
    pub fn new(layout: DataLayout, sources: MlmSources) -> Self {
        Self { layout, sources }
    }

    /// Generate the MLM training text for one task/setting combination.
    ///
    /// Returns the output path (also when generation was skipped because the
    /// file already exists).
    pub fn generate(
        &self,
        task: Task,
        setting: LingualSetting,
        sentence_layout: SentenceLayout,
    ) -> Result<PathBuf, PrepError> {
        let out_file = self.layout.mlm_output(task, setting);
        match task {
            Task::Nli => {
                // The cross setting trains on English text only.
                let english = [LanguageCode::from("en")];
                let languages = match setting {
                    LingualSetting::Cross => Some(&english[..]),
                    LingualSetting::Multi => None,
                };
                write_nli_sentences(&self.sources.xnli_dev, &out_file, languages, sentence_layout)?;
            }
            Task::Pos => {
                write_pos_sentences(&self.sources.pos_treebank_roots, &out_file)?;
            }
            Task::Pawsx => {
                write_pawsx_sentences(&self.sources.pawsx_train_json, &out_file, sentence_layout)?;
            }
            Task::Marc => {
                write_marc_sentences(&self.sources.marc_train_json, &out_file)?;
            }
            Task::Ner => {
                write_ner_sentences(&self.sources.ner_train_json, &out_file)?;
            }
        }
        Ok(out_file)
    }
}
