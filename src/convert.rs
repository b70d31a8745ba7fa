use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::constants::languages::{
    EVAL_SUBSET_LANGUAGES, LTR_EXCLUDED_LANGUAGES, XNLI_LANGUAGES,
};
use crate::data::{RawNliRow, Record, read_json_lines, read_records, write_records};
use crate::errors::PrepError;
use crate::layout::DataLayout;
use crate::types::LanguageCode;

/// Converts raw line-delimited JSON NLI rows into normalized record files.
///
/// Filters are applied per row: an include list keeps only matching
/// languages, an exclude list drops matching ones. Rows without a `language`
/// field (MNLI) never match an include list and always pass an exclude list.
#[derive(Clone, Debug, Default)]
pub struct RawToTsv {
    languages: Option<Vec<LanguageCode>>,
    excluded_languages: Option<Vec<LanguageCode>>,
}

impl RawToTsv {
    /// Create a converter with no language filtering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only rows whose language is in `languages`.
    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<LanguageCode>,
    {
        self.languages = Some(languages.into_iter().map(Into::into).collect());
        self
    }

    /// Drop rows whose language is in `languages`.
    pub fn with_excluded_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<LanguageCode>,
    {
        self.excluded_languages = Some(languages.into_iter().map(Into::into).collect());
        self
    }

    fn keeps(&self, row: &RawNliRow) -> bool {
        let included = match (&self.languages, &row.language) {
            (None, _) => true,
            (Some(languages), Some(language)) => languages.contains(language),
            (Some(_), None) => false,
        };
        let excluded = match (&self.excluded_languages, &row.language) {
            (Some(languages), Some(language)) => languages.contains(language),
            _ => false,
        };
        included && !excluded
    }

    /// Convert raw jsonl files into one record file, returning the row count.
    ///
    /// Record ids are the raw input line indices: the counter advances for
    /// every raw row, filtered or kept, and continues across input files.
    pub fn convert(&self, in_files: &[PathBuf], out_file: &Path) -> Result<usize, PrepError> {
        let mut records = Vec::new();
        let mut line_no = 0usize;
        for in_file in in_files {
            let rows: Vec<RawNliRow> = read_json_lines(in_file)?;
            for row in rows {
                if self.keeps(&row) {
                    records.push(Record {
                        id: line_no.to_string(),
                        label: row.gold_label,
                        premise: row.sentence1,
                        hypothesis: row.sentence2,
                    });
                }
                line_no += 1;
            }
        }
        write_records(out_file, &records)?;
        debug!(rows = records.len(), path = %out_file.display(), "converted raw rows");
        Ok(records.len())
    }
}

/// Concatenate record files into one, in argument order.
pub fn combine_datasets(in_files: &[PathBuf], out_file: &Path) -> Result<usize, PrepError> {
    let mut records = Vec::new();
    for in_file in in_files {
        records.extend(read_records(in_file)?);
    }
    write_records(out_file, &records)?;
    Ok(records.len())
}

/// Locations of the raw NLI corpus releases.
#[derive(Clone, Debug)]
pub struct RawNliPaths {
    /// MultiNLI training set (`multinli_1.0_train.jsonl`).
    pub mnli_train: PathBuf,
    /// XNLI development set (`xnli.dev.jsonl`).
    pub xnli_dev: PathBuf,
    /// XNLI test set (`xnli.test.jsonl`).
    pub xnli_test: PathBuf,
}

impl RawNliPaths {
    /// Standard filenames under a raw-data directory.
    pub fn under(raw_root: impl AsRef<Path>) -> Self {
        let raw_root = raw_root.as_ref();
        Self {
            mnli_train: raw_root.join("multinli_1.0_train.jsonl"),
            xnli_dev: raw_root.join("xnli.dev.jsonl"),
            xnli_test: raw_root.join("xnli.test.jsonl"),
        }
    }
}

/// Builds the cross-/multi-lingual NLI dataset family from raw corpora.
///
/// Every build step is an idempotent skip when its output file already
/// exists, so partially generated trees resume where they left off.
pub struct NliDatasetBuilder {
    layout: DataLayout,
    raw: RawNliPaths,
}

/// Which split of the raw corpus feeds per-language dataset construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitKind {
    /// Training data (drawn from the XNLI dev set).
    Train,
    /// Test data (drawn from the XNLI test set).
    Test,
}

impl NliDatasetBuilder {
    /// Create a builder over `layout` reading raw corpora from `raw`.
    pub fn new(layout: DataLayout, raw: RawNliPaths) -> Self {
        Self { layout, raw }
    }

    fn skip_existing(path: &Path) -> bool {
        if path.is_file() {
            debug!(path = %path.display(), "output exists, skipping");
            return true;
        }
        false
    }

    /// Build the main cross-/multi-lingual train and test sets.
    pub fn build_main(&self) -> Result<(), PrepError> {
        let converter = RawToTsv::new();
        let cross_train = self.layout.cross_train();
        if !Self::skip_existing(&cross_train) {
            converter.convert(std::slice::from_ref(&self.raw.mnli_train), &cross_train)?;
            info!(path = %cross_train.display(), "built cross-lingual training set");
        }
        let cross_test = self.layout.cross_test();
        if !Self::skip_existing(&cross_test) {
            converter.convert(std::slice::from_ref(&self.raw.xnli_test), &cross_test)?;
            info!(path = %cross_test.display(), "built cross-lingual test set");
        }
        let multi_train = self.layout.multi_train();
        if !Self::skip_existing(&multi_train) {
            converter.convert(
                &[self.raw.mnli_train.clone(), self.raw.xnli_dev.clone()],
                &multi_train,
            )?;
            info!(path = %multi_train.display(), "built multi-lingual training set");
        }
        let multi_test = self.layout.multi_test();
        if !Self::skip_existing(&multi_test) {
            if let Some(parent) = multi_test.parent() {
                fs::create_dir_all(parent)?;
            }
            // The multi-lingual test set is the cross-lingual one verbatim.
            fs::copy(&cross_test, &multi_test)?;
            info!(path = %multi_test.display(), "built multi-lingual test set");
        }
        Ok(())
    }

    /// Build per-language train or test sets for `languages`.
    pub fn build_per_language(
        &self,
        languages: &[LanguageCode],
        split: SplitKind,
    ) -> Result<Vec<PathBuf>, PrepError> {
        let source = match split {
            SplitKind::Train => &self.raw.xnli_dev,
            SplitKind::Test => &self.raw.xnli_test,
        };
        let mut outputs = Vec::with_capacity(languages.len());
        for language in languages {
            let out_file = match split {
                SplitKind::Train => self.layout.language_train(language),
                SplitKind::Test => self.layout.language_test(language),
            };
            if !Self::skip_existing(&out_file) {
                let converter = RawToTsv::new().with_languages([language.clone()]);
                converter.convert(std::slice::from_ref(source), &out_file)?;
                info!(language = %language, path = %out_file.display(), "built per-language dataset");
            }
            outputs.push(out_file);
        }
        Ok(outputs)
    }

    /// Pool per-language training sets for every non-English XNLI language
    /// into the foreign training corpus.
    pub fn build_foreign_pool(&self) -> Result<PathBuf, PrepError> {
        let languages: Vec<LanguageCode> = XNLI_LANGUAGES
            .iter()
            .filter(|lang| **lang != "en")
            .map(|lang| lang.to_string())
            .collect();
        let per_language = self.build_per_language(&languages, SplitKind::Train)?;
        let out_file = self.layout.foreign_pool_train();
        if !Self::skip_existing(&out_file) {
            let rows = combine_datasets(&per_language, &out_file)?;
            info!(rows, path = %out_file.display(), "built pooled foreign training set");
        }
        Ok(out_file)
    }

    /// Build the combined 15-language and 4-language evaluation sets.
    pub fn build_combined_eval(&self) -> Result<(), PrepError> {
        let languages: Vec<LanguageCode> =
            XNLI_LANGUAGES.iter().map(|lang| lang.to_string()).collect();
        let per_language = self.build_per_language(&languages, SplitKind::Test)?;
        let combined = self.layout.combined_eval();
        if !Self::skip_existing(&combined) {
            combine_datasets(&per_language, &combined)?;
            info!(path = %combined.display(), "built combined evaluation set");
        }
        let subset: Vec<PathBuf> = languages
            .iter()
            .zip(&per_language)
            .filter(|(lang, _)| EVAL_SUBSET_LANGUAGES.contains(&lang.as_str()))
            .map(|(_, path)| path.clone())
            .collect();
        let four_lang = self.layout.four_lang_eval();
        if !Self::skip_existing(&four_lang) {
            combine_datasets(&subset, &four_lang)?;
            info!(path = %four_lang.display(), "built 4-language evaluation set");
        }
        Ok(())
    }

    /// Build the ltr-only variant excluding right-to-left languages.
    pub fn build_ltr_only(&self) -> Result<(), PrepError> {
        let converter = RawToTsv::new().with_excluded_languages(
            LTR_EXCLUDED_LANGUAGES.iter().map(|lang| lang.to_string()),
        );
        let train = self.layout.ltr_only_train();
        if !Self::skip_existing(&train) {
            converter.convert(
                &[self.raw.mnli_train.clone(), self.raw.xnli_dev.clone()],
                &train,
            )?;
            info!(path = %train.display(), "built ltr-only training set");
        }
        let test = self.layout.ltr_only_test();
        if !Self::skip_existing(&test) {
            converter.convert(std::slice::from_ref(&self.raw.xnli_test), &test)?;
            info!(path = %test.display(), "built ltr-only test set");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(language: Option<&str>) -> RawNliRow {
        RawNliRow {
            language: language.map(|lang| lang.to_string()),
            gold_label: "neutral".into(),
            sentence1: "a".into(),
            sentence2: "b".into(),
        }
    }

    #[test]
    fn include_filter_drops_unlisted_and_unlabeled_rows() {
        let converter = RawToTsv::new().with_languages(["fr"]);
        assert!(converter.keeps(&row(Some("fr"))));
        assert!(!converter.keeps(&row(Some("de"))));
        assert!(!converter.keeps(&row(None)));
    }

    #[test]
    fn exclude_filter_passes_unlabeled_rows() {
        let converter = RawToTsv::new().with_excluded_languages(["ar", "ur", "tr"]);
        assert!(!converter.keeps(&row(Some("ar"))));
        assert!(converter.keeps(&row(Some("fr"))));
        assert!(converter.keeps(&row(None)));
    }
}
