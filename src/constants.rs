/// Constants used by deterministic seed derivation.
pub mod seeds {
    /// Base seed assigned to the first fraction in a fraction list.
    pub const DEFAULT_BASE_SEED: u64 = 1000;
    /// Seed increment between consecutive fraction positions.
    pub const DEFAULT_SEED_STRIDE: u64 = 100;
}

/// Constants used by the on-disk experiment layout.
pub mod layout {
    /// Prefix for combined-output directories (`foreign_<p>_2`).
    pub const FOREIGN_DIR_PREFIX: &str = "foreign_";
    /// Suffix for combined-output directories (`foreign_<p>_2`).
    pub const FOREIGN_DIR_SUFFIX: &str = "_2";
    /// Training-set filename inside NLI dataset directories.
    pub const NLI_TRAIN_FILENAME: &str = "nli_train.tsv";
    /// Test-set filename inside NLI dataset directories.
    pub const NLI_TEST_FILENAME: &str = "nli_test.tsv";
    /// Directory holding the pooled foreign training corpus.
    pub const FOREIGN_POOL_DIR: &str = "foreign";
    /// Directory holding the 15-language combined evaluation set.
    pub const COMBINED_EVAL_DIR: &str = "combined";
    /// Directory holding the en/fr/de/es evaluation subset.
    pub const FOUR_LANG_EVAL_DIR: &str = "4lang_combined";
    /// Directory holding the left-to-right-only dataset variant.
    pub const LTR_ONLY_DIR: &str = "multi-ltr";
}

/// Canonical language tables for the multilingual corpora.
pub mod languages {
    /// The 15 XNLI evaluation languages.
    pub const XNLI_LANGUAGES: [&str; 15] = [
        "ar", "bg", "de", "el", "en", "es", "fr", "hi", "ru", "sw", "th", "tr", "ur", "vi", "zh",
    ];
    /// Languages in the 4-language evaluation subset.
    pub const EVAL_SUBSET_LANGUAGES: [&str; 4] = ["en", "fr", "de", "es"];
    /// Right-to-left (or otherwise excluded) languages dropped from the
    /// ltr-only dataset variant.
    pub const LTR_EXCLUDED_LANGUAGES: [&str; 3] = ["ar", "ur", "tr"];
}

/// Constants used by record conversion and the TSV wire format.
pub mod records {
    /// Tab-separated field order for converted record files.
    pub const FIELD_ORDER: [&str; 4] = ["id", "label", "premise", "hypothesis"];
    /// Field delimiter for record files.
    pub const DELIMITER: u8 = b'\t';
}

/// Constants used by MLM pretraining text generation.
pub mod mlm {
    /// Separator inserted between premise and hypothesis in joined layout.
    pub const SENTENCE_SEPARATOR: &str = " [SEP] ";
    /// CoNLL-U metadata prefix carrying the raw sentence text.
    pub const CONLLU_TEXT_PREFIX: &str = "# text = ";
    /// Filename suffix of CoNLL-U training files discovered per treebank.
    pub const CONLLU_TRAIN_SUFFIX: &str = "train.conllu";
}
