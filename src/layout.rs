use std::path::{Path, PathBuf};

use crate::constants::layout::{
    COMBINED_EVAL_DIR, FOREIGN_POOL_DIR, FOUR_LANG_EVAL_DIR, LTR_ONLY_DIR, NLI_TEST_FILENAME,
    NLI_TRAIN_FILENAME,
};
use crate::tasks::{LingualSetting, Task};

/// Canonical on-disk layout of the experiments tree.
///
/// All dataset construction and MLM generation resolve their inputs and
/// outputs through this type so path conventions live in one place.
#[derive(Clone, Debug)]
pub struct DataLayout {
    root: PathBuf,
}

impl DataLayout {
    /// Create a layout rooted at `root` (typically `experiments/`).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The experiments root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Task directory, e.g. `experiments/NLI`.
    pub fn task_dir(&self, task: Task) -> PathBuf {
        self.root.join(task.dir_name())
    }

    /// Cross-lingual NLI training set (MNLI train).
    pub fn cross_train(&self) -> PathBuf {
        self.task_dir(Task::Nli).join("cross").join("cross_train.tsv")
    }

    /// Cross-lingual NLI test set (XNLI test).
    pub fn cross_test(&self) -> PathBuf {
        self.task_dir(Task::Nli).join("cross").join("cross_test.tsv")
    }

    /// Multi-lingual NLI training set (MNLI train + XNLI dev).
    pub fn multi_train(&self) -> PathBuf {
        self.task_dir(Task::Nli).join("multi").join("multi_train.tsv")
    }

    /// Multi-lingual NLI test set (copy of the cross-lingual test set).
    pub fn multi_test(&self) -> PathBuf {
        self.task_dir(Task::Nli).join("multi").join("multi_test.tsv")
    }

    /// Per-language NLI training set.
    pub fn language_train(&self, language: &str) -> PathBuf {
        self.task_dir(Task::Nli).join(language).join(NLI_TRAIN_FILENAME)
    }

    /// Per-language NLI test set.
    pub fn language_test(&self, language: &str) -> PathBuf {
        self.task_dir(Task::Nli).join(language).join(NLI_TEST_FILENAME)
    }

    /// Pooled foreign-language NLI training set.
    pub fn foreign_pool_train(&self) -> PathBuf {
        self.task_dir(Task::Nli)
            .join(FOREIGN_POOL_DIR)
            .join(NLI_TRAIN_FILENAME)
    }

    /// Combined 15-language evaluation set.
    pub fn combined_eval(&self) -> PathBuf {
        self.task_dir(Task::Nli)
            .join(COMBINED_EVAL_DIR)
            .join(NLI_TEST_FILENAME)
    }

    /// Combined en/fr/de/es evaluation set.
    pub fn four_lang_eval(&self) -> PathBuf {
        self.task_dir(Task::Nli)
            .join(FOUR_LANG_EVAL_DIR)
            .join(NLI_TEST_FILENAME)
    }

    /// Left-to-right-only training set (RTL languages excluded).
    pub fn ltr_only_train(&self) -> PathBuf {
        self.task_dir(Task::Nli)
            .join(LTR_ONLY_DIR)
            .join(format!("{LTR_ONLY_DIR}_train.tsv"))
    }

    /// Left-to-right-only test set (RTL languages excluded).
    pub fn ltr_only_test(&self) -> PathBuf {
        self.task_dir(Task::Nli)
            .join(LTR_ONLY_DIR)
            .join(format!("{LTR_ONLY_DIR}_test.tsv"))
    }

    /// MLM pretraining text output for a task/setting combination.
    pub fn mlm_output(&self, task: Task, setting: LingualSetting) -> PathBuf {
        self.root
            .join("MLM")
            .join(task.dir_name())
            .join(setting.dir_name())
            .join(format!("{}_train.txt", task.file_stem()))
    }
}
