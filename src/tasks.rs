use clap::ValueEnum;

/// Downstream task whose corpus feeds dataset construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum Task {
    /// Natural language inference (MNLI/XNLI).
    Nli,
    /// Part-of-speech tagging (Universal Dependencies).
    Pos,
    /// Paraphrase identification (PAWS-X).
    Pawsx,
    /// Review rating classification (MARC).
    Marc,
    /// Named entity recognition (WikiAnn).
    Ner,
}

impl Task {
    /// Upper-case directory name under the experiments root.
    pub fn dir_name(self) -> &'static str {
        match self {
            Task::Nli => "NLI",
            Task::Pos => "POS",
            Task::Pawsx => "PAWSX",
            Task::Marc => "MARC",
            Task::Ner => "NER",
        }
    }

    /// Lower-case stem used in dataset filenames (`nli_train.tsv`).
    pub fn file_stem(self) -> &'static str {
        match self {
            Task::Nli => "nli",
            Task::Pos => "pos",
            Task::Pawsx => "pawsx",
            Task::Marc => "marc",
            Task::Ner => "ner",
        }
    }

    /// Number of classification labels for the fine-tuning head.
    pub fn num_labels(self) -> usize {
        match self {
            Task::Nli => 3,
            Task::Pos => 17,
            Task::Pawsx => 2,
            Task::Marc => 5,
            Task::Ner => 7,
        }
    }

    /// All tasks in canonical order.
    pub fn all() -> [Task; 5] {
        [Task::Nli, Task::Pos, Task::Pawsx, Task::Marc, Task::Ner]
    }
}

/// Which raw sources feed dataset construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum LingualSetting {
    /// English-only training data, multilingual evaluation.
    Cross,
    /// Multilingual training data.
    Multi,
}

impl LingualSetting {
    /// Lower-case directory name under a task directory.
    pub fn dir_name(self) -> &'static str {
        match self {
            LingualSetting::Cross => "cross",
            LingualSetting::Multi => "multi",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_names_are_consistent() {
        for task in Task::all() {
            assert_eq!(task.dir_name().to_lowercase(), task.file_stem());
        }
    }
}
