#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Command-line application entry points.
pub mod app;
/// Centralized constants used across conversion, subsampling, and layout.
pub mod constants;
/// Raw corpus row conversion into normalized record files.
pub mod convert;
/// Record and raw-row types plus TSV/JSON readers and writers.
pub mod data;
/// Canonical experiment directory layout helpers.
pub mod layout;
/// Masked-language-model pretraining text generation.
pub mod mlm;
/// Trainable layer/head selection for probing and fine-tuning.
pub mod probe;
/// Deterministic RNG and seed derivation.
pub mod rng;
/// Deterministic subsample-and-combine over record files.
pub mod subsample;
/// Experiment task and lingual-setting axes.
pub mod tasks;
/// Shared type aliases.
pub mod types;

mod errors;

pub use convert::{NliDatasetBuilder, RawNliPaths, RawToTsv, SplitKind, combine_datasets};
pub use data::{Record, read_records, write_records};
pub use errors::PrepError;
pub use layout::DataLayout;
pub use mlm::{MlmGenerator, MlmSources, SentenceLayout};
pub use probe::{EncoderArch, FreezePlan, ProbeMode, TrainRegime};
pub use rng::{DeterministicRng, seed_for_index};
pub use subsample::SubsampleCombiner;
pub use tasks::{LingualSetting, Task};
pub use types::{FractionTag, Label, LanguageCode, Sentence};
