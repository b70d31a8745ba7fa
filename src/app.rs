use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use crate::constants::languages::EVAL_SUBSET_LANGUAGES;
use crate::convert::{NliDatasetBuilder, RawNliPaths};
use crate::errors::PrepError;
use crate::layout::DataLayout;
use crate::mlm::{MlmGenerator, MlmSources, SentenceLayout};
use crate::probe::{EncoderArch, ProbeMode, TrainRegime};
use crate::subsample::SubsampleCombiner;
use crate::tasks::{LingualSetting, Task};

/// Dataset preparation for multilingual probing and fine-tuning experiments.
#[derive(Debug, Parser)]
#[command(name = "lingprep", disable_help_subcommand = true)]
pub struct Cli {
    /// Experiments root directory.
    #[arg(long, global = true, default_value = "experiments")]
    pub experiments_root: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build the cross-/multi-lingual NLI dataset family from raw corpora.
    Nli {
        /// Directory holding the raw MNLI/XNLI jsonl releases.
        #[arg(long)]
        raw_root: Option<PathBuf>,
        /// Also build the combined 15-language and 4-language eval sets.
        #[arg(long)]
        with_eval: bool,
        /// Also build the ltr-only variant (RTL languages excluded).
        #[arg(long)]
        with_ltr: bool,
        /// Also build per-language sets and the pooled foreign corpus.
        #[arg(long)]
        with_foreign_pool: bool,
    },
    /// Generate masked-language-model pretraining text.
    Mlm {
        /// Task to generate for; omit to run every task.
        #[arg(long, value_enum)]
        task: Option<Task>,
        /// Lingual setting.
        #[arg(long, value_enum, default_value_t = LingualSetting::Multi)]
        setting: LingualSetting,
        /// Emit premise and hypothesis on separate lines instead of joined.
        #[arg(long)]
        separate: bool,
        /// Directory holding the raw MNLI/XNLI jsonl releases.
        #[arg(long)]
        raw_root: Option<PathBuf>,
    },
    /// Subsample the foreign corpus at several fractions and combine each
    /// with the in-domain training set.
    Subsample {
        /// In-domain record file included in full.
        #[arg(long)]
        in_domain: Option<PathBuf>,
        /// Foreign record file to subsample.
        #[arg(long)]
        foreign: Option<PathBuf>,
        /// Sampling fractions in (0, 1], in seed order.
        #[arg(long, value_delimiter = ',', default_values_t = [0.2, 0.4, 0.6, 0.8])]
        fractions: Vec<f64>,
        /// Output root for `foreign_<p>_2` directories.
        #[arg(long)]
        out_root: Option<PathBuf>,
        /// Base seed for the per-fraction seed derivation.
        #[arg(long, default_value_t = crate::constants::seeds::DEFAULT_BASE_SEED)]
        base_seed: u64,
        /// Seed stride for the per-fraction seed derivation.
        #[arg(long, default_value_t = crate::constants::seeds::DEFAULT_SEED_STRIDE)]
        seed_stride: u64,
    },
    /// Print the trainable layer/head selection for a probing run.
    ProbePlan {
        /// Encoder preset.
        #[arg(long, value_enum, default_value_t = ModelArg::MbertBase)]
        model: ModelArg,
        /// Probing axis.
        #[arg(long, value_enum, default_value_t = ModeArg::LayerWise)]
        mode: ModeArg,
        /// Encoder layer to probe (0-based).
        #[arg(long, default_value_t = 0)]
        layer: usize,
        /// Attention head to probe (0-based, head-wise mode only).
        #[arg(long)]
        head: Option<usize>,
        /// Training regime.
        #[arg(long, value_enum, default_value_t = RegimeArg::Probing)]
        regime: RegimeArg,
    },
}

/// Encoder presets selectable on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ModelArg {
    /// bert-base-multilingual-cased.
    MbertBase,
    /// xlm-roberta-base.
    XlmrBase,
    /// xlm-roberta-large.
    XlmrLarge,
}

impl From<ModelArg> for EncoderArch {
    fn from(value: ModelArg) -> Self {
        match value {
            ModelArg::MbertBase => EncoderArch::mbert_base(),
            ModelArg::XlmrBase => EncoderArch::xlmr_base(),
            ModelArg::XlmrLarge => EncoderArch::xlmr_large(),
        }
    }
}

/// Probing axes selectable on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ModeArg {
    /// Sweep encoder layers.
    LayerWise,
    /// Sweep attention heads.
    HeadWise,
}

/// Training regimes selectable on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum RegimeArg {
    /// Frozen encoder, trainable classifier.
    Probing,
    /// Selected encoder parameters train.
    Finetune,
}

impl From<RegimeArg> for TrainRegime {
    fn from(value: RegimeArg) -> Self {
        match value {
            RegimeArg::Probing => TrainRegime::Probing,
            RegimeArg::Finetune => TrainRegime::Finetune,
        }
    }
}

/// Run a parsed command line to completion.
pub fn run(cli: Cli) -> Result<(), PrepError> {
    let layout = DataLayout::new(&cli.experiments_root);
    match cli.command {
        Command::Nli {
            raw_root,
            with_eval,
            with_ltr,
            with_foreign_pool,
        } => {
            let raw_root =
                raw_root.unwrap_or_else(|| layout.task_dir(Task::Nli).join("data_raw"));
            let builder = NliDatasetBuilder::new(layout, RawNliPaths::under(raw_root));
            builder.build_main()?;
            if with_foreign_pool {
                builder.build_foreign_pool()?;
            }
            if with_eval {
                builder.build_combined_eval()?;
            }
            if with_ltr {
                builder.build_ltr_only()?;
            }
            Ok(())
        }
        Command::Mlm {
            task,
            setting,
            separate,
            raw_root,
        } => {
            let raw_root =
                raw_root.unwrap_or_else(|| layout.task_dir(Task::Nli).join("data_raw"));
            let sources = default_mlm_sources(&layout, setting, &raw_root);
            let sentence_layout = if separate {
                SentenceLayout::Separate
            } else {
                SentenceLayout::Joined
            };
            let generator = MlmGenerator::new(layout, sources);
            let tasks = match task {
                Some(task) => vec![task],
                None => Task::all().to_vec(),
            };
            for task in tasks {
                let out = generator.generate(task, setting, sentence_layout)?;
                info!(task = ?task, path = %out.display(), "MLM text ready");
            }
            Ok(())
        }
        Command::Subsample {
            in_domain,
            foreign,
            fractions,
            out_root,
            base_seed,
            seed_stride,
        } => {
            let in_domain = in_domain.unwrap_or_else(|| layout.cross_train());
            let foreign = foreign.unwrap_or_else(|| layout.foreign_pool_train());
            let out_root = out_root.unwrap_or_else(|| layout.task_dir(Task::Nli));
            let combiner = SubsampleCombiner::new(out_root)
                .with_base_seed(base_seed)
                .with_seed_stride(seed_stride);
            let outputs = combiner.combine(&in_domain, &foreign, &fractions)?;
            for (tag, path) in &outputs {
                println!("{tag}\t{}", path.display());
            }
            Ok(())
        }
        Command::ProbePlan {
            model,
            mode,
            layer,
            head,
            regime,
        } => {
            let arch: EncoderArch = model.into();
            let mode = match mode {
                ModeArg::LayerWise => ProbeMode::LayerWise { layer },
                ModeArg::HeadWise => ProbeMode::HeadWise {
                    layer,
                    head: head.ok_or_else(|| {
                        PrepError::Configuration("--head is required in head-wise mode".into())
                    })?,
                },
            };
            let plan = arch.freeze_plan(mode, regime.into())?;
            println!("representation layer: {}", plan.representation_layer);
            println!("trainable layers: {:?}", plan.trainable_layers);
            println!(
                "active heads: {}/{}",
                plan.active_head_count(),
                arch.encoder_layers * arch.attention_heads
            );
            println!("train embeddings: {}", plan.train_embeddings);
            println!("train classifier: {}", plan.train_classifier);
            Ok(())
        }
    }
}

fn default_mlm_sources(
    layout: &DataLayout,
    setting: LingualSetting,
    raw_root: &std::path::Path,
) -> MlmSources {
    let pos_data = layout.task_dir(Task::Pos).join("data");
    MlmSources {
        xnli_dev: raw_root.join("xnli.dev.jsonl"),
        pos_treebank_roots: vec![
            pos_data.join("en/UD_English-EWT"),
            pos_data.join("fr/UD_French-GSD"),
            pos_data.join("de/UD_German-GSD"),
            pos_data.join("es/UD_Spanish-AnCora"),
        ],
        pawsx_train_json: EVAL_SUBSET_LANGUAGES
            .iter()
            .map(|lang| {
                layout
                    .task_dir(Task::Pawsx)
                    .join(lang)
                    .join("pawsx_train_tmp.json")
            })
            .collect(),
        marc_train_json: layout
            .task_dir(Task::Marc)
            .join(setting.dir_name())
            .join("marc_train_tmp.json"),
        ner_train_json: layout
            .task_dir(Task::Ner)
            .join("multi")
            .join("ner_train_tmp.json"),
    }
}
