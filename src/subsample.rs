use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use rand::seq::index;
use tracing::{debug, info};

use crate::constants::layout::{FOREIGN_DIR_PREFIX, FOREIGN_DIR_SUFFIX, NLI_TRAIN_FILENAME};
use crate::constants::seeds::{DEFAULT_BASE_SEED, DEFAULT_SEED_STRIDE};
use crate::data::{Record, read_records, write_records};
use crate::errors::PrepError;
use crate::rng::{DeterministicRng, seed_for_index};
use crate::types::FractionTag;

/// Deterministic subsample-and-combine over record files.
///
/// Given an in-domain dataset (always included in full) and a foreign dataset
/// (sampled at varying fractions), produces one combined training set per
/// fraction under the output root. The fraction at list position `i` draws
/// with the seed `base + stride * i`, so repeated invocations with the same
/// inputs yield byte-identical outputs.
pub struct SubsampleCombiner {
    out_root: PathBuf,
    out_filename: String,
    base_seed: u64,
    seed_stride: u64,
}

impl SubsampleCombiner {
    /// Create a combiner writing `foreign_<p>_2/` directories under `out_root`.
    pub fn new(out_root: impl Into<PathBuf>) -> Self {
        Self {
            out_root: out_root.into(),
            out_filename: NLI_TRAIN_FILENAME.to_string(),
            base_seed: DEFAULT_BASE_SEED,
            seed_stride: DEFAULT_SEED_STRIDE,
        }
    }

    /// Override the base seed of the per-fraction seed derivation.
    pub fn with_base_seed(mut self, base_seed: u64) -> Self {
        self.base_seed = base_seed;
        self
    }

    /// Override the stride of the per-fraction seed derivation.
    pub fn with_seed_stride(mut self, seed_stride: u64) -> Self {
        self.seed_stride = seed_stride;
        self
    }

    /// Override the filename written inside each fraction directory.
    pub fn with_output_filename(mut self, filename: impl Into<String>) -> Self {
        self.out_filename = filename.into();
        self
    }

    /// Output path for the combined training set at fraction `p`.
    pub fn output_path(&self, p: f64) -> PathBuf {
        self.out_root
            .join(format!(
                "{FOREIGN_DIR_PREFIX}{}{FOREIGN_DIR_SUFFIX}",
                fraction_tag(p)
            ))
            .join(&self.out_filename)
    }

    /// Produce one combined training set per fraction.
    ///
    /// For each fraction `p` at position `i`, draws `floor(N * p)` foreign
    /// rows without replacement (in draw order, which is randomized even at
    /// `p = 1.0`) and writes them followed by every in-domain row. Existing
    /// outputs are left untouched and reported as successes.
    ///
    /// Returns the fraction-tag to output-path mapping in fraction order.
    pub fn combine(
        &self,
        in_domain: &Path,
        foreign: &Path,
        fractions: &[f64],
    ) -> Result<IndexMap<FractionTag, PathBuf>, PrepError> {
        for p in fractions {
            if !(*p > 0.0 && *p <= 1.0) {
                return Err(PrepError::Configuration(format!(
                    "sampling fraction {p} is outside (0, 1]"
                )));
            }
        }
        let in_domain_rows = read_records(in_domain)?;
        let foreign_rows = read_records(foreign)?;

        let mut outputs = IndexMap::new();
        for (idx, p) in fractions.iter().copied().enumerate() {
            let tag = fraction_tag(p);
            let out_path = self.output_path(p);
            if out_path.is_file() {
                // Already computed on a previous run; regenerating would only
                // risk divergence if inputs changed underneath.
                debug!(fraction = %tag, path = %out_path.display(), "combined output exists, skipping");
                outputs.insert(tag, out_path);
                continue;
            }
            let seed = seed_for_index(self.base_seed, self.seed_stride, idx);
            let mut rng = DeterministicRng::new(seed);
            let take = (foreign_rows.len() as f64 * p).floor() as usize;
            let sampled = index::sample(&mut rng, foreign_rows.len(), take);

            let mut combined: Vec<&Record> = Vec::with_capacity(take + in_domain_rows.len());
            for i in sampled.iter() {
                combined.push(&foreign_rows[i]);
            }
            combined.extend(in_domain_rows.iter());
            write_records(&out_path, combined)?;
            info!(
                fraction = %tag,
                seed,
                sampled = take,
                total = take + in_domain_rows.len(),
                path = %out_path.display(),
                "wrote combined training set"
            );
            outputs.insert(tag, out_path);
        }
        Ok(outputs)
    }
}

/// Directory-name tag for a sampling fraction.
///
/// Whole fractions keep one decimal digit (`1.0`) so directory names stay
/// consistent with historically generated layouts.
pub fn fraction_tag(p: f64) -> FractionTag {
    if p == p.trunc() {
        format!("{p:.1}")
    } else {
        format!("{p}")
    }
}
