use crate::errors::PrepError;

/// Shape of a multilingual transformer encoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncoderArch {
    /// Number of transformer layers.
    pub encoder_layers: usize,
    /// Attention heads per layer.
    pub attention_heads: usize,
    /// Hidden state width.
    pub hidden_size: usize,
}

impl EncoderArch {
    /// mBERT base (bert-base-multilingual-cased).
    pub fn mbert_base() -> Self {
        Self {
            encoder_layers: 12,
            attention_heads: 12,
            hidden_size: 768,
        }
    }

    /// XLM-R base.
    pub fn xlmr_base() -> Self {
        Self {
            encoder_layers: 12,
            attention_heads: 12,
            hidden_size: 768,
        }
    }

    /// XLM-R large.
    pub fn xlmr_large() -> Self {
        Self {
            encoder_layers: 24,
            attention_heads: 16,
            hidden_size: 1024,
        }
    }

    /// Compute the freeze plan for a probing or fine-tuning run.
    pub fn freeze_plan(
        &self,
        mode: ProbeMode,
        regime: TrainRegime,
    ) -> Result<FreezePlan, PrepError> {
        let (layer, head) = match mode {
            ProbeMode::LayerWise { layer } => (layer, None),
            ProbeMode::HeadWise { layer, head } => (layer, Some(head)),
        };
        if layer >= self.encoder_layers {
            return Err(PrepError::Configuration(format!(
                "layer {layer} out of range for a {}-layer encoder",
                self.encoder_layers
            )));
        }
        if let Some(head) = head
            && head >= self.attention_heads
        {
            return Err(PrepError::Configuration(format!(
                "head {head} out of range for {} heads per layer",
                self.attention_heads
            )));
        }

        let mut active_heads = vec![vec![true; self.attention_heads]; self.encoder_layers];
        let trainable_layers = match regime {
            TrainRegime::Probing => {
                // Probing never updates the encoder; head-wise probing also
                // masks every head in the probed layer except the target.
                if let Some(head) = head {
                    active_heads[layer] = vec![false; self.attention_heads];
                    active_heads[layer][head] = true;
                }
                Vec::new()
            }
            TrainRegime::Finetune => match head {
                // Layer-wise fine-tuning unfreezes the probed layer and
                // everything above it.
                None => (layer..self.encoder_layers).collect(),
                // Head-wise fine-tuning only updates the probed layer.
                Some(_) => vec![layer],
            },
        };

        Ok(FreezePlan {
            representation_layer: layer,
            trainable_layers,
            active_heads,
            train_embeddings: false,
            train_classifier: true,
        })
    }
}

/// Which axis the probing experiment sweeps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbeMode {
    /// Probe one encoder layer's representation.
    LayerWise {
        /// Encoder layer to probe (0-based).
        layer: usize,
    },
    /// Probe one attention head within a layer.
    HeadWise {
        /// Encoder layer containing the head (0-based).
        layer: usize,
        /// Attention head to probe (0-based).
        head: usize,
    },
}

/// Whether the run probes frozen representations or fine-tunes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrainRegime {
    /// Encoder frozen; only the classifier head trains.
    Probing,
    /// Selected encoder parameters train alongside the classifier.
    Finetune,
}

/// Which parameters train and which attention heads stay active.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FreezePlan {
    /// Layer whose representation feeds the classifier.
    pub representation_layer: usize,
    /// Encoder layers whose parameters update during training.
    pub trainable_layers: Vec<usize>,
    /// Forward-pass head mask, indexed `[layer][head]`.
    pub active_heads: Vec<Vec<bool>>,
    /// Whether the embedding table trains.
    pub train_embeddings: bool,
    /// Whether the classification head trains.
    pub train_classifier: bool,
}

impl FreezePlan {
    /// Whether a HuggingFace-style parameter name is trainable under this plan.
    ///
    /// Recognized prefixes: `classifier.`, `embeddings.`, and
    /// `encoder.layer.<i>.`; anything else stays frozen.
    pub fn is_param_trainable(&self, name: &str) -> bool {
        if name.starts_with("classifier.") {
            return self.train_classifier;
        }
        if name.starts_with("embeddings.") {
            return self.train_embeddings;
        }
        if let Some(rest) = name.strip_prefix("encoder.layer.") {
            let layer = rest.split('.').next().and_then(|idx| idx.parse::<usize>().ok());
            return layer
                .map(|layer| self.trainable_layers.contains(&layer))
                .unwrap_or(false);
        }
        false
    }

    /// Number of active heads across all layers.
    pub fn active_head_count(&self) -> usize {
        self.active_heads
            .iter()
            .map(|layer| layer.iter().filter(|active| **active).count())
            .sum()
    }
}
