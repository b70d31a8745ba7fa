/// Language code as it appears in raw corpus rows.
/// Examples: `en`, `fr`, `zh`
pub type LanguageCode = String;
/// Classification label carried through conversion unchanged.
/// Examples: `entailment`, `neutral`, `contradiction`
pub type Label = String;
/// Sentence text emitted into MLM pretraining files.
/// Example: `The new rights are nice enough.`
pub type Sentence = String;
/// Directory-name tag encoding a sampling fraction.
/// Examples: `0.2`, `1.0`
pub type FractionTag = String;
/// Record identifier within a converted dataset file.
/// Example: `14087` (raw input line index at conversion time, not stable across files)
pub type RecordIndex = String;
