//! Versioned persistence of learned rule sets
//!
//! A model file holds a format version, run metadata and the rule list. Each
//! rule is stored as its antecedent constraints, its consequent attribute and
//! value set (in order), and its binding count, so a reloaded rule scores and
//! binds exactly like the rule that was saved.
//!
//! Two encodings share the same document:
//! - JSON (`serde_json`), the default, readable and diffable
//! - MessagePack (`rmp-serde`), chosen by a `.msgpack` or `.mpk` extension

use crate::dataset::AttributeSchema;
use crate::error::{LeradError, Result};
use crate::rule::{Antecedent, Rule, RuleSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Current model format version
pub const FORMAT_VERSION: u32 = 1;

/// Metadata for a persisted model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// lerad version that created this model
    pub lerad_version: String,
    /// When the model was trained (unix seconds)
    pub trained_at: String,
    /// Attribute names of the schema the model was learned on
    pub attributes: Vec<String>,
    /// Number of cases used for training
    pub training_cases: usize,
    /// Number of cases held out for validation
    pub validation_cases: usize,
    /// Learning hyperparameters
    pub hyperparameters: BTreeMap<String, String>,
    /// Optional description
    pub description: Option<String>,
}

impl ModelMetadata {
    /// Create new metadata with current timestamp
    pub fn new(schema: &AttributeSchema, training_cases: usize, validation_cases: usize) -> Self {
        Self {
            lerad_version: env!("CARGO_PKG_VERSION").to_string(),
            trained_at: unix_timestamp(),
            attributes: schema.names().to_vec(),
            training_cases,
            validation_cases,
            hyperparameters: BTreeMap::new(),
            description: None,
        }
    }

    /// Add a hyperparameter
    pub fn with_hyperparameter(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.hyperparameters.insert(key.into(), value.to_string());
        self
    }

    /// Add a description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }
}

fn unix_timestamp() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}", duration.as_secs())
}

/// One antecedent constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionRecord {
    pub attribute: usize,
    pub value: String,
}

/// Consequent attribute and its allowed values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsequentRecord {
    pub attribute: usize,
    pub values: Vec<String>,
}

/// Serialized form of one rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRecord {
    pub antecedent: Vec<ConditionRecord>,
    pub consequent: ConsequentRecord,
    pub bindings: u64,
}

impl From<&Rule> for RuleRecord {
    fn from(rule: &Rule) -> Self {
        Self {
            antecedent: rule
                .antecedent()
                .iter()
                .map(|(attribute, value)| ConditionRecord {
                    attribute,
                    value: value.to_string(),
                })
                .collect(),
            consequent: ConsequentRecord {
                attribute: rule.consequent().attribute(),
                values: rule.consequent().values().to_vec(),
            },
            bindings: rule.bindings(),
        }
    }
}

impl RuleRecord {
    /// Rebuild the rule, checking structural invariants
    ///
    /// `attribute_count` bounds attribute indices when known.
    pub fn into_rule(self, attribute_count: Option<usize>) -> Result<Rule> {
        let check_index = |attribute: usize| match attribute_count {
            Some(count) if attribute >= count => Err(LeradError::model(format!(
                "attribute index {} outside schema of {} attributes",
                attribute, count
            ))),
            _ => Ok(()),
        };

        check_index(self.consequent.attribute)?;
        let mut antecedent = Antecedent::new();
        for condition in self.antecedent {
            check_index(condition.attribute)?;
            if !antecedent.insert(condition.attribute, condition.value) {
                return Err(LeradError::model(format!(
                    "attribute {} constrained twice in one antecedent",
                    condition.attribute
                )));
            }
        }

        let consequent_attribute = self.consequent.attribute;
        if self.consequent.values.is_empty() {
            return Err(LeradError::model(format!(
                "rule predicting attribute {} has an empty consequent set",
                consequent_attribute
            )));
        }
        let values = &self.consequent.values;
        if let Some(duplicate) = values
            .iter()
            .enumerate()
            .find_map(|(i, value)| values[..i].contains(value).then_some(value))
        {
            return Err(LeradError::model(format!(
                "consequent value '{}' listed twice for attribute {}",
                duplicate, consequent_attribute
            )));
        }
        // Every allowed value was observed in at least one bound case
        if self.bindings < values.len() as u64 {
            return Err(LeradError::model(format!(
                "rule predicting attribute {} has {} bindings for {} consequent values",
                consequent_attribute,
                self.bindings,
                values.len()
            )));
        }

        Rule::from_parts(
            antecedent,
            consequent_attribute,
            self.consequent.values,
            self.bindings,
        )
        .ok_or_else(|| {
            LeradError::model(format!(
                "consequent attribute {} also appears in the antecedent",
                consequent_attribute
            ))
        })
    }
}

/// Persisted model document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelFile {
    pub format_version: u32,
    pub metadata: ModelMetadata,
    pub rules: Vec<RuleRecord>,
}

impl ModelFile {
    pub fn new(rules: &RuleSet, metadata: ModelMetadata) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            metadata,
            rules: rules.iter().map(RuleRecord::from).collect(),
        }
    }

    /// Rebuild the rule set, validating the version and every rule
    pub fn into_rule_set(self, schema: Option<&AttributeSchema>) -> Result<RuleSet> {
        if self.format_version != FORMAT_VERSION {
            return Err(LeradError::model(format!(
                "unsupported format version {} (expected {})",
                self.format_version, FORMAT_VERSION
            )));
        }

        let attribute_count = schema.map(AttributeSchema::len);
        let rules = self
            .rules
            .into_iter()
            .enumerate()
            .map(|(i, record)| {
                record.into_rule(attribute_count).map_err(|e| match e {
                    LeradError::ModelFormat(msg) => {
                        LeradError::model(format!("rule {}: {}", i + 1, msg))
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(RuleSet::new(rules))
    }
}

/// On-disk encoding of a model file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelEncoding {
    Json,
    MessagePack,
}

impl ModelEncoding {
    /// Pick the encoding from the file extension (JSON unless MessagePack)
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("msgpack") | Some("mpk") => ModelEncoding::MessagePack,
            _ => ModelEncoding::Json,
        }
    }

    pub fn encode(self, model: &ModelFile) -> Result<Vec<u8>> {
        match self {
            ModelEncoding::Json => serde_json::to_vec_pretty(model)
                .map_err(|e| LeradError::model(e.to_string())),
            ModelEncoding::MessagePack => {
                rmp_serde::to_vec_named(model).map_err(|e| LeradError::model(e.to_string()))
            }
        }
    }

    pub fn decode(self, bytes: &[u8]) -> Result<ModelFile> {
        match self {
            ModelEncoding::Json => {
                serde_json::from_slice(bytes).map_err(|e| LeradError::model(e.to_string()))
            }
            ModelEncoding::MessagePack => {
                rmp_serde::from_slice(bytes).map_err(|e| LeradError::model(e.to_string()))
            }
        }
    }
}

/// Save a model to `path`, encoding chosen by extension
pub fn save_model(model: &ModelFile, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let bytes = ModelEncoding::from_path(path).encode(model)?;
    fs::write(path, bytes)?;
    tracing::debug!("Saved {} rules to {}", model.rules.len(), path.display());
    Ok(())
}

/// Load a model document from `path` without rebuilding rules
pub fn load_model_file(path: impl AsRef<Path>) -> Result<ModelFile> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    ModelEncoding::from_path(path).decode(&bytes)
}

/// Load and validate a rule set, warning if it was learned on another schema
pub fn load_rules(path: impl AsRef<Path>, schema: &AttributeSchema) -> Result<RuleSet> {
    let model = load_model_file(path)?;
    tracing::info!("{}", model_status_line(&model));
    if model.metadata.attributes != schema.names() {
        tracing::warn!(
            "Model was learned on attributes {:?}, predicting with {:?}",
            model.metadata.attributes,
            schema.names()
        );
    }
    model.into_rule_set(Some(schema))
}

/// Generate a status line for model information
pub fn model_status_line(model: &ModelFile) -> String {
    format!(
        "model: lerad v{}, {} rules learned from {} cases",
        model.metadata.lerad_version,
        model.rules.len(),
        model.metadata.training_cases
    )
}
