//! Attribute schema and case file parsing
//!
//! Both files are plain text with one record per line:
//! - schema: the first whitespace-separated token of each line names an attribute,
//!   line order defines the attribute index
//! - cases: whitespace-separated tokens map positionally to attribute indices
//!
//! Blank lines are skipped in both.

use crate::error::{LeradError, Result};
use std::fs;
use std::path::Path;

/// Ordered attribute names, index 0..K-1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSchema {
    names: Vec<String>,
}

impl AttributeSchema {
    /// Build a schema directly from attribute names
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Load a schema from an attribute file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parse schema text; `source_name` only labels parse errors
    pub fn parse(content: &str, source_name: &str) -> Result<Self> {
        let names: Vec<String> = content
            .lines()
            .filter_map(|line| line.split_whitespace().next())
            .map(str::to_string)
            .collect();

        if names.is_empty() {
            return Err(LeradError::Parse {
                source_name: source_name.to_string(),
                line: 0,
                message: "schema defines no attributes".to_string(),
            });
        }

        Ok(Self { names })
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Attribute name at `index`
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Index of the attribute called `name`; the last one wins on duplicates
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().rposition(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Read-only access to attribute values by index
///
/// Implemented by [`Case`] and by rule antecedents, so a rule can test
/// whether it binds to another rule's antecedent exactly as it would a case.
pub trait AttributeValues {
    /// Value of `attribute`, or `None` when the attribute is absent
    fn value_of(&self, attribute: usize) -> Option<&str>;
}

/// One categorical record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Case {
    values: Vec<String>,
}

impl Case {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Value of `attribute`
    pub fn get(&self, attribute: usize) -> Option<&str> {
        self.values.get(attribute).map(String::as_str)
    }

    /// Number of attribute values in this case
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

impl AttributeValues for Case {
    fn value_of(&self, attribute: usize) -> Option<&str> {
        self.get(attribute)
    }
}

/// Load all cases from a case file, checking each record against `schema`
pub fn load_cases(path: impl AsRef<Path>, schema: &AttributeSchema) -> Result<Vec<Case>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    parse_cases(&content, schema, &path.display().to_string())
}

/// Parse case text; `source_name` only labels parse errors
pub fn parse_cases(
    content: &str,
    schema: &AttributeSchema,
    source_name: &str,
) -> Result<Vec<Case>> {
    let mut cases = Vec::new();

    for (line_no, line) in content.lines().enumerate() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }

        if fields.len() != schema.len() {
            return Err(LeradError::Parse {
                source_name: source_name.to_string(),
                line: line_no + 1,
                message: format!(
                    "expected {} fields, found {}",
                    schema.len(),
                    fields.len()
                ),
            });
        }

        cases.push(Case::new(fields));
    }

    tracing::debug!("Parsed {} cases from {}", cases.len(), source_name);
    Ok(cases)
}
