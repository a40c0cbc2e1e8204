//! Conjunctive IF...THEN rules
//!
//! A rule's antecedent is a conjunction of `attribute = value` tests. Its
//! consequent names one attribute together with every value that attribute took
//! among the cases the antecedent matched during training. At prediction time an
//! unseen consequent value is a violation.

use crate::dataset::{AttributeSchema, AttributeValues};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Required attribute values, keyed by attribute index
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Antecedent {
    conditions: BTreeMap<usize, String>,
}

impl Antecedent {
    /// Empty antecedent (matches every case)
    pub fn new() -> Self {
        Self::default()
    }

    /// Constraints in ascending attribute order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.conditions.iter().map(|(&a, v)| (a, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn contains(&self, attribute: usize) -> bool {
        self.conditions.contains_key(&attribute)
    }

    /// Add a constraint, returning false if `attribute` was already constrained
    pub(crate) fn insert(&mut self, attribute: usize, value: impl Into<String>) -> bool {
        self.conditions.insert(attribute, value.into()).is_none()
    }
}

impl AttributeValues for Antecedent {
    fn value_of(&self, attribute: usize) -> Option<&str> {
        self.conditions.get(&attribute).map(String::as_str)
    }
}

/// Consequent attribute and the values observed for it under the antecedent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consequent {
    attribute: usize,
    /// Insertion ordered, never empty
    values: Vec<String>,
}

impl Consequent {
    pub fn attribute(&self) -> usize {
        self.attribute
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn allows(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

/// A learned rule with its binding count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    antecedent: Antecedent,
    consequent: Consequent,
    bindings: u64,
}

impl Rule {
    /// Base rule: empty antecedent, consequent seeded with one value
    pub fn new(consequent_attribute: usize, seed_value: impl Into<String>) -> Self {
        Self {
            antecedent: Antecedent::new(),
            consequent: Consequent {
                attribute: consequent_attribute,
                values: vec![seed_value.into()],
            },
            bindings: 0,
        }
    }

    /// Reassemble a rule from persisted parts
    ///
    /// Returns `None` if the parts break a rule invariant: an empty consequent set,
    /// or the consequent attribute appearing in the antecedent.
    pub fn from_parts(
        antecedent: Antecedent,
        consequent_attribute: usize,
        consequent_values: Vec<String>,
        bindings: u64,
    ) -> Option<Self> {
        if consequent_values.is_empty() || antecedent.contains(consequent_attribute) {
            return None;
        }
        Some(Self {
            antecedent,
            consequent: Consequent {
                attribute: consequent_attribute,
                values: consequent_values,
            },
            bindings,
        })
    }

    /// New rule with one more antecedent constraint
    ///
    /// The consequent (including its value set) and binding count are copied;
    /// `self` is left untouched.
    pub fn extend(&self, attribute: usize, value: impl Into<String>) -> Self {
        debug_assert_ne!(attribute, self.consequent.attribute);
        let mut next = self.clone();
        next.antecedent.insert(attribute, value);
        next
    }

    pub fn antecedent(&self) -> &Antecedent {
        &self.antecedent
    }

    pub fn consequent(&self) -> &Consequent {
        &self.consequent
    }

    pub fn bindings(&self) -> u64 {
        self.bindings
    }

    /// True iff every antecedent constraint is present in `case` with an equal value
    pub fn binds<C: AttributeValues + ?Sized>(&self, case: &C) -> bool {
        self.antecedent
            .iter()
            .all(|(attribute, value)| case.value_of(attribute) == Some(value))
    }

    /// Whether `case` violates the consequent (its value was never observed)
    ///
    /// A case missing the consequent attribute entirely is not a violation.
    pub fn is_violated_by<C: AttributeValues + ?Sized>(&self, case: &C) -> bool {
        case.value_of(self.consequent.attribute)
            .is_some_and(|value| !self.consequent.allows(value))
    }

    /// Count one binding for `case` if the antecedent matches, widening the
    /// consequent set with the case's value when it is new
    pub fn observe<C: AttributeValues + ?Sized>(&mut self, case: &C) -> bool {
        if !self.binds(case) {
            return false;
        }
        self.bindings += 1;
        if let Some(value) = case.value_of(self.consequent.attribute) {
            if !self.consequent.allows(value) {
                self.consequent.values.push(value.to_string());
            }
        }
        true
    }

    /// n/r score: bindings over the number of allowed consequent values
    pub fn score(&self) -> f64 {
        self.bindings as f64 / self.consequent.values.len() as f64
    }

    /// Exact comparison of n/r scores (cross-multiplied, no rounding)
    pub fn cmp_score(&self, other: &Rule) -> Ordering {
        let lhs = u128::from(self.bindings) * other.consequent.values.len() as u128;
        let rhs = u128::from(other.bindings) * self.consequent.values.len() as u128;
        lhs.cmp(&rhs)
    }

    /// Render with attribute names from `schema`
    pub fn display<'a>(&'a self, schema: &'a AttributeSchema) -> RuleDisplay<'a> {
        RuleDisplay { rule: self, schema }
    }
}

/// `IF a=x AND b=y THEN c = v,w` rendering of a rule
pub struct RuleDisplay<'a> {
    rule: &'a Rule,
    schema: &'a AttributeSchema,
}

impl RuleDisplay<'_> {
    fn attribute_name(&self, index: usize) -> String {
        self.schema
            .name(index)
            .map(str::to_string)
            .unwrap_or_else(|| format!("attr{}", index))
    }
}

impl fmt::Display for RuleDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let antecedent = &self.rule.antecedent;
        if antecedent.is_empty() {
            write!(f, "IF TRUE")?;
        } else {
            let conditions: Vec<String> = antecedent
                .iter()
                .map(|(attribute, value)| format!("{}={}", self.attribute_name(attribute), value))
                .collect();
            write!(f, "IF {}", conditions.join(" AND "))?;
        }

        let consequent = &self.rule.consequent;
        write!(
            f,
            " THEN {} = {}",
            self.attribute_name(consequent.attribute),
            consequent.values.join(",")
        )
    }
}

/// Rules produced by one learning run, in score order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
