use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::AttributeValue;

/// Comparison operators accepted in a scan filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComparisonOperator {
    Eq,
    Ne,
    Le,
    Lt,
    Ge,
    Gt,
    NotNull,
    Null,
    Contains,
    NotContains,
    BeginsWith,
    In,
    Between,
}

impl ComparisonOperator {
    /// The operator's name in the store's protocol.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "EQ",
            Self::Ne => "NE",
            Self::Le => "LE",
            Self::Lt => "LT",
            Self::Ge => "GE",
            Self::Gt => "GT",
            Self::NotNull => "NOT_NULL",
            Self::Null => "NULL",
            Self::Contains => "CONTAINS",
            Self::NotContains => "NOT_CONTAINS",
            Self::BeginsWith => "BEGINS_WITH",
            Self::In => "IN",
            Self::Between => "BETWEEN",
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A filter condition on a single attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub operator: ComparisonOperator,
    pub values: Vec<AttributeValue>,
}

impl Condition {
    pub fn new(operator: ComparisonOperator, values: Vec<AttributeValue>) -> Self {
        Self { operator, values }
    }

    pub fn eq(value: AttributeValue) -> Self {
        Self::new(ComparisonOperator::Eq, vec![value])
    }

    pub fn ne(value: AttributeValue) -> Self {
        Self::new(ComparisonOperator::Ne, vec![value])
    }

    pub fn lt(value: AttributeValue) -> Self {
        Self::new(ComparisonOperator::Lt, vec![value])
    }

    pub fn le(value: AttributeValue) -> Self {
        Self::new(ComparisonOperator::Le, vec![value])
    }

    pub fn gt(value: AttributeValue) -> Self {
        Self::new(ComparisonOperator::Gt, vec![value])
    }

    pub fn ge(value: AttributeValue) -> Self {
        Self::new(ComparisonOperator::Ge, vec![value])
    }

    pub fn between(low: AttributeValue, high: AttributeValue) -> Self {
        Self::new(ComparisonOperator::Between, vec![low, high])
    }

    pub fn begins_with(prefix: impl Into<String>) -> Self {
        Self::new(ComparisonOperator::BeginsWith, vec![AttributeValue::S(prefix.into())])
    }

    pub fn contains(value: AttributeValue) -> Self {
        Self::new(ComparisonOperator::Contains, vec![value])
    }

    pub fn not_contains(value: AttributeValue) -> Self {
        Self::new(ComparisonOperator::NotContains, vec![value])
    }

    pub fn in_list(values: Vec<AttributeValue>) -> Self {
        Self::new(ComparisonOperator::In, values)
    }

    pub fn not_null() -> Self {
        Self::new(ComparisonOperator::NotNull, Vec::new())
    }

    pub fn null() -> Self {
        Self::new(ComparisonOperator::Null, Vec::new())
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.operator)?;
        if !self.values.is_empty() {
            write!(f, " {:?}", self.values)?;
        }
        Ok(())
    }
}

/// Filter conditions keyed by attribute name. Empty means an unfiltered scan.
pub type Conditions = BTreeMap<String, Condition>;

/// Renders conditions for log records, e.g. `{status EQ [S("active")]}`.
pub fn summarize(conditions: &Conditions) -> String {
    let parts: Vec<String> = conditions
        .iter()
        .map(|(name, condition)| format!("{} {}", name, condition))
        .collect();
    format!("{{{}}}", parts.join(", "))
}
