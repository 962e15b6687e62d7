//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between the SDK's types and the core data
//! model. These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::{
    AttributeValue as SdkValue, ComparisonOperator as SdkOperator, Condition as SdkCondition,
};
use dynavalve_core::scan::{
    AttributeValue, ComparisonOperator, Condition, ContinuationKey, Item, ScanError,
};

/// Convert a core value to an SDK value.
pub fn to_sdk_value(value: &AttributeValue) -> SdkValue {
    match value {
        AttributeValue::S(s) => SdkValue::S(s.clone()),
        AttributeValue::N(n) => SdkValue::N(n.clone()),
        AttributeValue::B(b) => SdkValue::B(Blob::new(b.clone())),
        AttributeValue::Bool(b) => SdkValue::Bool(*b),
        AttributeValue::Null(b) => SdkValue::Null(*b),
        AttributeValue::L(list) => SdkValue::L(list.iter().map(to_sdk_value).collect()),
        AttributeValue::M(map) => SdkValue::M(to_sdk_item(map)),
        AttributeValue::Ss(set) => SdkValue::Ss(set.clone()),
        AttributeValue::Ns(set) => SdkValue::Ns(set.clone()),
        AttributeValue::Bs(set) => SdkValue::Bs(set.iter().cloned().map(Blob::new).collect()),
    }
}

/// Convert an SDK value to a core value.
pub fn from_sdk_value(value: &SdkValue) -> Result<AttributeValue, ScanError> {
    Ok(match value {
        SdkValue::S(s) => AttributeValue::S(s.clone()),
        SdkValue::N(n) => AttributeValue::N(n.clone()),
        SdkValue::B(b) => AttributeValue::B(b.as_ref().to_vec()),
        SdkValue::Bool(b) => AttributeValue::Bool(*b),
        SdkValue::Null(b) => AttributeValue::Null(*b),
        SdkValue::L(list) => AttributeValue::L(
            list.iter()
                .map(from_sdk_value)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        SdkValue::M(map) => AttributeValue::M(from_sdk_item(map)?),
        SdkValue::Ss(set) => AttributeValue::Ss(set.clone()),
        SdkValue::Ns(set) => AttributeValue::Ns(set.clone()),
        SdkValue::Bs(set) => AttributeValue::Bs(set.iter().map(|b| b.as_ref().to_vec()).collect()),
        other => {
            return Err(ScanError::Conversion(format!(
                "unsupported attribute value: {:?}",
                other
            )))
        }
    })
}

/// Convert a core item to an SDK item.
pub fn to_sdk_item(item: &Item) -> HashMap<String, SdkValue> {
    item.iter()
        .map(|(name, value)| (name.clone(), to_sdk_value(value)))
        .collect()
}

/// Convert an SDK item to a core item.
pub fn from_sdk_item(item: &HashMap<String, SdkValue>) -> Result<Item, ScanError> {
    item.iter()
        .map(|(name, value)| Ok((name.clone(), from_sdk_value(value)?)))
        .collect()
}

/// Convert a `LastEvaluatedKey`; an absent or empty map ends the scan.
pub fn to_continuation_key(
    key: Option<&HashMap<String, SdkValue>>,
) -> Result<Option<ContinuationKey>, ScanError> {
    match key {
        Some(key) if !key.is_empty() => Ok(Some(ContinuationKey::new(from_sdk_item(key)?))),
        _ => Ok(None),
    }
}

/// Convert a core comparison operator to the SDK enum.
pub fn to_sdk_operator(operator: ComparisonOperator) -> SdkOperator {
    match operator {
        ComparisonOperator::Eq => SdkOperator::Eq,
        ComparisonOperator::Ne => SdkOperator::Ne,
        ComparisonOperator::Le => SdkOperator::Le,
        ComparisonOperator::Lt => SdkOperator::Lt,
        ComparisonOperator::Ge => SdkOperator::Ge,
        ComparisonOperator::Gt => SdkOperator::Gt,
        ComparisonOperator::NotNull => SdkOperator::NotNull,
        ComparisonOperator::Null => SdkOperator::Null,
        ComparisonOperator::Contains => SdkOperator::Contains,
        ComparisonOperator::NotContains => SdkOperator::NotContains,
        ComparisonOperator::BeginsWith => SdkOperator::BeginsWith,
        ComparisonOperator::In => SdkOperator::In,
        ComparisonOperator::Between => SdkOperator::Between,
    }
}

/// Convert a core filter condition to an SDK `Condition`.
pub fn to_sdk_condition(condition: &Condition) -> Result<SdkCondition, ScanError> {
    let values = if condition.values.is_empty() {
        None
    } else {
        Some(condition.values.iter().map(to_sdk_value).collect())
    };
    SdkCondition::builder()
        .comparison_operator(to_sdk_operator(condition.operator))
        .set_attribute_value_list(values)
        .build()
        .map_err(|e| ScanError::Conversion(e.to_string()))
}
