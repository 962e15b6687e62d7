//! Scan filter evaluation for the in-memory store.
//!
//! Mirrors the store's legacy `ScanFilter` semantics closely enough for
//! tests: values of different types never match, numbers compare
//! numerically, strings and binaries compare byte-wise.

use std::cmp::Ordering;

use dynavalve_core::scan::{AttributeValue, ComparisonOperator, Condition, Item, Result, ScanError};

/// Returns `true` if `item` satisfies every condition.
pub fn matches_all<'a, I>(item: &Item, conditions: I) -> Result<bool>
where
    I: IntoIterator<Item = (&'a String, &'a Condition)>,
{
    for (name, condition) in conditions {
        if !matches(item.get(name), condition)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Evaluates one condition against the attribute value, if present.
pub fn matches(value: Option<&AttributeValue>, condition: &Condition) -> Result<bool> {
    let operands = &condition.values;
    let expected = match condition.operator {
        ComparisonOperator::NotNull | ComparisonOperator::Null => 0,
        ComparisonOperator::Between => 2,
        ComparisonOperator::In => operands.len().max(1),
        _ => 1,
    };
    if operands.len() != expected {
        return Err(ScanError::InvalidRequest(format!(
            "{} expects {} value(s), got {}",
            condition.operator,
            expected,
            operands.len()
        )));
    }

    let result = match (condition.operator, value) {
        (ComparisonOperator::NotNull, v) => v.is_some(),
        (ComparisonOperator::Null, v) => v.is_none(),
        (ComparisonOperator::Ne, None) => true,
        (ComparisonOperator::NotContains, None) => true,
        (_, None) => false,
        (ComparisonOperator::Eq, Some(v)) => compare(v, &operands[0]) == Some(Ordering::Equal),
        (ComparisonOperator::Ne, Some(v)) => compare(v, &operands[0]) != Some(Ordering::Equal),
        (ComparisonOperator::Lt, Some(v)) => compare(v, &operands[0]) == Some(Ordering::Less),
        (ComparisonOperator::Le, Some(v)) => matches!(
            compare(v, &operands[0]),
            Some(Ordering::Less | Ordering::Equal)
        ),
        (ComparisonOperator::Gt, Some(v)) => compare(v, &operands[0]) == Some(Ordering::Greater),
        (ComparisonOperator::Ge, Some(v)) => matches!(
            compare(v, &operands[0]),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        (ComparisonOperator::Between, Some(v)) => {
            matches!(
                compare(v, &operands[0]),
                Some(Ordering::Greater | Ordering::Equal)
            ) && matches!(
                compare(v, &operands[1]),
                Some(Ordering::Less | Ordering::Equal)
            )
        }
        (ComparisonOperator::BeginsWith, Some(v)) => match (v, &operands[0]) {
            (AttributeValue::S(s), AttributeValue::S(prefix)) => s.starts_with(prefix.as_str()),
            (AttributeValue::B(b), AttributeValue::B(prefix)) => b.starts_with(prefix),
            _ => false,
        },
        (ComparisonOperator::Contains, Some(v)) => contains(v, &operands[0]),
        (ComparisonOperator::NotContains, Some(v)) => !contains(v, &operands[0]),
        (ComparisonOperator::In, Some(v)) => operands
            .iter()
            .any(|candidate| compare(v, candidate) == Some(Ordering::Equal)),
    };
    Ok(result)
}

fn compare(left: &AttributeValue, right: &AttributeValue) -> Option<Ordering> {
    match (left, right) {
        (AttributeValue::S(a), AttributeValue::S(b)) => Some(a.cmp(b)),
        (AttributeValue::N(a), AttributeValue::N(b)) => compare_numbers(a, b),
        (AttributeValue::B(a), AttributeValue::B(b)) => Some(a.cmp(b)),
        (a, b) if a == b => Some(Ordering::Equal),
        _ => None,
    }
}

fn compare_numbers(a: &str, b: &str) -> Option<Ordering> {
    let a: f64 = a.parse().ok()?;
    let b: f64 = b.parse().ok()?;
    a.partial_cmp(&b)
}

fn contains(haystack: &AttributeValue, needle: &AttributeValue) -> bool {
    match (haystack, needle) {
        (AttributeValue::S(s), AttributeValue::S(sub)) => s.contains(sub.as_str()),
        (AttributeValue::B(b), AttributeValue::B(sub)) => {
            sub.is_empty() || b.windows(sub.len()).any(|w| w == sub.as_slice())
        }
        (AttributeValue::Ss(set), AttributeValue::S(s)) => set.contains(s),
        (AttributeValue::Ns(set), AttributeValue::N(n)) => set
            .iter()
            .any(|m| compare_numbers(m, n) == Some(Ordering::Equal)),
        (AttributeValue::Bs(set), AttributeValue::B(b)) => set.contains(b),
        (AttributeValue::L(list), v) => list.iter().any(|e| e == v),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> AttributeValue {
        AttributeValue::s(v)
    }

    fn n(v: i64) -> AttributeValue {
        AttributeValue::n(v)
    }

    #[test]
    fn test_numbers_compare_numerically() {
        assert!(matches(Some(&n(10)), &Condition::gt(n(9))).unwrap());
        assert!(matches(Some(&AttributeValue::N("10.0".into())), &Condition::eq(n(10))).unwrap());
        assert!(!matches(Some(&n(2)), &Condition::gt(n(10))).unwrap());
    }

    #[test]
    fn test_type_mismatch_never_matches() {
        assert!(!matches(Some(&s("10")), &Condition::eq(n(10))).unwrap());
        assert!(!matches(Some(&s("10")), &Condition::lt(n(20))).unwrap());
    }

    #[test]
    fn test_missing_attribute() {
        assert!(!matches(None, &Condition::eq(s("x"))).unwrap());
        assert!(matches(None, &Condition::ne(s("x"))).unwrap());
        assert!(matches(None, &Condition::null()).unwrap());
        assert!(!matches(None, &Condition::not_null()).unwrap());
    }

    #[test]
    fn test_between_is_inclusive() {
        let condition = Condition::between(n(1), n(3));
        assert!(matches(Some(&n(1)), &condition).unwrap());
        assert!(matches(Some(&n(3)), &condition).unwrap());
        assert!(!matches(Some(&n(4)), &condition).unwrap());
    }

    #[test]
    fn test_string_operators() {
        assert!(matches(Some(&s("prod-users")), &Condition::begins_with("prod-")).unwrap());
        assert!(matches(Some(&s("prod-users")), &Condition::contains(s("users"))).unwrap());
        assert!(matches(Some(&s("prod-users")), &Condition::not_contains(s("orders"))).unwrap());
    }

    #[test]
    fn test_set_contains() {
        let tags = AttributeValue::Ss(vec!["a".into(), "b".into()]);
        assert!(matches(Some(&tags), &Condition::contains(s("b"))).unwrap());
        assert!(!matches(Some(&tags), &Condition::contains(s("c"))).unwrap());
    }

    #[test]
    fn test_in_list() {
        let condition = Condition::in_list(vec![s("a"), s("b")]);
        assert!(matches(Some(&s("b")), &condition).unwrap());
        assert!(!matches(Some(&s("c")), &condition).unwrap());
    }

    #[test]
    fn test_wrong_arity_is_rejected() {
        let condition = Condition::new(ComparisonOperator::Between, vec![n(1)]);
        let err = matches(Some(&n(1)), &condition).unwrap_err();
        assert!(matches!(err, ScanError::InvalidRequest(_)));
    }
}
