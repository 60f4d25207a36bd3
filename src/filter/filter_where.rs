use std::cmp::Ordering;

use serde_json::{Map, Value};

use super::error::FilterError;
use super::types::{FilterOp, QueryFilter};

pub struct FilterWhere;

impl FilterWhere {
    pub fn validate(filters: &[QueryFilter]) -> Result<(), FilterError> {
        for filter in filters {
            if filter.field.is_empty() || filter.field.split('.').any(str::is_empty) {
                return Err(FilterError::InvalidField(filter.field.clone()));
            }
            if filter.operator.takes_list() && !filter.value.is_array() {
                return Err(FilterError::ExpectedList {
                    field: filter.field.clone(),
                    operator: filter.operator.as_str(),
                });
            }
        }
        Ok(())
    }

    /// True when the document satisfies every filter
    pub fn matches_all(doc: &Map<String, Value>, filters: &[QueryFilter]) -> bool {
        filters.iter().all(|f| Self::matches(doc, f))
    }

    pub fn matches(doc: &Map<String, Value>, filter: &QueryFilter) -> bool {
        let field = lookup(doc, &filter.field);

        match filter.operator {
            FilterOp::Eq => field.is_some_and(|v| values_equal(v, &filter.value)),
            // Missing fields never match, same as the remote store
            FilterOp::Ne => field.is_some_and(|v| !values_equal(v, &filter.value)),
            FilterOp::Lt => compare(field, &filter.value) == Some(Ordering::Less),
            FilterOp::Lte => matches!(compare(field, &filter.value), Some(Ordering::Less | Ordering::Equal)),
            FilterOp::Gt => compare(field, &filter.value) == Some(Ordering::Greater),
            FilterOp::Gte => matches!(compare(field, &filter.value), Some(Ordering::Greater | Ordering::Equal)),
            FilterOp::In => match (field, filter.value.as_array()) {
                (Some(v), Some(list)) => list.iter().any(|c| values_equal(v, c)),
                _ => false,
            },
            FilterOp::NotIn => match (field, filter.value.as_array()) {
                (Some(v), Some(list)) => !list.iter().any(|c| values_equal(v, c)),
                _ => false,
            },
            FilterOp::ArrayContains => match field.and_then(Value::as_array) {
                Some(items) => items.iter().any(|item| values_equal(item, &filter.value)),
                None => false,
            },
            FilterOp::ArrayContainsAny => match (field.and_then(Value::as_array), filter.value.as_array()) {
                (Some(items), Some(wanted)) => items
                    .iter()
                    .any(|item| wanted.iter().any(|w| values_equal(item, w))),
                _ => false,
            },
        }
    }
}

/// Resolve a dotted path such as `dimensions.width`
pub fn lookup<'a>(doc: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut parts = path.split('.');
    let mut current = doc.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

/// Numbers compare by value so that `10` and `10.0` are equal
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

/// Ordering between two scalar values of the same kind; `None` when not comparable
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

fn compare(field: Option<&Value>, operand: &Value) -> Option<Ordering> {
    compare_values(field?, operand)
}
