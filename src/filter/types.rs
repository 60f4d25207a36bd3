use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Comparison operators understood by the document store query API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOp {
    #[serde(rename = "==")] Eq,
    #[serde(rename = "!=")] Ne,
    #[serde(rename = "<")] Lt,
    #[serde(rename = "<=")] Lte,
    #[serde(rename = ">")] Gt,
    #[serde(rename = ">=")] Gte,

    #[serde(rename = "in")] In,
    #[serde(rename = "not-in")] NotIn,

    #[serde(rename = "array-contains")] ArrayContains,
    #[serde(rename = "array-contains-any")] ArrayContainsAny,
}

impl FilterOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Eq => "==",
            FilterOp::Ne => "!=",
            FilterOp::Lt => "<",
            FilterOp::Lte => "<=",
            FilterOp::Gt => ">",
            FilterOp::Gte => ">=",
            FilterOp::In => "in",
            FilterOp::NotIn => "not-in",
            FilterOp::ArrayContains => "array-contains",
            FilterOp::ArrayContainsAny => "array-contains-any",
        }
    }

    /// Operators whose operand must be a JSON array
    pub fn takes_list(&self) -> bool {
        matches!(self, FilterOp::In | FilterOp::NotIn | FilterOp::ArrayContainsAny)
    }
}

/// A single `field <op> value` condition. Dotted fields address nested maps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryFilter {
    pub field: String,
    pub operator: FilterOp,
    pub value: Value,
}

impl QueryFilter {
    pub fn new(field: impl Into<String>, operator: FilterOp, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::Eq, value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

/// Filter set sent to the document store. Filters are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryOptions {
    #[serde(default)]
    pub filters: Vec<QueryFilter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<OrderBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}
