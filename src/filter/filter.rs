use serde_json::{Map, Value};

use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::types::QueryOptions;

/// Evaluates a `QueryOptions` filter set against in-process documents
pub struct Filter {
    options: QueryOptions,
}

impl Filter {
    pub fn new(options: QueryOptions) -> Result<Self, FilterError> {
        FilterWhere::validate(&options.filters)?;
        Ok(Self { options })
    }

    /// Filter, sort, then paginate
    pub fn apply(&self, docs: Vec<(String, Map<String, Value>)>) -> Vec<(String, Map<String, Value>)> {
        let mut matched: Vec<_> = docs
            .into_iter()
            .filter(|(_, data)| FilterWhere::matches_all(data, &self.options.filters))
            .collect();

        FilterOrder::sort(&mut matched, &self.options.order_by);

        let offset = self.options.offset.unwrap_or(0);
        let limit = self.options.limit.unwrap_or(usize::MAX);
        matched.into_iter().skip(offset).take(limit).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{OrderBy, QueryFilter, SortDirection};
    use serde_json::json;

    fn docs() -> Vec<(String, Map<String, Value>)> {
        vec![
            ("a".to_string(), json!({"subdomain": "acme", "filter_price": 30}).as_object().cloned().unwrap()),
            ("b".to_string(), json!({"subdomain": "acme", "filter_price": 10}).as_object().cloned().unwrap()),
            ("c".to_string(), json!({"subdomain": "other", "filter_price": 5}).as_object().cloned().unwrap()),
            ("d".to_string(), json!({"subdomain": "acme", "filter_price": 20}).as_object().cloned().unwrap()),
        ]
    }

    fn ids(out: &[(String, Map<String, Value>)]) -> Vec<&str> {
        out.iter().map(|(id, _)| id.as_str()).collect()
    }

    #[test]
    fn filters_sorts_and_paginates() {
        let filter = Filter::new(QueryOptions {
            filters: vec![QueryFilter::eq("subdomain", "acme")],
            order_by: vec![OrderBy { field: "filter_price".into(), direction: SortDirection::Desc }],
            limit: Some(2),
            offset: Some(1),
        })
        .unwrap();

        assert_eq!(ids(&filter.apply(docs())), vec!["d", "b"]);
    }

    #[test]
    fn unordered_keeps_input_order() {
        let filter = Filter::new(QueryOptions {
            filters: vec![QueryFilter::eq("subdomain", "acme")],
            ..Default::default()
        })
        .unwrap();
        assert_eq!(ids(&filter.apply(docs())), vec!["a", "b", "d"]);
    }
}
