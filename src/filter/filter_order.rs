use std::cmp::Ordering;

use serde_json::{Map, Value};

use super::filter_where::{compare_values, lookup};
use super::types::{OrderBy, SortDirection};

pub struct FilterOrder;

impl FilterOrder {
    /// Stable sort by each key in turn. Documents missing a key sort last.
    pub fn sort(docs: &mut [(String, Map<String, Value>)], order: &[OrderBy]) {
        if order.is_empty() {
            return;
        }
        docs.sort_by(|(_, a), (_, b)| Self::compare(a, b, order));
    }

    fn compare(a: &Map<String, Value>, b: &Map<String, Value>, order: &[OrderBy]) -> Ordering {
        for key in order {
            let ord = match (lookup(a, &key.field), lookup(b, &key.field)) {
                (Some(x), Some(y)) => {
                    let ord = compare_values(x, y).unwrap_or(Ordering::Equal);
                    match key.direction {
                        SortDirection::Asc => ord,
                        SortDirection::Desc => ord.reverse(),
                    }
                }
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}
