use crate::form::FormState;
use std::fmt;

/// Search constraints taken from the optional form fields.
///
/// Keys are checked in a fixed order: name, promotion_type, product_id,
/// start_date, status. Values are passed through unencoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilter {
    pairs: Vec<(&'static str, String)>,
}

impl QueryFilter {
    pub fn from_form(form: &FormState) -> Self {
        let mut pairs = Vec::new();
        let candidates = [
            ("name", &form.name),
            ("promotion_type", &form.promotion_type),
            ("product_id", &form.product_id),
            ("start_date", &form.start_date),
        ];
        for (key, value) in candidates {
            if !value.is_empty() {
                pairs.push((key, value.clone()));
            }
        }
        // A blank or "false" status means "not filtering".
        if form.status == "true" {
            pairs.push(("status", "true".to_string()));
        }
        Self { pairs }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        let mut query = String::new();
        for (key, value) in &self.pairs {
            if !query.is_empty() {
                query.push('&');
            }
            query.push_str(key);
            query.push('=');
            query.push_str(value);
        }
        query
    }
}

impl fmt::Display for QueryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}
