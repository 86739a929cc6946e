use crate::numeric::parse_int;
use crate::promotion::Promotion;
use serde::Deserialize;

/// Current value of every bound input, exactly as typed.
///
/// Deserializes from an urlencoded form body keyed by the page's element ids;
/// missing keys become empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormState {
    #[serde(rename = "promotion_id")]
    pub id: String,
    #[serde(rename = "promotion_name")]
    pub name: String,
    #[serde(rename = "promotion_type")]
    pub promotion_type: String,
    #[serde(rename = "promotion_product_id")]
    pub product_id: String,
    #[serde(rename = "promotion_start_date")]
    pub start_date: String,
    #[serde(rename = "promotion_duration")]
    pub duration: String,
    #[serde(rename = "promotion_rule")]
    pub rule: String,
    #[serde(rename = "promotion_status")]
    pub status: String,
}

impl FormState {
    /// Builds the request body for create and update.
    pub fn to_payload(&self) -> Promotion {
        Promotion {
            id: Some(parse_int(&self.id)),
            name: Some(self.name.clone()),
            promotion_type: Some(self.promotion_type.clone()),
            product_id: Some(parse_int(&self.product_id)),
            start_date: Some(self.start_date.clone()),
            duration: Some(parse_int(&self.duration)),
            rule: Some(self.rule.clone()),
            status: Some(self.status == "true"),
        }
    }

    /// Copies every field present in `promotion` into the form.
    pub fn populate(&mut self, promotion: &Promotion) {
        if let Some(id) = promotion.id {
            self.id = id.to_field_value();
        }
        if let Some(name) = &promotion.name {
            self.name = name.clone();
        }
        if let Some(promotion_type) = &promotion.promotion_type {
            self.promotion_type = promotion_type.clone();
        }
        if let Some(product_id) = promotion.product_id {
            self.product_id = product_id.to_field_value();
        }
        if let Some(start_date) = &promotion.start_date {
            self.start_date = start_date.clone();
        }
        if let Some(duration) = promotion.duration {
            self.duration = duration.to_field_value();
        }
        if let Some(rule) = &promotion.rule {
            self.rule = rule.clone();
        }
        match promotion.status {
            Some(true) => self.status = "true".to_string(),
            Some(false) => self.status = "false".to_string(),
            None => {}
        }
    }

    pub fn clear(&mut self) {
        *self = FormState::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == FormState::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::Numeric;

    fn filled() -> FormState {
        FormState {
            id: "12".into(),
            name: "Summer".into(),
            promotion_type: "PERCENTAGE_DISCOUNT".into(),
            product_id: "44".into(),
            start_date: "2024-06-01".into(),
            duration: "30".into(),
            rule: "20% off".into(),
            status: "true".into(),
        }
    }

    #[test]
    fn payload_coerces_typed_fields() {
        let payload = filled().to_payload();
        assert_eq!(payload.id, Some(Numeric::Int(12)));
        assert_eq!(payload.product_id, Some(Numeric::Int(44)));
        assert_eq!(payload.duration, Some(Numeric::Int(30)));
        assert_eq!(payload.status, Some(true));
        assert_eq!(payload.rule.as_deref(), Some("20% off"));
    }

    #[test]
    fn non_numeric_identifier_becomes_sentinel() {
        let form = FormState {
            id: "abc".into(),
            ..Default::default()
        };
        let payload = form.to_payload();
        assert_eq!(payload.id, Some(Numeric::NotANumber));
        assert_eq!(payload.product_id, Some(Numeric::NotANumber));

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json["id"].is_null());
        assert_eq!(json["name"], "");
        assert_eq!(json["status"], false);
    }

    #[test]
    fn status_is_true_only_for_exact_literal() {
        for value in ["false", "", "TRUE", "True", "yes", "1"] {
            let form = FormState {
                status: value.into(),
                ..Default::default()
            };
            assert_eq!(form.to_payload().status, Some(false), "status {:?}", value);
        }
    }

    #[test]
    fn serialize_then_populate_round_trips() {
        let typed = filled();
        let mut restored = FormState::default();
        restored.populate(&typed.to_payload());
        assert_eq!(restored, typed);

        let inactive = FormState {
            status: "false".into(),
            ..filled()
        };
        let mut restored = FormState::default();
        restored.populate(&inactive.to_payload());
        assert_eq!(restored.status, "false");
    }

    #[test]
    fn populate_leaves_absent_fields_and_unknown_status_alone() {
        let mut form = filled();
        form.populate(&Promotion {
            name: Some("Renamed".into()),
            ..Default::default()
        });
        assert_eq!(form.name, "Renamed");
        assert_eq!(form.id, "12");
        assert_eq!(form.status, "true");
    }

    #[test]
    fn clear_empties_every_field() {
        let mut form = filled();
        assert!(!form.is_empty());
        form.clear();
        assert!(form.is_empty());
        assert_eq!(form.id, "");
    }
}
