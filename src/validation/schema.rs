//! Field rules for travel plan requests
//!
//! Every offending field produces one violation so clients can fix a form in
//! a single round trip. Messages follow the phrasing web clients already
//! match on (`"dias" must be less than or equal to 365`).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::models::{Accommodation, Budget, Transport, TravelPlanRequest, TripType, WireEnum};

const MIN_PLACE_CHARS: usize = 2;
const MAX_PLACE_CHARS: usize = 100;
const MIN_DAYS: u16 = 1;
const MAX_DAYS: u16 = 365;

const KNOWN_FIELDS: [&str; 8] = [
    "origen",
    "destino",
    "dias",
    "tipoViaje",
    "presupuesto",
    "alojamiento",
    "transporte",
    "actividades",
];

/// A single rejected field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// All violations found in one request body
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    /// A body that could not be read as JSON at all
    #[must_use]
    pub fn malformed_body(reason: impl Into<String>) -> Self {
        Self {
            violations: vec![FieldViolation::new("body", reason)],
        }
    }

    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    #[must_use]
    pub fn into_violations(self) -> Vec<FieldViolation> {
        self.violations
    }

    /// Whether any violation names this field
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.violations.push(FieldViolation::new(field, message));
    }

    fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.violations.iter().map(|v| v.message.as_str()).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Check a sanitized body against the request schema.
///
/// Never modifies `value`; on success returns the typed request.
pub fn validate(value: &Value) -> Result<TravelPlanRequest, ValidationErrors> {
    let Some(fields) = value.as_object() else {
        let mut errors = ValidationErrors::default();
        errors.push("value", "\"value\" must be of type object");
        return Err(errors);
    };

    let mut checker = Checker {
        fields,
        errors: ValidationErrors::default(),
    };

    let origin = checker.place("origen");
    let destination = checker.place("destino");
    let days = checker.days("dias");
    let trip_type = checker.required_choice::<TripType>("tipoViaje");
    let budget = checker.required_choice::<Budget>("presupuesto");
    let accommodation = checker.optional_choice::<Accommodation>("alojamiento");
    let transport = checker.optional_choice::<Transport>("transporte");
    let activities = checker.activities("actividades");
    checker.unknown_fields();

    let Checker { errors, .. } = checker;

    match (origin, destination, days, trip_type, budget) {
        (Some(origin), Some(destination), Some(days), Some(trip_type), Some(budget))
            if errors.is_empty() =>
        {
            Ok(TravelPlanRequest {
                origin,
                destination,
                days,
                trip_type,
                budget,
                accommodation,
                transport,
                activities,
            })
        }
        _ => Err(errors),
    }
}

struct Checker<'a> {
    fields: &'a Map<String, Value>,
    errors: ValidationErrors,
}

impl<'a> Checker<'a> {
    /// A key that appears at all is checked, even when its value is `null`
    fn present(&self, key: &str) -> Option<&'a Value> {
        self.fields.get(key)
    }

    fn required(&mut self, key: &str) -> Option<&'a Value> {
        match self.fields.get(key) {
            Some(value) => Some(value),
            None => {
                self.errors.push(key, format!("\"{key}\" is required"));
                None
            }
        }
    }

    fn required_str(&mut self, key: &str) -> Option<String> {
        let value = self.required(key)?;
        match value.as_str() {
            Some(text) => Some(text.to_string()),
            None => {
                self.errors.push(key, format!("\"{key}\" must be a string"));
                None
            }
        }
    }

    fn place(&mut self, key: &str) -> Option<String> {
        let text = self.required_str(key)?;
        let chars = text.chars().count();
        if chars == 0 {
            self.errors
                .push(key, format!("\"{key}\" is not allowed to be empty"));
            None
        } else if chars < MIN_PLACE_CHARS {
            self.errors.push(
                key,
                format!("\"{key}\" length must be at least {MIN_PLACE_CHARS} characters long"),
            );
            None
        } else if chars > MAX_PLACE_CHARS {
            self.errors.push(
                key,
                format!(
                    "\"{key}\" length must be less than or equal to {MAX_PLACE_CHARS} characters long"
                ),
            );
            None
        } else {
            Some(text)
        }
    }

    fn days(&mut self, key: &str) -> Option<u16> {
        let value = self.required(key)?;
        let Some(number) = value.as_f64() else {
            self.errors.push(key, format!("\"{key}\" must be a number"));
            return None;
        };

        if number.fract() != 0.0 {
            self.errors.push(key, format!("\"{key}\" must be an integer"));
            None
        } else if number < f64::from(MIN_DAYS) {
            self.errors.push(
                key,
                format!("\"{key}\" must be greater than or equal to {MIN_DAYS}"),
            );
            None
        } else if number > f64::from(MAX_DAYS) {
            self.errors.push(
                key,
                format!("\"{key}\" must be less than or equal to {MAX_DAYS}"),
            );
            None
        } else {
            // In range and integral, so the cast is exact.
            Some(number as u16)
        }
    }

    fn choice<T: WireEnum>(&mut self, key: &str, value: &Value) -> Option<T> {
        let parsed = value.as_str().and_then(T::from_wire);
        if parsed.is_none() {
            self.errors.push(
                key,
                format!("\"{key}\" must be one of [{}]", T::allowed()),
            );
        }
        parsed
    }

    fn required_choice<T: WireEnum>(&mut self, key: &str) -> Option<T> {
        let value = self.required(key)?;
        self.choice(key, value)
    }

    fn optional_choice<T: WireEnum>(&mut self, key: &str) -> Option<T> {
        let value = self.present(key)?;
        self.choice(key, value)
    }

    fn activities(&mut self, key: &str) -> Option<Vec<String>> {
        let value = self.present(key)?;
        let Some(items) = value.as_array() else {
            self.errors.push(key, format!("\"{key}\" must be an array"));
            return None;
        };

        let mut activities = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item.as_str() {
                Some(text) => activities.push(text.to_string()),
                None => self.errors.push(
                    format!("{key}.{index}"),
                    format!("\"{key}[{index}]\" must be a string"),
                ),
            }
        }
        Some(activities)
    }

    fn unknown_fields(&mut self) {
        let unknown: Vec<String> = self
            .fields
            .keys()
            .filter(|key| !KNOWN_FIELDS.contains(&key.as_str()))
            .cloned()
            .collect();
        for key in unknown {
            self.errors.push(&key, format!("\"{key}\" is not allowed"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn valid_body() -> Value {
        json!({
            "origen": "Madrid",
            "destino": "París",
            "dias": 5,
            "tipoViaje": "familia",
            "presupuesto": "medio"
        })
    }

    fn with(field: &str, value: Value) -> Value {
        let mut body = valid_body();
        body[field] = value;
        body
    }

    fn message_for(errors: &ValidationErrors, field: &str) -> String {
        errors
            .violations()
            .iter()
            .find(|v| v.field == field)
            .map(|v| v.message.clone())
            .unwrap_or_default()
    }

    #[test]
    fn test_accepts_valid_body() {
        let request = validate(&valid_body()).unwrap();
        assert_eq!(request.origin, "Madrid");
        assert_eq!(request.destination, "París");
        assert_eq!(request.days, 5);
        assert_eq!(request.trip_type, TripType::Family);
        assert_eq!(request.budget, Budget::Medium);
        assert!(request.accommodation.is_none());
    }

    #[test]
    fn test_accepts_optional_fields() {
        let mut body = valid_body();
        body["alojamiento"] = json!("hotel");
        body["transporte"] = json!("vuelo");
        body["actividades"] = json!(["museos", "parques"]);

        let request = validate(&body).unwrap();

        assert_eq!(request.accommodation, Some(Accommodation::Hotel));
        assert_eq!(request.transport, Some(Transport::Flight));
        assert_eq!(
            request.activities,
            Some(vec!["museos".to_string(), "parques".to_string()])
        );
    }

    #[test]
    fn test_reports_every_missing_field() {
        let errors = validate(&json!({ "origen": "M" })).unwrap_err();

        for field in ["origen", "destino", "dias", "tipoViaje", "presupuesto"] {
            assert!(errors.has_field(field), "missing violation for {field}");
        }
        assert!(message_for(&errors, "destino").contains("required"));
        assert!(message_for(&errors, "origen").contains("at least 2 characters"));
    }

    #[rstest]
    #[case("tipoViaje", json!("invalid_type"))]
    #[case("presupuesto", json!("invalid_budget"))]
    #[case("alojamiento", json!("invalid_accommodation"))]
    #[case("transporte", json!("invalid_transport"))]
    #[case("tipoViaje", json!(3))]
    fn test_rejects_values_outside_enum(#[case] field: &str, #[case] value: Value) {
        let errors = validate(&with(field, value)).unwrap_err();
        assert_eq!(errors.violations().len(), 1);
        assert!(message_for(&errors, field).contains("must be one of"));
    }

    #[rstest]
    #[case(json!(0), "greater than or equal to 1")]
    #[case(json!(366), "less than or equal to 365")]
    #[case(json!(500), "less than or equal to 365")]
    #[case(json!(-3), "greater than or equal to 1")]
    #[case(json!(2.5), "must be an integer")]
    #[case(json!("5"), "must be a number")]
    fn test_rejects_bad_days(#[case] days: Value, #[case] expected: &str) {
        let errors = validate(&with("dias", days)).unwrap_err();
        assert!(errors.has_field("dias"));
        assert!(message_for(&errors, "dias").contains(expected));
    }

    #[rstest]
    #[case(1)]
    #[case(365)]
    fn test_accepts_day_bounds(#[case] days: u16) {
        let request = validate(&with("dias", json!(days))).unwrap();
        assert_eq!(request.days, days);
    }

    #[test]
    fn test_place_length_counts_characters() {
        assert!(validate(&with("destino", json!("Åå"))).is_ok());

        let long = "x".repeat(101);
        let errors = validate(&with("origen", json!(long))).unwrap_err();
        assert!(message_for(&errors, "origen").contains("less than or equal to 100"));
        assert!(validate(&with("origen", json!("x".repeat(100)))).is_ok());
    }

    #[test]
    fn test_rejects_short_places_together() {
        let mut body = valid_body();
        body["origen"] = json!("M");
        body["destino"] = json!("P");

        let errors = validate(&body).unwrap_err();

        assert!(message_for(&errors, "origen").contains("at least 2 characters"));
        assert!(message_for(&errors, "destino").contains("at least 2 characters"));
    }

    #[rstest]
    #[case::accommodation("alojamiento", "must be one of")]
    #[case::transport("transporte", "must be one of")]
    #[case::activities("actividades", "must be an array")]
    fn test_null_optionals_are_rejected(#[case] field: &str, #[case] message: &str) {
        let errors = validate(&with(field, Value::Null)).unwrap_err();

        assert_eq!(errors.violations().len(), 1);
        assert!(message_for(&errors, field).contains(message));
    }

    #[test]
    fn test_omitted_optionals_are_absent() {
        let request = validate(&valid_body()).unwrap();
        assert!(request.accommodation.is_none());
        assert!(request.transport.is_none());
        assert!(request.activities.is_none());
    }

    #[test]
    fn test_rejects_non_string_activity() {
        let errors = validate(&with("actividades", json!(["museos", 7]))).unwrap_err();
        assert!(errors.has_field("actividades.1"));

        let errors = validate(&with("actividades", json!("museos"))).unwrap_err();
        assert!(message_for(&errors, "actividades").contains("must be an array"));
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let errors = validate(&with("presupuestoMaximo", json!(900))).unwrap_err();
        assert_eq!(
            message_for(&errors, "presupuestoMaximo"),
            "\"presupuestoMaximo\" is not allowed"
        );
    }

    #[test]
    fn test_rejects_non_object_body() {
        let errors = validate(&json!(["Madrid"])).unwrap_err();
        assert!(errors.has_field("value"));
    }

    #[test]
    fn test_does_not_mutate_input() {
        let body = json!({ "origen": "M", "dias": 900 });
        let before = body.clone();
        let _ = validate(&body);
        assert_eq!(body, before);
    }
}
