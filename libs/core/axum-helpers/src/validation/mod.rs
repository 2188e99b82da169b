//! Declarative per-field validation chains.
//!
//! A [`FieldChain`] names one field in the path parameters or the JSON body
//! and lists rules, each a predicate with the message reported when it fails.
//! [`run_chains`] evaluates every rule of every chain in declaration order and
//! never stops early, so one request can yield several errors for the same
//! field.
//!
//! ```ignore
//! let chains = vec![
//!     FieldChain::param("id").is_int("ID no válido"),
//!     FieldChain::body("name").not_empty("El nombre no puede ir vacío"),
//! ];
//! let errors = run_chains(&chains, &input);
//! ```

pub mod predicates;

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use utoipa::ToSchema;

/// Where a field is read from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Params,
    Body,
}

/// One failed rule, as reported to the client
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    /// Always `"field"`
    #[serde(rename = "type")]
    pub kind: String,
    /// Raw value received; omitted when the field was absent
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object, required = false)]
    pub value: Option<Value>,
    pub msg: String,
    pub path: String,
    pub location: Location,
}

impl FieldError {
    pub fn new(
        location: Location,
        path: impl Into<String>,
        value: Option<Value>,
        msg: impl Into<String>,
    ) -> Self {
        Self {
            kind: "field".to_string(),
            value,
            msg: msg.into(),
            path: path.into(),
            location,
        }
    }
}

/// Predicate over a possibly absent raw value
pub type Check = fn(Option<&Value>) -> bool;

#[derive(Clone, Debug)]
pub struct Rule {
    pub check: Check,
    pub message: &'static str,
}

/// Path parameters and parsed JSON body of one request
#[derive(Clone, Debug, Default)]
pub struct RequestInput {
    params: HashMap<String, String>,
    body: Value,
}

impl RequestInput {
    pub fn new(params: HashMap<String, String>, body: Value) -> Self {
        Self { params, body }
    }

    /// Body-only input, as seen by routes without path parameters.
    pub fn from_body(body: Value) -> Self {
        Self::new(HashMap::new(), body)
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Top-level body field. Non-object bodies have no fields.
    pub fn body_field(&self, name: &str) -> Option<&Value> {
        self.body.as_object().and_then(|fields| fields.get(name))
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    fn value(&self, location: Location, path: &str) -> Option<Value> {
        match location {
            Location::Params => self.param(path).map(|v| Value::String(v.to_string())),
            Location::Body => self.body_field(path).cloned(),
        }
    }
}

/// Ordered rules for a single field
#[derive(Clone, Debug)]
pub struct FieldChain {
    location: Location,
    path: &'static str,
    rules: Vec<Rule>,
}

impl FieldChain {
    pub fn param(path: &'static str) -> Self {
        Self::new(Location::Params, path)
    }

    pub fn body(path: &'static str) -> Self {
        Self::new(Location::Body, path)
    }

    fn new(location: Location, path: &'static str) -> Self {
        Self {
            location,
            path,
            rules: Vec::new(),
        }
    }

    pub fn is_int(self, message: &'static str) -> Self {
        self.custom(predicates::is_int, message)
    }

    pub fn not_empty(self, message: &'static str) -> Self {
        self.custom(predicates::not_empty, message)
    }

    pub fn is_numeric(self, message: &'static str) -> Self {
        self.custom(predicates::is_numeric, message)
    }

    pub fn is_boolean(self, message: &'static str) -> Self {
        self.custom(predicates::is_boolean, message)
    }

    pub fn custom(mut self, check: Check, message: &'static str) -> Self {
        self.rules.push(Rule { check, message });
        self
    }

    pub fn path(&self) -> &'static str {
        self.path
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Appends one error per failing rule.
    pub fn run(&self, input: &RequestInput, errors: &mut Vec<FieldError>) {
        let value = input.value(self.location, self.path);

        for rule in &self.rules {
            if !(rule.check)(value.as_ref()) {
                errors.push(FieldError::new(
                    self.location,
                    self.path,
                    value.clone(),
                    rule.message,
                ));
            }
        }
    }
}

/// Evaluates every chain and returns all failures in declaration order.
pub fn run_chains(chains: &[FieldChain], input: &RequestInput) -> Vec<FieldError> {
    let mut errors = Vec::new();
    for chain in chains {
        chain.run(input, &mut errors);
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn price_chain() -> FieldChain {
        FieldChain::body("price")
            .is_numeric("numeric")
            .not_empty("empty")
            .custom(predicates::is_positive, "positive")
    }

    #[test]
    fn test_all_rules_run_without_short_circuit() {
        let input = RequestInput::from_body(json!({}));
        let errors = run_chains(&[price_chain()], &input);

        let messages: Vec<_> = errors.iter().map(|e| e.msg.as_str()).collect();
        assert_eq!(messages, vec!["numeric", "empty", "positive"]);
        assert!(errors.iter().all(|e| e.value.is_none()));
    }

    #[test]
    fn test_errors_follow_chain_order() {
        let chains = vec![
            FieldChain::body("name").not_empty("name"),
            price_chain(),
        ];
        let input = RequestInput::from_body(json!({"name": "", "price": -5}));
        let errors = run_chains(&chains, &input);

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].path, "name");
        assert_eq!(errors[1].msg, "positive");
        assert_eq!(errors[1].value, Some(json!(-5)));
    }

    #[test]
    fn test_param_values_are_strings() {
        let input = RequestInput::default().with_param("id", "abc");
        let errors = run_chains(&[FieldChain::param("id").is_int("bad id")], &input);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].location, Location::Params);
        assert_eq!(errors[0].value, Some(json!("abc")));
    }

    #[test]
    fn test_passing_input_yields_no_errors() {
        let input = RequestInput::from_body(json!({"price": "12.5"}));
        assert!(run_chains(&[price_chain()], &input).is_empty());
    }

    #[test]
    fn test_non_object_body_has_no_fields() {
        let input = RequestInput::from_body(json!([1, 2]));
        assert!(input.body_field("price").is_none());
    }

    #[test]
    fn test_field_error_wire_shape() {
        let error = FieldError::new(Location::Body, "availability", Some(json!("x")), "msg");
        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            json!({
                "type": "field",
                "value": "x",
                "msg": "msg",
                "path": "availability",
                "location": "body"
            })
        );

        let absent = FieldError::new(Location::Body, "name", None, "msg");
        assert!(serde_json::to_value(&absent).unwrap().get("value").is_none());
    }
}
