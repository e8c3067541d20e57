use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use tracing::{error, info};

use crate::flows::Flow;
use crate::validate::{FieldError, Validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Submitting,
    Succeeded,
    Failed,
    Invalid,
}

/// One tool form: current values, field errors, last result and loading flag.
///
/// Submitting validates locally first; invalid values never reach the flow.
/// A failed flow call is logged and leaves the result empty.
pub struct ToolForm<F: Flow> {
    flow: Arc<F>,
    values: F::Input,
    errors: Vec<FieldError>,
    result: Option<F::Output>,
    loading: bool,
    failed: bool,
}

impl<F: Flow> ToolForm<F> {
    pub fn new(flow: Arc<F>) -> Self {
        Self {
            flow,
            values: F::Input::default(),
            errors: Vec::new(),
            result: None,
            loading: false,
            failed: false,
        }
    }

    pub fn values(&self) -> &F::Input {
        &self.values
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn result(&self) -> Option<&F::Output> {
        self.result.as_ref()
    }

    pub fn into_result(self) -> Option<F::Output> {
        self.result
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn status(&self) -> FormStatus {
        if self.loading {
            FormStatus::Submitting
        } else if !self.errors.is_empty() {
            FormStatus::Invalid
        } else if self.result.is_some() {
            FormStatus::Succeeded
        } else if self.failed {
            FormStatus::Failed
        } else {
            FormStatus::Idle
        }
    }

    pub async fn submit(&mut self, values: F::Input) -> FormStatus {
        self.values = values;

        if let Err(errors) = self.values.validate() {
            self.errors = errors;
            return self.status();
        }
        self.errors.clear();

        self.result = None;
        self.failed = false;
        self.loading = true;

        match self.flow.run(self.values.clone()).await {
            Ok(output) => {
                info!("{} completed", self.flow.name());
                self.result = Some(output);
            }
            Err(e) => {
                error!("{} failed: {}", self.flow.name(), e);
                self.failed = true;
            }
        }

        self.loading = false;
        self.status()
    }
}

/// Reads submitted form values without stopping at the first bad field.
///
/// A missing, null or mistyped field is swapped for an empty placeholder and
/// the whole record is validated, so every unusable field is reported under
/// its own name with its usual message. Numbers typed as text ("50") are read
/// as numbers.
pub fn parse_values<T>(body: Value) -> Result<T, Vec<FieldError>>
where
    T: Validate + Default + Serialize + DeserializeOwned,
{
    let Value::Object(submitted) = body else {
        return Err(vec![FieldError::new("body", "Expected a JSON object.")]);
    };
    let defaults = match serde_json::to_value(T::default()) {
        Ok(Value::Object(defaults)) => defaults,
        _ => return Err(vec![FieldError::new("body", "Form has no fields.")]),
    };

    let mut merged = defaults.clone();
    let mut unusable = Vec::new();
    for (field, default) in &defaults {
        let accepted = submitted
            .get(field)
            .and_then(|raw| readings(raw).into_iter().find(|v| fits::<T>(&defaults, field, v)));
        match accepted {
            Some(value) => {
                merged.insert(field.clone(), value);
            }
            None => {
                merged.insert(field.clone(), placeholder(default));
                unusable.push(field.clone());
            }
        }
    }

    let values: T = serde_json::from_value(Value::Object(merged))
        .map_err(|e| vec![FieldError::new("body", &e.to_string())])?;
    if unusable.is_empty() {
        return Ok(values);
    }

    let mut errors = values.validate().err().unwrap_or_default();
    for field in unusable {
        if !errors.iter().any(|e| e.field == field) {
            errors.push(FieldError::new(&field, "Invalid value."));
        }
    }
    Err(errors)
}

fn fits<T: DeserializeOwned>(defaults: &Map<String, Value>, field: &str, value: &Value) -> bool {
    let mut trial = defaults.clone();
    trial.insert(field.to_string(), value.clone());
    serde_json::from_value::<T>(Value::Object(trial)).is_ok()
}

// The value as sent, then as a number when it is numeric text or a whole float.
fn readings(raw: &Value) -> Vec<Value> {
    let mut readings = vec![raw.clone()];
    match raw {
        Value::String(text) => {
            let text = text.trim();
            if let Ok(n) = text.parse::<i64>() {
                readings.push(Value::from(n));
            } else if let Some(n) = text.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
                readings.push(Value::Number(n));
            }
        }
        Value::Number(n) => {
            if let Some(f) = n.as_f64().filter(|f| f.fract() == 0.0 && !n.is_i64() && !n.is_u64()) {
                readings.push(Value::from(f as i64));
            }
        }
        _ => {}
    }
    readings
}

fn placeholder(default: &Value) -> Value {
    match default {
        Value::Number(_) => Value::from(0),
        Value::String(_) => Value::String(String::new()),
        Value::Bool(_) => Value::Bool(false),
        Value::Array(_) => Value::Array(Vec::new()),
        _ => Value::Null,
    }
}
