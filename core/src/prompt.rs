use std::marker::PhantomData;

use handlebars::Handlebars;
use schemars::JsonSchema;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::FlowError;
use crate::llm::{CompiledPrompt, PromptExecutor};

/// A named prompt template bound to its input and output records.
///
/// Templates use handlebars `{{{field}}}` placeholders keyed by the input's
/// serialized (camelCase) field names. Rendering is strict: a placeholder with
/// no matching field fails instead of rendering as empty text.
pub struct Prompt<I, O> {
    name: &'static str,
    template: &'static str,
    _types: PhantomData<fn(&I) -> O>,
}

impl<I, O> Prompt<I, O>
where
    I: Serialize,
    O: DeserializeOwned + JsonSchema,
{
    pub const fn new(name: &'static str, template: &'static str) -> Self {
        Self {
            name,
            template,
            _types: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn render(&self, input: &I) -> Result<String, FlowError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);

        let mut data = serde_json::to_value(input)?;
        whole_numbers_as_integers(&mut data);
        Ok(registry.render_template(self.template, &data)?)
    }

    pub fn output_schema(&self) -> Value {
        json_schema::<O>()
    }

    /// Renders the template, runs it once and coerces the reply into `O`.
    pub async fn call(&self, executor: &dyn PromptExecutor, input: &I) -> Result<O, FlowError> {
        let compiled = CompiledPrompt {
            name: self.name.to_string(),
            text: self.render(input)?,
            output_schema: self.output_schema(),
        };

        let raw = executor
            .execute(&compiled)
            .await
            .map_err(FlowError::Model)?;
        debug!("Prompt '{}' answered", self.name);

        Ok(serde_json::from_value(raw)?)
    }
}

// Handlebars prints every f64 with a fraction (`1000.0`); people write `1000`.
fn whole_numbers_as_integers(value: &mut Value) {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    match value {
        Value::Number(n) if !n.is_i64() && !n.is_u64() => {
            let whole = n
                .as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < MAX_EXACT);
            if let Some(f) = whole {
                *value = Value::from(f as i64);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(whole_numbers_as_integers),
        Value::Object(fields) => fields.values_mut().for_each(whole_numbers_as_integers),
        _ => {}
    }
}

/// JSON Schema for `T`, without the `$schema` marker some endpoints reject.
pub fn json_schema<T: JsonSchema>() -> Value {
    let mut schema = serde_json::to_value(schemars::schema_for!(T)).unwrap_or_default();
    if let Some(object) = schema.as_object_mut() {
        object.remove("$schema");
    }
    schema
}
