use thiserror::Error;

use crate::validate::FieldError;

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("Invalid input: {}", summarize(.0))]
    Invalid(Vec<FieldError>),

    #[error("Prompt rendering failed: {0}")]
    Template(#[from] handlebars::RenderError),

    #[error("Model call failed: {0:#}")]
    Model(anyhow::Error),

    #[error("Model output did not match the schema: {0}")]
    Output(#[from] serde_json::Error),
}

impl From<Vec<FieldError>> for FlowError {
    fn from(errors: Vec<FieldError>) -> Self {
        FlowError::Invalid(errors)
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}
