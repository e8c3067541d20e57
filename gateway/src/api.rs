use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::debug;

use vencorpia_core::form::{parse_values, FormStatus};
use vencorpia_core::validate::{FieldError, Validate};

// Input: A submitted tool form. Unreadable bodies and unusable fields are
// answered with the same 422 envelope as failed validation.
pub struct FormValues<T>(pub T);

impl<S, T> FromRequest<S> for FormValues<T>
where
    S: Send + Sync,
    T: Validate + Default + Serialize + DeserializeOwned + Send,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                debug!("Unreadable form body: {}", rejection.body_text());
                invalid(vec![FieldError::new("body", &rejection.body_text())])
            })?;
        parse_values(body).map(FormValues).map_err(invalid)
    }
}

fn invalid(errors: Vec<FieldError>) -> Response {
    SubmitResponse::<()> {
        result: None,
        errors,
    }
    .into_response_with(FormStatus::Invalid)
}

// Output: What we send back after a tool form submit.
// `result` is always present; it is null unless the flow succeeded.
#[derive(Debug, Serialize)]
pub struct SubmitResponse<T> {
    pub result: Option<T>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl<T: Serialize> SubmitResponse<T> {
    pub fn into_response_with(self, status: FormStatus) -> Response {
        let code = match status {
            FormStatus::Succeeded => StatusCode::OK,
            FormStatus::Invalid => StatusCode::UNPROCESSABLE_ENTITY,
            // Remote failures carry no detail; the gateway log has it.
            FormStatus::Failed | FormStatus::Idle | FormStatus::Submitting => StatusCode::BAD_GATEWAY,
        };
        (code, Json(self)).into_response()
    }
}
