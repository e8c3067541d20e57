use std::sync::Arc;

use axum::{
    extract::State,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use vencorpia_core::catalog::Dashboard;
use vencorpia_core::flows::{
    DecorFlow, DecorRecommendationsInput, DemandFlow, MenuFlow, MenuSuggestionsInput,
    VendorDemandInput,
};
use vencorpia_core::form::ToolForm;
use vencorpia_core::registry::ToolRecord;
use vencorpia_core::Flow;

use crate::api::{FormValues, SubmitResponse};

// Shared, read-only handles. Every submit builds its own form.
#[derive(Clone)]
pub struct AppState {
    pub menu: Arc<MenuFlow>,
    pub decor: Arc<DecorFlow>,
    pub demand: Arc<DemandFlow>,
    pub registry: Arc<Vec<ToolRecord>>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/dashboard", get(dashboard))
        .route("/tools", get(list_tools))
        .route("/tools/menu", post(submit_menu))
        .route("/tools/decor", post(submit_decor))
        .route("/tools/demand", post(submit_demand))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// --- HANDLERS ---

async fn health_check() -> &'static str {
    "Vencorpia Gateway: Operational"
}

async fn dashboard() -> Json<Dashboard> {
    Json(Dashboard::load())
}

async fn list_tools(State(state): State<AppState>) -> Json<Vec<ToolRecord>> {
    Json(state.registry.as_ref().clone())
}

async fn submit_menu(
    State(state): State<AppState>,
    FormValues(payload): FormValues<MenuSuggestionsInput>,
) -> Response {
    info!(
        "Menu request: {} for {} guests",
        payload.event_type, payload.number_of_guests
    );
    submit(state.menu, payload).await
}

async fn submit_decor(
    State(state): State<AppState>,
    FormValues(payload): FormValues<DecorRecommendationsInput>,
) -> Response {
    info!(
        "Decor request: {} ({} venue, {} tone)",
        payload.event_type, payload.venue_size, payload.occasion_tone
    );
    submit(state.decor, payload).await
}

async fn submit_demand(
    State(state): State<AppState>,
    FormValues(payload): FormValues<VendorDemandInput>,
) -> Response {
    info!("Demand analysis request for {}", payload.vendor_location);
    submit(state.demand, payload).await
}

async fn submit<F: Flow>(flow: Arc<F>, values: F::Input) -> Response {
    let mut form = ToolForm::new(flow);
    let status = form.submit(values).await;
    let errors = form.errors().to_vec();
    SubmitResponse {
        result: form.into_result(),
        errors,
    }
    .into_response_with(status)
}
