use crate::infra::{round1, round2, AppState};
use crate::intake;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::json;
use smart_quote::error::AppError;
use smart_quote::quote::invoice::{ChosenOffer, InvoiceDocument, InvoiceLine};
use smart_quote::quote::{GeoPoint, LineItem, ProjectContext, RankedCandidate, TravelConditions};

pub(crate) fn router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/health/ai", get(ai_health_endpoint))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/quote/prepare", post(prepare_endpoint))
        .route("/api/v1/quote/prepare-simple", post(prepare_simple_endpoint))
        .route("/api/v1/quote/invoice", post(invoice_endpoint))
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub(crate) struct ProjectIn {
    pub(crate) brief: String,
    pub(crate) site_name: String,
    pub(crate) site_lat: f64,
    pub(crate) site_lng: f64,
    #[serde(default = "default_delivery_window")]
    pub(crate) delivery_window_days: u32,
}

fn default_delivery_window() -> u32 {
    14
}

impl ProjectIn {
    fn to_domain(&self) -> ProjectContext {
        ProjectContext {
            brief: self.brief.clone(),
            site_name: self.site_name.clone(),
            site: GeoPoint::new(self.site_lat, self.site_lng),
            delivery_window_days: self.delivery_window_days,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub(crate) struct ItemIn {
    pub(crate) sku: String,
    #[serde(default)]
    pub(crate) desc: String,
    pub(crate) qty: f64,
    #[serde(default)]
    pub(crate) unit_price: Option<f64>,
    #[serde(default)]
    pub(crate) weight_ton: f64,
}

impl ItemIn {
    fn to_domain(&self) -> LineItem {
        LineItem {
            sku: self.sku.clone(),
            desc: self.desc.clone(),
            qty: self.qty,
            unit_price: self.unit_price,
            weight_ton: self.weight_ton,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PrepareRequest {
    pub(crate) project: ProjectIn,
    pub(crate) items: Vec<ItemIn>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SimplePrepareRequest {
    pub(crate) project_type: String,
    pub(crate) address: String,
    pub(crate) materials: Vec<String>,
    #[serde(default)]
    pub(crate) quantity: Option<String>,
    #[serde(default)]
    pub(crate) site_lat: Option<f64>,
    #[serde(default)]
    pub(crate) site_lng: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CostBreakdownOut {
    pub(crate) material: f64,
    pub(crate) freight: f64,
    pub(crate) taxes: f64,
    pub(crate) handling: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CandidateOut {
    pub(crate) vendor_id: u32,
    pub(crate) vendor_name: String,
    pub(crate) landed_cost: f64,
    pub(crate) breakdown: CostBreakdownOut,
    pub(crate) eta_minutes: i64,
    pub(crate) on_time_rate: f64,
    pub(crate) quality_score: f64,
    pub(crate) acceptance_prob: f64,
    pub(crate) distance_km: f64,
}

impl CandidateOut {
    /// Presentation precision is applied here, at the edge; the core keeps
    /// full-precision numbers.
    fn from_ranked(entry: &RankedCandidate) -> Self {
        let c = &entry.candidate;
        Self {
            vendor_id: c.vendor_id,
            vendor_name: c.vendor_name.clone(),
            landed_cost: round2(c.landed_cost()),
            breakdown: CostBreakdownOut {
                material: round2(c.material_cost),
                freight: round2(c.freight_cost),
                taxes: round2(c.taxes),
                handling: round2(c.handling),
            },
            eta_minutes: c.eta_minutes as i64,
            on_time_rate: round2(c.on_time_rate),
            quality_score: round2(c.quality_score),
            acceptance_prob: round2(c.acceptance_prob),
            distance_km: round1(c.distance_km),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct PrepareResponse {
    pub(crate) summary: String,
    pub(crate) candidates: Vec<CandidateOut>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InvoiceRequest {
    pub(crate) project: ProjectIn,
    pub(crate) chosen_candidate: CandidateOut,
    pub(crate) items: Vec<ItemIn>,
}

#[derive(Debug, Serialize)]
pub(crate) struct InvoiceResponse {
    #[serde(flatten)]
    pub(crate) document: InvoiceDocument,
    pub(crate) file_path: String,
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Operability probe: reports whether a summarizer API key is configured,
/// without revealing it.
pub(crate) async fn ai_health_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<serde_json::Value> {
    Json(json!({ "ai_key_present": state.quote.summary_api_key.is_some() }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

async fn prepare(state: &AppState, project: ProjectContext, items: Vec<LineItem>) -> PrepareResponse {
    let shortlist = state
        .pipeline
        .shortlist(&project, &items, &state.vendors, TravelConditions::default())
        .await;

    let summary = state
        .summarizer
        .summarize(&project.brief, &project.site_name, &shortlist)
        .await;

    PrepareResponse {
        summary,
        candidates: shortlist.iter().map(CandidateOut::from_ranked).collect(),
    }
}

pub(crate) async fn prepare_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<PrepareRequest>,
) -> Json<PrepareResponse> {
    let project = payload.project.to_domain();
    let items: Vec<LineItem> = payload.items.iter().map(ItemIn::to_domain).collect();
    Json(prepare(&state, project, items).await)
}

pub(crate) async fn prepare_simple_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<SimplePrepareRequest>,
) -> Json<PrepareResponse> {
    let site = match (payload.site_lat, payload.site_lng) {
        (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
        _ => None,
    };
    let (project, items) = intake::structured_request(
        &payload.project_type,
        &payload.address,
        &payload.materials,
        payload.quantity.as_deref(),
        site,
    );
    Json(prepare(&state, project, items).await)
}

pub(crate) async fn invoice_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<InvoiceRequest>,
) -> Result<Json<InvoiceResponse>, AppError> {
    let lines: Vec<InvoiceLine> = payload
        .items
        .iter()
        .map(|item| {
            InvoiceLine::new(
                item.sku.clone(),
                item.desc.clone(),
                item.qty,
                item.unit_price.unwrap_or(0.0),
            )
        })
        .collect();

    let chosen = &payload.chosen_candidate;
    let offer = ChosenOffer {
        vendor_name: chosen.vendor_name.clone(),
        freight: chosen.breakdown.freight,
        taxes: chosen.breakdown.taxes,
        eta_minutes: chosen.eta_minutes as f64,
        distance_km: chosen.distance_km,
    };

    let document = InvoiceDocument::build(
        &payload.project.site_name,
        lines,
        &offer,
        Local::now().date_naive(),
    );
    let file_path = document.write_html(&state.quote.invoice_dir)?;

    Ok(Json(InvoiceResponse {
        document,
        file_path: file_path.display().to_string(),
    }))
}
