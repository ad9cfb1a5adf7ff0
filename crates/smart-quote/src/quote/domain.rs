use serde::{Deserialize, Serialize};

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A supplier record from the vendor directory. Read-only input to the
/// evaluation pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: u32,
    pub name: String,
    pub location: GeoPoint,
    /// Historical on-time delivery rate, 0..=1.
    pub on_time_rate: f64,
    /// Inspection pass rate, 0..=1.
    pub quality_score: f64,
    /// Likelihood the vendor accepts an order of this shape, 0..=1.
    pub acceptance_prob: f64,
    /// Freight rate in currency units per ton-kilometer.
    pub freight_rate_per_ton_km: f64,
    /// Historical price swing exposure; feeds the landed-cost risk buffer.
    pub price_volatility: f64,
}

/// One requested material line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub sku: String,
    #[serde(default)]
    pub desc: String,
    pub qty: f64,
    /// Explicit unit price; when absent the price book is consulted.
    #[serde(default)]
    pub unit_price: Option<f64>,
    #[serde(default)]
    pub weight_ton: f64,
}

/// The procurement request context shared by every vendor evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectContext {
    pub brief: String,
    pub site_name: String,
    pub site: GeoPoint,
    /// Informational only; ranking does not consume it.
    #[serde(default = "default_delivery_window_days")]
    pub delivery_window_days: u32,
}

fn default_delivery_window_days() -> u32 {
    14
}
