use metrics_exporter_prometheus::PrometheusHandle;
use smart_quote::config::QuoteConfig;
use smart_quote::quote::{EvaluationPipeline, Summarizer, Vendor};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) pipeline: Arc<EvaluationPipeline>,
    pub(crate) summarizer: Arc<Summarizer>,
    pub(crate) vendors: Arc<Vec<Vendor>>,
    pub(crate) quote: Arc<QuoteConfig>,
}

/// Presentation rounding for money fields.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Presentation rounding for distances.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_helpers_truncate_to_presentation_precision() {
        assert_eq!(round2(1234.5678), 1234.57);
        assert_eq!(round2(99.999), 100.0);
        assert_eq!(round1(10.74), 10.7);
    }
}
