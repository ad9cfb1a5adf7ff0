use super::costing::{self, CostModel, PriceLookup, StandardPriceBook};
use super::domain::{LineItem, ProjectContext, Vendor};
use super::ranking::{rank_candidates, Candidate, RankWeights, RankedCandidate};
use super::routing::{RouteEstimator, TravelConditions};
use crate::config::QuoteConfig;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Shortlist length handed back to callers.
pub const DEFAULT_SHORTLIST_SIZE: usize = 5;

/// Per-vendor evaluation fanned out over tokio tasks, joined, then ranked.
///
/// Vendors have no data dependency on each other, so each task runs its
/// route lookup (one bounded outbound call, fallback on failure) and cost
/// assembly independently. Ranking needs the full candidate set for
/// normalization and runs single-threaded after the join barrier.
#[derive(Debug, Clone)]
pub struct EvaluationPipeline<P = StandardPriceBook> {
    routes: RouteEstimator,
    costs: CostModel<P>,
    weights: RankWeights,
    shortlist_size: usize,
}

impl EvaluationPipeline<StandardPriceBook> {
    /// Build a pipeline with the standard price book from service
    /// configuration.
    pub fn from_config(config: &QuoteConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(
            RouteEstimator::new(config.routing_url.clone())?,
            CostModel::new(StandardPriceBook::default(), config.gst_pct),
        ))
    }
}

impl<P: PriceLookup> EvaluationPipeline<P> {
    pub fn new(routes: RouteEstimator, costs: CostModel<P>) -> Self {
        Self {
            routes,
            costs,
            weights: RankWeights::default(),
            shortlist_size: DEFAULT_SHORTLIST_SIZE,
        }
    }

    pub fn with_weights(mut self, weights: RankWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_shortlist_size(mut self, size: usize) -> Self {
        self.shortlist_size = size;
        self
    }

    /// Evaluate every vendor and return the full ranked list, best first.
    pub async fn evaluate(
        &self,
        project: &ProjectContext,
        items: &[LineItem],
        vendors: &[Vendor],
        conditions: TravelConditions,
    ) -> Vec<RankedCandidate> {
        // Material-side costs do not depend on the vendor; compute once.
        let material_cost = self.costs.material_cost(items);
        let taxes = self.costs.taxes(material_cost);
        let handling = self.costs.handling(material_cost);
        let weight_tons = costing::total_weight_tons(items);
        let origin = project.site;

        let mut tasks = JoinSet::new();
        for (index, vendor) in vendors.iter().cloned().enumerate() {
            let routes = self.routes.clone();
            tasks.spawn(async move {
                let route = routes.estimate(origin, vendor.location, conditions).await;
                let freight_cost = costing::freight_cost(
                    route.distance_km,
                    weight_tons,
                    vendor.freight_rate_per_ton_km,
                    0.0,
                );
                let candidate = Candidate {
                    vendor_id: vendor.id,
                    vendor_name: vendor.name,
                    distance_km: route.distance_km,
                    eta_minutes: route.eta_minutes,
                    on_time_rate: vendor.on_time_rate,
                    quality_score: vendor.quality_score,
                    acceptance_prob: vendor.acceptance_prob,
                    material_cost,
                    freight_cost,
                    taxes,
                    handling,
                    price_volatility: vendor.price_volatility,
                };
                (index, candidate, route.source)
            });
        }

        // Join barrier: collect by index so ranking sees directory order
        // regardless of task completion order, keeping tie-breaks stable.
        let mut slots: Vec<Option<Candidate>> = (0..vendors.len()).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, candidate, source)) => {
                    info!(
                        vendor = %candidate.vendor_name,
                        distance_km = candidate.distance_km,
                        eta_minutes = candidate.eta_minutes,
                        source = source.as_str(),
                        "vendor evaluated"
                    );
                    slots[index] = Some(candidate);
                }
                Err(err) => warn!(error = %err, "vendor evaluation task aborted"),
            }
        }
        let candidates: Vec<Candidate> = slots.into_iter().flatten().collect();

        rank_candidates(candidates, &self.weights)
    }

    /// Evaluate and truncate to the shortlist length.
    pub async fn shortlist(
        &self,
        project: &ProjectContext,
        items: &[LineItem],
        vendors: &[Vendor],
        conditions: TravelConditions,
    ) -> Vec<RankedCandidate> {
        let mut ranked = self.evaluate(project, items, vendors, conditions).await;
        ranked.truncate(self.shortlist_size);
        ranked
    }
}
