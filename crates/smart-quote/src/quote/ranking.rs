use serde::Serialize;
use std::cmp::Ordering;

/// Two criterion values closer than this are treated as identical, and a
/// criterion whose whole vector collapses this way contributes zero to
/// every composite score instead of dividing by zero.
const NORMALIZATION_TOLERANCE: f64 = 1e-9;

/// One vendor's evaluated offer. Ephemeral: built fresh per evaluation,
/// never mutated, discarded with the response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub vendor_id: u32,
    pub vendor_name: String,
    pub distance_km: f64,
    pub eta_minutes: f64,
    pub on_time_rate: f64,
    pub quality_score: f64,
    pub acceptance_prob: f64,
    pub material_cost: f64,
    pub freight_cost: f64,
    pub taxes: f64,
    pub handling: f64,
    pub price_volatility: f64,
}

impl Candidate {
    /// Exposure to price swings: 2% of material plus a volatility charge.
    pub fn risk_buffer(&self) -> f64 {
        0.02 * self.material_cost + 100.0 * self.price_volatility
    }

    pub fn landed_cost(&self) -> f64 {
        self.material_cost + self.freight_cost + self.taxes + self.handling + self.risk_buffer()
    }
}

/// Composite weights over the four ranking criteria. Callers supplying
/// their own weights are responsible for keeping the sum at 1.0 so scores
/// stay comparable across evaluations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankWeights {
    pub price: f64,
    pub eta: f64,
    pub sla: f64,
    pub acceptance: f64,
}

impl Default for RankWeights {
    fn default() -> Self {
        Self {
            price: 0.55,
            eta: 0.20,
            sla: 0.15,
            acceptance: 0.10,
        }
    }
}

/// A candidate with its composite score. Lower is better.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    pub candidate: Candidate,
    pub score: f64,
}

fn min_max_normalize(values: &[f64]) -> Vec<f64> {
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if hi - lo < NORMALIZATION_TOLERANCE {
        return vec![0.0; values.len()];
    }
    values.iter().map(|value| (value - lo) / (hi - lo)).collect()
}

/// Totally order candidates best-first by weighted normalized score.
///
/// The sort is stable, so exact score ties keep input order. An empty
/// input yields an empty result rather than an error.
pub fn rank_candidates(candidates: Vec<Candidate>, weights: &RankWeights) -> Vec<RankedCandidate> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let landed: Vec<f64> = candidates.iter().map(Candidate::landed_cost).collect();
    let eta: Vec<f64> = candidates.iter().map(|c| c.eta_minutes).collect();
    let lateness: Vec<f64> = candidates.iter().map(|c| 1.0 - c.on_time_rate).collect();
    let rejection: Vec<f64> = candidates.iter().map(|c| 1.0 - c.acceptance_prob).collect();

    let landed = min_max_normalize(&landed);
    let eta = min_max_normalize(&eta);
    let lateness = min_max_normalize(&lateness);
    let rejection = min_max_normalize(&rejection);

    let mut ranked: Vec<RankedCandidate> = candidates
        .into_iter()
        .enumerate()
        .map(|(i, candidate)| RankedCandidate {
            candidate,
            score: weights.price * landed[i]
                + weights.eta * eta[i]
                + weights.sla * lateness[i]
                + weights.acceptance * rejection[i],
        })
        .collect();

    ranked.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal));
    ranked
}
