//! The quotation core: route estimation, landed-cost modeling, and
//! multi-criteria vendor ranking.
//!
//! The pipeline never fails under normal operation: a routing-backend
//! outage degrades to a geometric fallback, unknown skus price at a
//! documented default, and degenerate ranking inputs contribute zero
//! rather than dividing by zero.

pub mod costing;
pub mod directory;
pub mod domain;
pub mod geo;
pub mod invoice;
pub mod pipeline;
pub mod ranking;
pub mod routing;
pub mod summary;

pub use costing::{CostModel, PriceLookup, StandardPriceBook};
pub use domain::{GeoPoint, LineItem, ProjectContext, Vendor};
pub use pipeline::EvaluationPipeline;
pub use ranking::{rank_candidates, Candidate, RankWeights, RankedCandidate};
pub use routing::{RouteEstimate, RouteEstimator, RouteSource, TravelConditions};
pub use summary::Summarizer;
