use super::domain::LineItem;
use std::collections::HashMap;

/// Price used for skus the price book does not know.
pub const DEFAULT_UNIT_PRICE: f64 = 1000.0;

/// Floor on billable shipment weight so a zero-weight order still incurs
/// freight.
pub const MIN_BILLABLE_WEIGHT_TONS: f64 = 1e-6;

/// Fuel surcharge applied on top of the base freight rate.
pub const FUEL_SURCHARGE_PCT: f64 = 0.08;

/// Handling charge as a fraction of the material subtotal.
pub const HANDLING_RATE: f64 = 0.01;

/// Resolves a sku to a unit price. Implementations must be total: unknown
/// skus resolve to a default rather than failing.
pub trait PriceLookup {
    fn unit_price(&self, sku: &str) -> f64;
}

/// Static demo price book. A database-backed lookup slots in behind
/// [`PriceLookup`] without touching the cost model.
#[derive(Debug, Clone)]
pub struct StandardPriceBook {
    prices: HashMap<&'static str, f64>,
}

impl Default for StandardPriceBook {
    fn default() -> Self {
        let prices = HashMap::from([
            ("cement_bag_50kg", 360.0),
            ("rebar_tmt_10mm_ton", 51_500.0),
            ("sand_mt", 1200.0),
            // aliases
            ("cement", 360.0),
            ("tmt", 52_000.0),
            ("sand", 1100.0),
        ]);
        Self { prices }
    }
}

impl PriceLookup for StandardPriceBook {
    fn unit_price(&self, sku: &str) -> f64 {
        self.prices.get(sku).copied().unwrap_or(DEFAULT_UNIT_PRICE)
    }
}

/// Freight charge for a shipment leg.
///
/// `distance_km × max(weight, ε) × rate × (1 + fuel surcharge) + tolls`.
pub fn freight_cost(distance_km: f64, weight_tons: f64, rate_per_ton_km: f64, tolls: f64) -> f64 {
    let base = distance_km * weight_tons.max(MIN_BILLABLE_WEIGHT_TONS) * rate_per_ton_km;
    base * (1.0 + FUEL_SURCHARGE_PCT) + tolls
}

/// Aggregate shipment weight across an item list.
pub fn total_weight_tons(items: &[LineItem]) -> f64 {
    items.iter().map(|item| item.weight_ton).sum()
}

/// Vendor-independent cost arithmetic: material subtotal, tax, handling.
///
/// Pure arithmetic with no input validation; negative quantities or rates
/// propagate as negative costs, and guarding against them is the intake
/// layer's job.
#[derive(Debug, Clone)]
pub struct CostModel<P> {
    prices: P,
    gst_pct: f64,
}

impl<P: PriceLookup> CostModel<P> {
    pub fn new(prices: P, gst_pct: f64) -> Self {
        Self { prices, gst_pct }
    }

    /// Material subtotal: Σ(qty × unit price), preferring each line's
    /// explicit price over the price book.
    pub fn material_cost(&self, items: &[LineItem]) -> f64 {
        items
            .iter()
            .map(|item| {
                let unit = item
                    .unit_price
                    .unwrap_or_else(|| self.prices.unit_price(&item.sku));
                item.qty * unit
            })
            .sum()
    }

    pub fn taxes(&self, material_cost: f64) -> f64 {
        material_cost * (self.gst_pct / 100.0)
    }

    pub fn handling(&self, material_cost: f64) -> f64 {
        HANDLING_RATE * material_cost
    }
}
