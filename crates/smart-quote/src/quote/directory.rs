use super::domain::{GeoPoint, Vendor};

/// The built-in supplier directory. A database-backed directory replaces
/// this list without touching the pipeline, which only needs an ordered,
/// finite, read-only slice of vendors.
pub fn standard() -> Vec<Vendor> {
    vec![
        Vendor {
            id: 1,
            name: "Mumbai Steel & Cement Co".to_string(),
            location: GeoPoint::new(19.0760, 72.8777),
            on_time_rate: 0.92,
            quality_score: 0.88,
            acceptance_prob: 0.65,
            freight_rate_per_ton_km: 3.9,
            price_volatility: 0.03,
        },
        Vendor {
            id: 2,
            name: "Chennai BuildSupplies".to_string(),
            location: GeoPoint::new(13.0827, 80.2707),
            on_time_rate: 0.89,
            quality_score: 0.86,
            acceptance_prob: 0.60,
            freight_rate_per_ton_km: 3.7,
            price_volatility: 0.035,
        },
        Vendor {
            id: 3,
            name: "Delhi InfraMart".to_string(),
            location: GeoPoint::new(28.7041, 77.1025),
            on_time_rate: 0.94,
            quality_score: 0.90,
            acceptance_prob: 0.70,
            freight_rate_per_ton_km: 4.0,
            price_volatility: 0.028,
        },
        Vendor {
            id: 4,
            name: "Ahmedabad Materials".to_string(),
            location: GeoPoint::new(23.0225, 72.5714),
            on_time_rate: 0.91,
            quality_score: 0.87,
            acceptance_prob: 0.62,
            freight_rate_per_ton_km: 3.6,
            price_volatility: 0.032,
        },
        Vendor {
            id: 5,
            name: "Bengaluru Supply Hub".to_string(),
            location: GeoPoint::new(12.9716, 77.5946),
            on_time_rate: 0.90,
            quality_score: 0.89,
            acceptance_prob: 0.68,
            freight_rate_per_ton_km: 3.8,
            price_volatility: 0.031,
        },
    ]
}
