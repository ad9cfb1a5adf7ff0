//! Mapping from the simplified frontend request shape to the structured
//! quotation request: coordinate inference from an address string, rough
//! quantity parsing, and material-name to sku translation.

use smart_quote::quote::{GeoPoint, LineItem, ProjectContext};

/// Fallback site when no coordinates are supplied and the address names no
/// known city: Pune.
pub(crate) const DEFAULT_SITE: GeoPoint = GeoPoint::new(18.5204, 73.8567);

const CITY_COORDS: &[(&str, GeoPoint)] = &[
    ("pune", GeoPoint::new(18.5204, 73.8567)),
    ("mumbai", GeoPoint::new(19.0760, 72.8777)),
    ("bombay", GeoPoint::new(19.0760, 72.8777)),
    ("new delhi", GeoPoint::new(28.6139, 77.2090)),
    ("delhi", GeoPoint::new(28.7041, 77.1025)),
    ("chennai", GeoPoint::new(13.0827, 80.2707)),
    ("hyderabad", GeoPoint::new(17.3850, 78.4867)),
    ("hyd", GeoPoint::new(17.3850, 78.4867)),
    ("bengaluru", GeoPoint::new(12.9716, 77.5946)),
    ("bangalore", GeoPoint::new(12.9716, 77.5946)),
    ("ahmedabad", GeoPoint::new(23.0225, 72.5714)),
];

/// Material name to (sku, weight in tons per base unit).
const MATERIAL_SKUS: &[(&str, &str, f64)] = &[
    ("cement", "cement_bag_50kg", 0.05),
    ("sand", "sand_mt", 1.0),
    ("steel tmt", "rebar_tmt_10mm_ton", 1.0),
    ("tmt", "rebar_tmt_10mm_ton", 1.0),
    ("bricks", "bricks_1000", 1.6),
    ("aggregates", "aggregates_mt", 1.0),
    ("concrete", "concrete_m3", 2.4),
];

pub(crate) fn infer_coords(address: &str) -> Option<GeoPoint> {
    if address.is_empty() {
        return None;
    }
    let lowered = address.to_lowercase();
    CITY_COORDS
        .iter()
        .find(|(city, _)| lowered.contains(city))
        .map(|(_, point)| *point)
}

fn leading_number(text: &str) -> Option<f64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse().ok()
}

/// Rough quantity-to-multiplier heuristic keyed on unit keywords.
pub(crate) fn parse_quantity(quantity: &str) -> f64 {
    let lowered = quantity.to_lowercase();
    let Some(value) = leading_number(&lowered) else {
        return 1.0;
    };

    let scaled = if lowered.contains("sq ft") || lowered.contains("sqft") {
        // ~200 sq ft per base unit.
        value / 200.0
    } else if lowered.contains("m3") || lowered.contains("cubic") {
        value / 2.0
    } else if lowered.contains("ton") {
        value
    } else if lowered.contains("meter") || lowered.contains("metre") || lowered.contains("m ") {
        value / 50.0
    } else {
        value
    };
    scaled.max(1.0)
}

fn line_item_for_material(material: &str, per_item_qty: f64) -> LineItem {
    let key = material.trim().to_lowercase();
    let (sku, unit_weight) = MATERIAL_SKUS
        .iter()
        .find(|(name, _, _)| *name == key)
        .map(|(_, sku, weight)| ((*sku).to_string(), *weight))
        .unwrap_or_else(|| (key.replace(' ', "_"), 1.0));

    LineItem {
        sku,
        desc: material.to_string(),
        qty: per_item_qty,
        unit_price: None,
        weight_ton: unit_weight * per_item_qty,
    }
}

/// Expand a simplified request into the structured project + items form.
pub(crate) fn structured_request(
    project_type: &str,
    address: &str,
    materials: &[String],
    quantity: Option<&str>,
    site: Option<GeoPoint>,
) -> (ProjectContext, Vec<LineItem>) {
    let site = site.or_else(|| infer_coords(address)).unwrap_or(DEFAULT_SITE);

    let multiplier = quantity.map(parse_quantity).unwrap_or(1.0);
    let per_item_qty = multiplier.round().max(1.0);

    let brief = format!(
        "Project type: {project_type}. Quantity: {}. Materials: {}.",
        quantity.unwrap_or("N/A"),
        materials.join(", ")
    );

    let items = materials
        .iter()
        .map(|material| line_item_for_material(material, per_item_qty))
        .collect();

    let project = ProjectContext {
        brief,
        site_name: address.to_string(),
        site,
        delivery_window_days: 14,
    };

    (project, items)
}
