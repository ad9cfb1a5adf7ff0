use smart_quote::quote::{
    directory, CostModel, EvaluationPipeline, GeoPoint, LineItem, ProjectContext, RouteEstimator,
    StandardPriceBook, TravelConditions,
};

// Closed port: every route lookup exercises the geometric fallback, so the
// suite runs without a routing backend.
const UNREACHABLE_ROUTING_URL: &str = "http://127.0.0.1:9";

fn offline_pipeline() -> EvaluationPipeline {
    let routes = RouteEstimator::new(UNREACHABLE_ROUTING_URL).expect("client builds");
    let costs = CostModel::new(StandardPriceBook::default(), 18.0);
    EvaluationPipeline::new(routes, costs)
}

fn pune_project() -> ProjectContext {
    ProjectContext {
        brief: "Residential tower, phase 2 slab work".to_string(),
        site_name: "Pune Hinjewadi Site".to_string(),
        site: GeoPoint::new(18.5204, 73.8567),
        delivery_window_days: 14,
    }
}

fn sample_items() -> Vec<LineItem> {
    vec![
        LineItem {
            sku: "cement_bag_50kg".to_string(),
            desc: "OPC 53 cement".to_string(),
            qty: 100.0,
            unit_price: None,
            weight_ton: 5.0,
        },
        LineItem {
            sku: "sand_mt".to_string(),
            desc: "River sand".to_string(),
            qty: 5.0,
            unit_price: None,
            weight_ton: 5.0,
        },
        LineItem {
            sku: "unlisted_sealant".to_string(),
            desc: "Joint sealant".to_string(),
            qty: 3.0,
            unit_price: None,
            weight_ton: 0.1,
        },
    ]
}

fn off_peak() -> TravelConditions {
    TravelConditions {
        day_of_week: 2,
        hour: 14,
        rain_mm: 0.0,
    }
}

#[tokio::test]
async fn pipeline_ranks_every_vendor_under_full_routing_outage() {
    let pipeline = offline_pipeline();
    let vendors = directory::standard();
    let ranked = pipeline
        .evaluate(&pune_project(), &sample_items(), &vendors, off_peak())
        .await;

    assert_eq!(ranked.len(), vendors.len());
    assert!(ranked.windows(2).all(|pair| pair[0].score <= pair[1].score));
    for entry in &ranked {
        assert!(entry.candidate.distance_km > 0.0);
        assert!(entry.candidate.eta_minutes > 0.0);
        assert!(entry.candidate.landed_cost() > 0.0);
        assert!((0.0..=1.0).contains(&entry.score));
    }
}

#[tokio::test]
async fn material_side_costs_are_vendor_independent() {
    let pipeline = offline_pipeline();
    let ranked = pipeline
        .evaluate(
            &pune_project(),
            &sample_items(),
            &directory::standard(),
            off_peak(),
        )
        .await;

    // 100 bags of cement, 5 mt of sand, 3 units at the default price for
    // the unknown sku.
    let expected_material = 100.0 * 360.0 + 5.0 * 1200.0 + 3.0 * 1000.0;
    for entry in &ranked {
        assert!((entry.candidate.material_cost - expected_material).abs() < 1e-9);
        assert!((entry.candidate.taxes - expected_material * 0.18).abs() < 1e-9);
        assert!((entry.candidate.handling - expected_material * 0.01).abs() < 1e-9);
    }

    // Freight varies with distance and vendor rate.
    let freights: Vec<f64> = ranked.iter().map(|e| e.candidate.freight_cost).collect();
    assert!(freights.windows(2).any(|pair| pair[0] != pair[1]));
}

#[tokio::test]
async fn evaluation_is_deterministic_across_runs() {
    let pipeline = offline_pipeline();
    let vendors = directory::standard();
    let first = pipeline
        .evaluate(&pune_project(), &sample_items(), &vendors, off_peak())
        .await;
    let second = pipeline
        .evaluate(&pune_project(), &sample_items(), &vendors, off_peak())
        .await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn shortlist_truncates_to_configured_length() {
    let pipeline = offline_pipeline().with_shortlist_size(3);
    let shortlist = pipeline
        .shortlist(
            &pune_project(),
            &sample_items(),
            &directory::standard(),
            off_peak(),
        )
        .await;
    assert_eq!(shortlist.len(), 3);
}

#[tokio::test]
async fn empty_directory_yields_empty_ranking() {
    let pipeline = offline_pipeline();
    let ranked = pipeline
        .evaluate(&pune_project(), &sample_items(), &[], off_peak())
        .await;
    assert!(ranked.is_empty());
}
