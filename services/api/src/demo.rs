use clap::Args;
use smart_quote::config::AppConfig;
use smart_quote::error::AppError;
use smart_quote::quote::{
    directory, summary, EvaluationPipeline, GeoPoint, LineItem, ProjectContext, TravelConditions,
};

#[derive(Args, Debug)]
pub(crate) struct QuotePrepareArgs {
    /// Site latitude (defaults to Pune)
    #[arg(long)]
    pub(crate) site_lat: Option<f64>,
    /// Site longitude (defaults to Pune)
    #[arg(long)]
    pub(crate) site_lng: Option<f64>,
    /// Human-readable site name for the printed summary
    #[arg(long, default_value = "Pune Hinjewadi Site")]
    pub(crate) site_name: String,
    /// Project brief included in the evaluation context
    #[arg(long, default_value = "Residential tower, phase 2 slab work")]
    pub(crate) brief: String,
    /// Shortlist length
    #[arg(long, default_value_t = 5)]
    pub(crate) top: usize,
}

fn sample_items() -> Vec<LineItem> {
    vec![
        LineItem {
            sku: "cement_bag_50kg".to_string(),
            desc: "OPC 53 cement, 50kg bags".to_string(),
            qty: 100.0,
            unit_price: None,
            weight_ton: 5.0,
        },
        LineItem {
            sku: "rebar_tmt_10mm_ton".to_string(),
            desc: "TMT rebar 10mm".to_string(),
            qty: 2.0,
            unit_price: None,
            weight_ton: 2.0,
        },
        LineItem {
            sku: "sand_mt".to_string(),
            desc: "River sand".to_string(),
            qty: 5.0,
            unit_price: None,
            weight_ton: 5.0,
        },
    ]
}

pub(crate) async fn run_quote_prepare(args: QuotePrepareArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;

    let site = GeoPoint::new(
        args.site_lat.unwrap_or(18.5204),
        args.site_lng.unwrap_or(73.8567),
    );
    let project = ProjectContext {
        brief: args.brief,
        site_name: args.site_name,
        site,
        delivery_window_days: 14,
    };

    let pipeline =
        EvaluationPipeline::from_config(&config.quote)?.with_shortlist_size(args.top);
    let vendors = directory::standard();
    let items = sample_items();

    let shortlist = pipeline
        .shortlist(&project, &items, &vendors, TravelConditions::default())
        .await;

    println!("Smart quote shortlist for {}", project.site_name);
    println!(
        "{:<4} {:<26} {:>12} {:>8} {:>9} {:>8}",
        "#", "Vendor", "Landed", "ETA min", "On-time", "Accept"
    );
    for (position, entry) in shortlist.iter().enumerate() {
        let c = &entry.candidate;
        println!(
            "{:<4} {:<26} {:>12.2} {:>8.0} {:>9.2} {:>8.2}",
            position + 1,
            c.vendor_name,
            c.landed_cost(),
            c.eta_minutes,
            c.on_time_rate,
            c.acceptance_prob,
        );
    }

    println!();
    println!(
        "{}",
        summary::computed_summary(&project.site_name, &shortlist, &config.quote.currency)
    );

    Ok(())
}
