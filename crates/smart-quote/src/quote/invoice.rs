use chrono::{Duration, NaiveDate, Utc};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Default billing identity stamped on generated invoices.
pub const DEFAULT_BILL_TO: &str = "MJCET Construction Pvt Ltd";

pub const PAYMENT_TERMS: &str = "Net 15";

#[derive(Debug, thiserror::Error)]
pub enum InvoiceError {
    #[error("failed to create invoice directory {dir}: {source}")]
    CreateDir {
        dir: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write invoice {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceLine {
    pub sku: String,
    pub desc: String,
    pub qty: f64,
    pub unit_price: f64,
    pub line_total: f64,
}

impl InvoiceLine {
    pub fn new(sku: String, desc: String, qty: f64, unit_price: f64) -> Self {
        let line_total = qty * unit_price;
        Self {
            sku,
            desc,
            qty,
            unit_price,
            line_total,
        }
    }
}

/// The accepted offer's numbers carried into the invoice.
#[derive(Debug, Clone, PartialEq)]
pub struct ChosenOffer {
    pub vendor_name: String,
    pub freight: f64,
    pub taxes: f64,
    pub eta_minutes: f64,
    pub distance_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceDocument {
    pub invoice_no: String,
    pub bill_to: String,
    pub ship_to: String,
    pub lines: Vec<InvoiceLine>,
    pub freight: f64,
    pub taxes: f64,
    pub grand_total: f64,
    pub estimated_delivery_date: NaiveDate,
    pub payment_terms: String,
    pub notes: String,
}

impl InvoiceDocument {
    /// Assemble an invoice for a chosen candidate's numbers.
    ///
    /// Freight and taxes are carried over from the candidate's cost
    /// breakdown; the delivery estimate rounds the ETA down to whole days
    /// with a one-day floor.
    pub fn build(
        ship_to: &str,
        lines: Vec<InvoiceLine>,
        offer: &ChosenOffer,
        today: NaiveDate,
    ) -> Self {
        let subtotal: f64 = lines.iter().map(|line| line.line_total).sum();
        let grand_total = subtotal + offer.freight + offer.taxes;

        let days = ((offer.eta_minutes / (60.0 * 24.0)) as i64).max(1);
        let estimated_delivery_date = today + Duration::days(days);

        // Millisecond suffix keeps concurrent invoice numbers distinct
        // without a persistent sequence.
        let sequence = Utc::now().timestamp_millis().rem_euclid(10_000);
        let invoice_no = format!("AUTO-{}-{:04}", today.format("%Y-%m-%d"), sequence);

        Self {
            invoice_no,
            bill_to: DEFAULT_BILL_TO.to_string(),
            ship_to: ship_to.to_string(),
            lines,
            freight: offer.freight,
            taxes: offer.taxes,
            grand_total,
            estimated_delivery_date,
            payment_terms: PAYMENT_TERMS.to_string(),
            notes: format!(
                "Vendor: {}. Distance {:.1} km.",
                offer.vendor_name, offer.distance_km
            ),
        }
    }

    /// Render the invoice as a standalone HTML document.
    pub fn render_html(&self) -> String {
        let mut rows = String::new();
        for line in &self.lines {
            let _ = write!(
                rows,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td>\
                 <td class='right'>{:.2}</td></tr>",
                line.sku, line.desc, line.qty, line.unit_price, line.line_total
            );
        }

        format!(
            "<!doctype html>\n<html><head><meta charset='utf-8'><title>Invoice</title>\n\
             <style>\n\
             body {{ font-family: Arial, sans-serif; margin: 24px; }}\n\
             h1 {{ margin: 0 0 8px 0; }}\n\
             .table {{ width: 100%; border-collapse: collapse; margin-top: 12px; }}\n\
             .table th, .table td {{ border: 1px solid #ccc; padding: 8px; text-align: left; }}\n\
             .right {{ text-align: right; }}\n\
             .small {{ color: #555; font-size: 12px; }}\n\
             </style>\n</head><body>\n\
             <h1>Invoice</h1>\n\
             <div class='small'>Invoice No: {invoice_no}</div>\n\
             <div class='small'>Bill To: {bill_to}</div>\n\
             <div class='small'>Ship To: {ship_to}</div>\n\
             <table class='table'>\n\
             <thead><tr><th>SKU</th><th>Description</th><th>Qty</th>\
             <th>Unit Price</th><th class='right'>Line Total</th></tr></thead>\n\
             <tbody>{rows}</tbody></table>\n\
             <p class='right'>Freight: {freight:.2}</p>\n\
             <p class='right'>Taxes: {taxes:.2}</p>\n\
             <h3 class='right'>Grand Total: {grand_total:.2}</h3>\n\
             <p class='small'>Estimated delivery: {delivery} &middot; Terms: {terms}</p>\n\
             <p class='small'>{notes}</p>\n\
             </body></html>\n",
            invoice_no = self.invoice_no,
            bill_to = self.bill_to,
            ship_to = self.ship_to,
            rows = rows,
            freight = self.freight,
            taxes = self.taxes,
            grand_total = self.grand_total,
            delivery = self.estimated_delivery_date,
            terms = self.payment_terms,
            notes = self.notes,
        )
    }

    /// Write the rendered HTML under `dir`, returning the file path.
    pub fn write_html(&self, dir: &Path) -> Result<PathBuf, InvoiceError> {
        std::fs::create_dir_all(dir).map_err(|source| InvoiceError::CreateDir {
            dir: dir.to_path_buf(),
            source,
        })?;

        let path = dir.join(format!("{}.html", self.invoice_no.replace('/', "-")));
        std::fs::write(&path, self.render_html()).map_err(|source| InvoiceError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_lines() -> Vec<InvoiceLine> {
        vec![
            InvoiceLine::new("cement_bag_50kg".to_string(), "Cement".to_string(), 10.0, 360.0),
            InvoiceLine::new("sand_mt".to_string(), "Sand".to_string(), 2.0, 1200.0),
        ]
    }

    fn build_sample(eta_minutes: f64) -> InvoiceDocument {
        let offer = ChosenOffer {
            vendor_name: "Mumbai Steel & Cement Co".to_string(),
            freight: 500.0,
            taxes: 180.0,
            eta_minutes,
            distance_km: 148.3,
        };
        InvoiceDocument::build(
            "Pune Site",
            sample_lines(),
            &offer,
            NaiveDate::from_ymd_opt(2026, 8, 26).expect("valid date"),
        )
    }

    #[test]
    fn grand_total_sums_lines_freight_and_taxes() {
        let invoice = build_sample(30.0);
        let subtotal = 10.0 * 360.0 + 2.0 * 1200.0;
        assert!((invoice.grand_total - (subtotal + 500.0 + 180.0)).abs() < 1e-9);
    }

    #[test]
    fn short_eta_still_yields_one_day_delivery_floor() {
        let invoice = build_sample(30.0);
        assert_eq!(
            invoice.estimated_delivery_date,
            NaiveDate::from_ymd_opt(2026, 8, 27).expect("valid date")
        );
    }

    #[test]
    fn multi_day_eta_extends_the_delivery_date() {
        // Three full days of driving.
        let invoice = build_sample(3.0 * 24.0 * 60.0);
        assert_eq!(
            invoice.estimated_delivery_date,
            NaiveDate::from_ymd_opt(2026, 8, 29).expect("valid date")
        );
    }

    #[test]
    fn rendered_html_carries_lines_and_totals() {
        let invoice = build_sample(30.0);
        let html = invoice.render_html();
        assert!(html.contains("cement_bag_50kg"));
        assert!(html.contains("Grand Total"));
        assert!(html.contains(&invoice.invoice_no));
        assert!(html.contains("Net 15"));
    }

    #[test]
    fn write_html_places_file_in_requested_directory() {
        let dir = tempfile::tempdir().expect("temp dir");
        let invoice = build_sample(30.0);
        let path = invoice.write_html(dir.path()).expect("invoice written");
        assert!(path.exists());
        let contents = std::fs::read_to_string(path).expect("readable");
        assert!(contents.contains("Invoice No"));
    }
}
