use super::ranking::RankedCandidate;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::warn;

/// Budget for the narrative-generation call. Generation is additive
/// commentary; a slow or failed call degrades to the computed summary.
pub const SUMMARY_TIMEOUT: Duration = Duration::from_secs(20);

const GENERATION_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<GeneratedCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeneratedCandidate {
    content: GeneratedContent,
}

#[derive(Debug, Deserialize)]
struct GeneratedContent {
    #[serde(default)]
    parts: Vec<GeneratedPart>,
}

#[derive(Debug, Deserialize)]
struct GeneratedPart {
    #[serde(default)]
    text: String,
}

/// Free-text commentary over a ranked shortlist.
///
/// With an API key present, asks the generative backend and falls back to
/// the deterministic computed summary on any failure. Without a key the
/// computed summary is used directly. Never errors and never influences
/// the ranking it describes.
#[derive(Debug, Clone)]
pub struct Summarizer {
    client: reqwest::Client,
    api_key: Option<String>,
    currency: String,
}

impl Summarizer {
    pub fn new(api_key: Option<String>, currency: String) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(SUMMARY_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            api_key,
            currency,
        })
    }

    pub async fn summarize(
        &self,
        brief: &str,
        site_name: &str,
        shortlist: &[RankedCandidate],
    ) -> String {
        if shortlist.is_empty() {
            return String::new();
        }

        if let Some(key) = &self.api_key {
            match self.generate(key, brief, site_name, shortlist).await {
                Some(text) => return text,
                None => warn!("narrative generation unavailable; using computed summary"),
            }
        }

        computed_summary(site_name, shortlist, &self.currency)
    }

    async fn generate(
        &self,
        api_key: &str,
        brief: &str,
        site_name: &str,
        shortlist: &[RankedCandidate],
    ) -> Option<String> {
        let candidates_json = serde_json::to_string_pretty(shortlist).ok()?;
        let prompt = format!(
            "You are a B2B procurement assistant. NEVER invent prices or ETAs; \
             use only the provided JSON.\n\nProject brief:\n{brief}\nSite: {site_name}\n\n\
             CANDIDATES JSON:\n{candidates_json}\n\n\
             Pick best overall, cheapest, and fastest, with two to four bullets on why."
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .client
            .post(format!("{GENERATION_URL}?key={api_key}"))
            .json(&body)
            .send()
            .await
            .ok()?
            .error_for_status()
            .ok()?;

        let parsed: GenerateResponse = response.json().await.ok()?;
        let text = parsed
            .candidates
            .first()?
            .content
            .parts
            .first()?
            .text
            .trim()
            .to_string();
        (!text.is_empty()).then_some(text)
    }
}

/// Deterministic shortlist commentary built from the numbers alone.
pub fn computed_summary(
    site_name: &str,
    shortlist: &[RankedCandidate],
    currency: &str,
) -> String {
    let Some(best) = shortlist.first() else {
        return String::new();
    };

    let cheapest = shortlist
        .iter()
        .min_by(|a, b| {
            a.candidate
                .landed_cost()
                .total_cmp(&b.candidate.landed_cost())
        })
        .unwrap_or(best);
    let fastest = shortlist
        .iter()
        .min_by(|a, b| a.candidate.eta_minutes.total_cmp(&b.candidate.eta_minutes))
        .unwrap_or(best);

    let mut lines = vec![format!("Quotation summary for {site_name}:")];
    lines.push(format!(
        "- Best overall: {} ({} {:.0}, ETA {:.0} min)",
        best.candidate.vendor_name,
        currency,
        best.candidate.landed_cost(),
        best.candidate.eta_minutes,
    ));
    lines.push(format!(
        "- Cheapest: {} ({} {:.0})",
        cheapest.candidate.vendor_name,
        currency,
        cheapest.candidate.landed_cost(),
    ));
    lines.push(format!(
        "- Fastest: {} ({:.0} min)",
        fastest.candidate.vendor_name, fastest.candidate.eta_minutes,
    ));
    lines.join("\n")
}
