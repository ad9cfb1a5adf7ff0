use super::domain::GeoPoint;
use super::geo;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Budget for a single routing-backend call. One failed attempt falls
/// straight through to the geometric fallback; there are no retries.
pub const ROUTING_TIMEOUT: Duration = Duration::from_secs(4);

/// Where a route estimate came from. Diagnostic only; both paths produce a
/// usable estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteSource {
    Primary,
    Fallback,
}

impl RouteSource {
    pub const fn as_str(self) -> &'static str {
        match self {
            RouteSource::Primary => "primary",
            RouteSource::Fallback => "fallback",
        }
    }
}

/// Distance and adjusted travel time for one origin/destination pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteEstimate {
    pub distance_km: f64,
    pub eta_minutes: f64,
    pub source: RouteSource,
}

/// Static time-of-day and weather context for the ETA adjustment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelConditions {
    /// Day of week, 0 = Monday .. 6 = Sunday.
    pub day_of_week: u8,
    /// Hour of day, 0..=23.
    pub hour: u8,
    pub rain_mm: f64,
}

impl Default for TravelConditions {
    /// Midweek mid-morning, dry.
    fn default() -> Self {
        Self {
            day_of_week: 2,
            hour: 10,
            rain_mm: 0.0,
        }
    }
}

impl TravelConditions {
    /// Additive congestion/weather multiplier applied to the ETA only.
    /// Distance is reported unadjusted.
    pub fn eta_factor(&self) -> f64 {
        let mut factor = 1.0;
        if (8..=10).contains(&self.hour) || (17..=20).contains(&self.hour) {
            factor += 0.15;
        }
        if self.rain_mm > 5.0 {
            factor += 0.10;
        }
        if matches!(self.day_of_week, 5 | 6) {
            factor += 0.05;
        }
        factor
    }
}

#[derive(Debug, thiserror::Error)]
enum RouteLookupError {
    #[error("routing backend transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("routing backend returned no routes")]
    NoRoutes,
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    #[serde(default)]
    routes: Vec<RouteLeg>,
}

#[derive(Debug, Deserialize)]
struct RouteLeg {
    /// Meters.
    distance: f64,
    /// Seconds.
    duration: f64,
}

/// Route lookup against an OSRM-compatible backend with an unconditional
/// geometric fallback.
///
/// `estimate` is infallible by design: any backend failure (timeout,
/// non-success status, malformed body, unreachable host) is absorbed and
/// only shows up as [`RouteSource::Fallback`] on the result.
#[derive(Debug, Clone)]
pub struct RouteEstimator {
    client: reqwest::Client,
    base_url: String,
}

impl RouteEstimator {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(ROUTING_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub async fn estimate(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        conditions: TravelConditions,
    ) -> RouteEstimate {
        let (distance_km, base_minutes, source) = match self.lookup(origin, destination).await {
            Ok((distance_km, minutes)) => {
                debug!(distance_km, minutes, "routing backend answered");
                (distance_km, minutes, RouteSource::Primary)
            }
            Err(err) => {
                warn!(error = %err, "routing backend unavailable; using geometric fallback");
                let distance_km = geo::haversine_km(origin, destination);
                (
                    distance_km,
                    geo::fallback_eta_minutes(distance_km),
                    RouteSource::Fallback,
                )
            }
        };

        RouteEstimate {
            distance_km,
            eta_minutes: base_minutes * conditions.eta_factor(),
            source,
        }
    }

    async fn lookup(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<(f64, f64), RouteLookupError> {
        let url = format!(
            "{}/route/v1/driving/{},{};{},{}?overview=false",
            self.base_url, origin.lng, origin.lat, destination.lng, destination.lat
        );

        let body: RouteResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let best = body.routes.first().ok_or(RouteLookupError::NoRoutes)?;
        Ok((best.distance / 1000.0, best.duration / 60.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;

    /// Bind an OSRM-shaped stub on an ephemeral port and return its base
    /// URL. The canned status and body are served for every route query.
    async fn spawn_route_stub(status: StatusCode, body: &'static str) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("stub listener binds");
        let addr = listener.local_addr().expect("stub addr");
        let app = Router::new().route(
            "/route/v1/driving/:coords",
            get(move || async move { (status, body) }),
        );
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub serves");
        });
        format!("http://{addr}")
    }

    fn dry_off_peak() -> TravelConditions {
        TravelConditions {
            day_of_week: 2,
            hour: 14,
            rain_mm: 0.0,
        }
    }

    #[test]
    fn factor_is_neutral_off_peak() {
        assert_eq!(dry_off_peak().eta_factor(), 1.0);
    }

    #[test]
    fn factor_adds_peak_rain_and_weekend_components() {
        let morning_peak = TravelConditions {
            hour: 8,
            ..dry_off_peak()
        };
        assert!((morning_peak.eta_factor() - 1.15).abs() < 1e-12);

        let soaked_weekend_evening = TravelConditions {
            day_of_week: 6,
            hour: 18,
            rain_mm: 12.0,
        };
        assert!((soaked_weekend_evening.eta_factor() - 1.30).abs() < 1e-12);
    }

    #[test]
    fn light_rain_does_not_trigger_weather_adjustment() {
        let drizzle = TravelConditions {
            rain_mm: 5.0,
            ..dry_off_peak()
        };
        assert_eq!(drizzle.eta_factor(), 1.0);
    }

    #[tokio::test]
    async fn primary_route_converts_meters_and_seconds() {
        let base = spawn_route_stub(
            StatusCode::OK,
            r#"{"routes":[{"distance":10700.0,"duration":900.0}]}"#,
        )
        .await;
        let estimator = RouteEstimator::new(base).expect("client builds");
        let origin = GeoPoint::new(19.0, 72.8);
        let destination = GeoPoint::new(19.0760, 72.8777);

        let estimate = estimator
            .estimate(origin, destination, dry_off_peak())
            .await;

        assert_eq!(estimate.source, RouteSource::Primary);
        assert!((estimate.distance_km - 10.7).abs() < 1e-9);
        assert!((estimate.eta_minutes - 15.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn primary_eta_is_scaled_by_conditions_factor() {
        let base = spawn_route_stub(
            StatusCode::OK,
            r#"{"routes":[{"distance":10700.0,"duration":900.0}]}"#,
        )
        .await;
        let estimator = RouteEstimator::new(base).expect("client builds");
        let rush_hour = TravelConditions {
            hour: 9,
            ..dry_off_peak()
        };

        let estimate = estimator
            .estimate(GeoPoint::new(19.0, 72.8), GeoPoint::new(19.0760, 72.8777), rush_hour)
            .await;

        assert_eq!(estimate.source, RouteSource::Primary);
        // The backend's distance passes through unadjusted.
        assert!((estimate.distance_km - 10.7).abs() < 1e-9);
        assert!((estimate.eta_minutes - 15.0 * 1.15).abs() < 1e-9);
    }

    #[tokio::test]
    async fn empty_route_list_falls_back_to_haversine() {
        let base = spawn_route_stub(StatusCode::OK, r#"{"routes":[]}"#).await;
        let estimator = RouteEstimator::new(base).expect("client builds");
        let origin = GeoPoint::new(19.0, 72.8);
        let destination = GeoPoint::new(19.0760, 72.8777);

        let estimate = estimator
            .estimate(origin, destination, dry_off_peak())
            .await;

        assert_eq!(estimate.source, RouteSource::Fallback);
        let expected = geo::haversine_km(origin, destination);
        assert!((estimate.distance_km - expected).abs() < 1e-9);
    }

    #[tokio::test]
    async fn error_status_falls_back_to_haversine() {
        let base =
            spawn_route_stub(StatusCode::INTERNAL_SERVER_ERROR, "routing exploded").await;
        let estimator = RouteEstimator::new(base).expect("client builds");
        let origin = GeoPoint::new(19.0, 72.8);
        let destination = GeoPoint::new(19.0760, 72.8777);

        let estimate = estimator
            .estimate(origin, destination, dry_off_peak())
            .await;

        assert_eq!(estimate.source, RouteSource::Fallback);
        let expected = geo::haversine_km(origin, destination);
        assert!((estimate.distance_km - expected).abs() < 1e-9);
    }

    #[tokio::test]
    async fn malformed_body_falls_back_to_haversine() {
        let base = spawn_route_stub(StatusCode::OK, "not json at all").await;
        let estimator = RouteEstimator::new(base).expect("client builds");
        let origin = GeoPoint::new(19.0, 72.8);
        let destination = GeoPoint::new(19.0760, 72.8777);

        let estimate = estimator
            .estimate(origin, destination, dry_off_peak())
            .await;

        assert_eq!(estimate.source, RouteSource::Fallback);
    }

    #[tokio::test]
    async fn unreachable_backend_falls_back_to_haversine() {
        // Port 9 (discard) is closed in test environments; the connection
        // refusal exercises the fallback path without waiting on a timeout.
        let estimator =
            RouteEstimator::new("http://127.0.0.1:9").expect("client builds");
        let origin = GeoPoint::new(19.0, 72.8);
        let destination = GeoPoint::new(19.0760, 72.8777);

        let estimate = estimator
            .estimate(origin, destination, dry_off_peak())
            .await;

        assert_eq!(estimate.source, RouteSource::Fallback);
        let expected = geo::haversine_km(origin, destination);
        assert!((estimate.distance_km - expected).abs() < 1e-9);
        assert!((estimate.eta_minutes - geo::fallback_eta_minutes(expected)).abs() < 1e-9);
    }

    #[tokio::test]
    async fn fallback_eta_still_honors_conditions_factor() {
        let estimator =
            RouteEstimator::new("http://127.0.0.1:9").expect("client builds");
        let origin = GeoPoint::new(19.0, 72.8);
        let destination = GeoPoint::new(19.0760, 72.8777);
        let rush_hour = TravelConditions {
            hour: 9,
            ..dry_off_peak()
        };

        let estimate = estimator.estimate(origin, destination, rush_hour).await;

        let distance = geo::haversine_km(origin, destination);
        let unadjusted = geo::fallback_eta_minutes(distance);
        assert!((estimate.eta_minutes - unadjusted * 1.15).abs() < 1e-9);
        // The adjustment never touches distance.
        assert!((estimate.distance_km - distance).abs() < 1e-9);
    }
}
