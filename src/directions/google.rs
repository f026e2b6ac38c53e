//! # Google Directions Adapter
//!
//! Thin async adapter over the Directions JSON endpoint. Network and auth live
//! here; everything above this module only sees [`DirectionsProvider`].

use super::{DirectionsProvider, RouteFetchError};
use crate::model::{RouteAlternative, RouteDescription, RouteRequest};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

pub const DEFAULT_DIRECTIONS_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";

/// Envelope of a Directions response. Only `status` and `routes` matter to us.
#[derive(Deserialize)]
struct DirectionsEnvelope {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    routes: Vec<RouteAlternative>,
}

/// Directions client backed by `reqwest`.
#[derive(Clone)]
pub struct GoogleDirectionsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl GoogleDirectionsClient {
    /// Creates a client with a hard `timeout` on every request.
    ///
    /// # Arguments
    /// * `api_key` - Directions API key
    /// * `base_url` - Endpoint, normally [`DEFAULT_DIRECTIONS_URL`]
    /// * `timeout` - Expiry is reported as [`RouteFetchError::Timeout`]
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, RouteFetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RouteFetchError::InvalidRequest(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout,
        })
    }
}

#[async_trait]
impl DirectionsProvider for GoogleDirectionsClient {
    #[instrument(skip_all, fields(origin = %request.origin, destination = %request.destination))]
    async fn directions(&self, request: &RouteRequest) -> Result<RouteDescription, RouteFetchError> {
        if request.origin.is_blank() || request.destination.is_blank() {
            return Err(RouteFetchError::InvalidRequest(
                "origin and destination must not be blank".to_string(),
            ));
        }

        let departure = request.departure_time.timestamp().to_string();
        let query = [
            ("origin", request.origin.as_str()),
            ("destination", request.destination.as_str()),
            ("mode", request.mode.as_str()),
            ("departure_time", departure.as_str()),
            ("key", self.api_key.as_str()),
        ];
        debug!(mode = request.mode.as_str(), departure = %request.departure_time, "Requesting directions");

        let send = self.http.get(&self.base_url).query(&query).send();
        let response = match tokio::time::timeout(self.timeout, send).await {
            Err(_) => return Err(RouteFetchError::Timeout(self.timeout)),
            Ok(Err(e)) if e.is_timeout() => return Err(RouteFetchError::Timeout(self.timeout)),
            Ok(result) => result?,
        };

        let response = response.error_for_status()?;
        let body = response.text().await?;
        let description = parse_response(&body)?;

        info!(alternatives = description.routes.len(), "Directions received");
        Ok(description)
    }
}

/// Maps a raw Directions body onto a [`RouteDescription`] or the matching error.
pub(crate) fn parse_response(body: &str) -> Result<RouteDescription, RouteFetchError> {
    let envelope: DirectionsEnvelope = serde_json::from_str(body)
        .map_err(|e| RouteFetchError::MalformedResponse(e.to_string()))?;

    match envelope.status.as_str() {
        "OK" if envelope.routes.is_empty() => Err(RouteFetchError::NoRoutes),
        "OK" => Ok(RouteDescription {
            routes: envelope.routes,
        }),
        "ZERO_RESULTS" => Err(RouteFetchError::NoRoutes),
        _ => {
            warn!(status = %envelope.status, "Directions provider refused request");
            Err(RouteFetchError::Provider {
                status: envelope.status.clone(),
                message: envelope.error_message,
            })
        }
    }
}
