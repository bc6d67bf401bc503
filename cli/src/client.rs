use std::time::Duration;

use shared::{Airport, RouteReply, RouteRequest};

use crate::error::{CliError, FetchError};

/// Remote side of the route finder: the airport catalog and the precomputed
/// route lookup. Path search happens entirely behind this boundary.
#[allow(async_fn_in_trait)]
pub trait RouteService {
    async fn airports(&self) -> Result<Vec<Airport>, FetchError>;

    async fn route(&self, request: &RouteRequest) -> Result<RouteReply, FetchError>;
}

pub struct HttpRouteService {
    http: reqwest::Client,
    api_root: String,
}

impl HttpRouteService {
    pub fn new(api_root: &str, timeout: Duration) -> Result<Self, CliError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_root: api_root.trim_end_matches('/').to_string(),
        })
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }
}

impl RouteService for HttpRouteService {
    async fn airports(&self) -> Result<Vec<Airport>, FetchError> {
        let url = format!("{}/airports", self.api_root);
        tracing::debug!(%url, "fetching airport catalog");
        let body = self.http.get(url).send().await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn route(&self, request: &RouteRequest) -> Result<RouteReply, FetchError> {
        let url = format!("{}/route", self.api_root);
        tracing::debug!(
            %url,
            origin = %request.origin,
            destination = %request.destination,
            criterion = request.criterion.as_wire(),
            "sending route request"
        );
        let response = self.http.post(url).json(request).send().await?;

        // The body alone decides success; the reference backend answers 404
        // together with an `{error}` body.
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            tracing::debug!(%status, "route service replied with non-success status");
        }
        Ok(serde_json::from_slice(&body)?)
    }
}
