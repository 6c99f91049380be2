use super::types::{CalculateRouteResponse, ReverseGeocodeResponse, SearchResponse};
use crate::sdk::config::ServiceConfig;
use crate::sdk::routing::error::{RoutingError, TomTomErrorPayload};
use crate::sdk::routing::geocode::{first_usable_address, Address, SearchResult};
use crate::sdk::routing::route::{Coord, RouteOptions, RouteRequest, RouteResult};
use crate::sdk::routing::service::RoutingProvider;
use crate::sdk::util::rate_limit::Limiter;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub struct TomTomProvider {
    client: Client,
    api_key: String,
    base_url: String,
    options: RouteOptions,
    limiter: Limiter,
}

impl TomTomProvider {
    pub fn new(
        config: &ServiceConfig,
        options: RouteOptions,
        limiter: Limiter,
    ) -> Result<Self, RoutingError> {
        Ok(Self {
            client: Client::builder().timeout(Duration::from_secs(15)).build()?,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            options,
            limiter,
        })
    }

    fn endpoint<'a, I>(&self, segments: I) -> Result<Url, RoutingError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| RoutingError::Generic(format!("Bad base URL {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| RoutingError::Generic(format!("Bad base URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    fn route_url(&self, request: &RouteRequest) -> Result<Url, RoutingError> {
        let locations = format!(
            "{}:{}",
            lat_lon(request.start),
            lat_lon(request.finish)
        );
        let mut url = self.endpoint(["routing", "1", "calculateRoute", locations.as_str(), "json"])?;
        url.query_pairs_mut().extend_pairs(self.options.query_pairs());
        Ok(url)
    }

    fn reverse_geocode_url(&self, coord: Coord) -> Result<Url, RoutingError> {
        let position = format!("{}.json", lat_lon(coord));
        self.endpoint(["search", "2", "reverseGeocode", position.as_str()])
    }

    fn search_url(&self, query: &str) -> Result<Url, RoutingError> {
        let query = format!("{}.json", query.trim());
        self.endpoint(["search", "2", "search", query.as_str()])
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T, RoutingError> {
        self.limiter.until_ready().await;
        log::debug!("[PROVIDER] Calling TomTom {} at {}", what, redact(&url));

        let response = match self.client.get(url.clone()).send().await {
            Ok(resp) => resp,
            Err(e) => {
                log::error!(
                    "Failed to send {} request. URL: {}\nError: {}",
                    what,
                    redact(&url),
                    e
                );
                return Err(e.into());
            }
        };

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            // Try to parse the structured error first
            if let Some(err) = serde_json::from_str::<TomTomErrorPayload>(&text)
                .ok()
                .and_then(TomTomErrorPayload::into_error)
            {
                return Err(err);
            }
            // Fallback to a raw error if parsing fails
            log::error!(
                "API returned non-success status: {}. Unparseable Body: {}",
                status,
                text
            );
            return Err(RoutingError::RawApiError(text));
        }

        serde_json::from_str(&text).map_err(|e| {
            log::error!(
                "Failed to parse {} response. URL: {}\nError: {}. Body: {}",
                what,
                redact(&url),
                e,
                text
            );
            e.into()
        })
    }
}

#[async_trait]
impl RoutingProvider for TomTomProvider {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, RoutingError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let url = self.search_url(query)?;
        let body: SearchResponse = self.fetch(url, "search").await?;
        Ok(body.into_results())
    }

    async fn reverse_geocode(&self, coord: Coord) -> Result<Option<Address>, RoutingError> {
        let url = self.reverse_geocode_url(coord)?;
        let body: ReverseGeocodeResponse = self.fetch(url, "reverse_geocode").await?;
        Ok(first_usable_address(body.into_addresses()))
    }

    async fn compute_route(&self, request: RouteRequest) -> Result<RouteResult, RoutingError> {
        let url = self.route_url(&request)?;
        let body: CalculateRouteResponse = self.fetch(url, "calculateRoute").await?;
        body.into_first_route()
    }
}

/// TomTom paths take `lat,lon`, our coordinates are `(lng, lat)`.
fn lat_lon((lng, lat): Coord) -> String {
    format!("{},{}", lat, lng)
}

fn redact(url: &Url) -> String {
    let mut shown = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    shown.query_pairs_mut().clear().extend_pairs(pairs);
    shown.to_string()
}
