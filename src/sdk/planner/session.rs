use super::coordinator::{Request, RequestToken, RouteCoordinator};
use super::events::PlannerEvent;
use crate::sdk::routing::error::RoutingError;
use crate::sdk::routing::geocode::Address;
use crate::sdk::routing::route::RouteResult;
use crate::sdk::routing::service::RoutingProvider;
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use std::sync::Arc;
use tokio::sync::mpsc;

/// A finished provider call, tagged with the token it was issued under.
pub enum Outcome {
    Route {
        token: RequestToken,
        result: Result<RouteResult, RoutingError>,
    },
    Address {
        token: RequestToken,
        result: Result<Option<Address>, RoutingError>,
    },
}

/// Runs a coordinator against a provider on a single task. Provider calls
/// proceed concurrently with event handling and are applied in the order
/// they finish; the coordinator drops the ones that were superseded.
pub struct PlannerSession {
    coordinator: RouteCoordinator,
    provider: Arc<dyn RoutingProvider>,
    in_flight: FuturesUnordered<BoxFuture<'static, Outcome>>,
}

impl PlannerSession {
    pub fn new(coordinator: RouteCoordinator, provider: Arc<dyn RoutingProvider>) -> Self {
        Self {
            coordinator,
            provider,
            in_flight: FuturesUnordered::new(),
        }
    }

    pub fn coordinator(&self) -> &RouteCoordinator {
        &self.coordinator
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn dispatch(&mut self, event: PlannerEvent) {
        if let Some(request) = self.coordinator.handle(event) {
            self.issue(request);
        }
    }

    /// Waits for the next provider call to finish and applies it.
    /// Returns `false` when nothing was in flight.
    pub async fn poll_next(&mut self) -> bool {
        match self.in_flight.next().await {
            Some(outcome) => {
                self.apply(outcome);
                true
            }
            None => false,
        }
    }

    /// Applies outcomes until no provider call is left in flight.
    pub async fn settle(&mut self) {
        while self.poll_next().await {}
    }

    /// Consumes events until the channel closes, then lets outstanding
    /// calls finish.
    pub async fn run(mut self, mut events: mpsc::Receiver<PlannerEvent>) -> RouteCoordinator {
        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => self.dispatch(event),
                    None => break,
                },
                Some(outcome) = self.in_flight.next(), if !self.in_flight.is_empty() => {
                    self.apply(outcome);
                }
            }
        }
        log::debug!("Event channel closed, settling {} pending call(s)", self.in_flight.len());
        self.settle().await;
        self.coordinator
    }

    fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Route { token, result } => self.coordinator.on_route_resolved(token, result),
            Outcome::Address { token, result } => {
                if let Some(request) = self.coordinator.on_address_resolved(token, result) {
                    self.issue(request);
                }
            }
        }
    }

    fn issue(&mut self, request: Request) {
        let provider = Arc::clone(&self.provider);
        let call = match request {
            Request::Route { token, request } => async move {
                Outcome::Route {
                    token,
                    result: provider.compute_route(request).await,
                }
            }
            .boxed(),
            Request::ReverseGeocode { token, coord } => async move {
                Outcome::Address {
                    token,
                    result: provider.reverse_geocode(coord).await,
                }
            }
            .boxed(),
        };
        self.in_flight.push(call);
    }
}
