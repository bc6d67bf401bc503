//! Headless driver for the route finder pipeline.

use planner::{
    AirportRegistry, Projection, RequestToken, RouteError, RouteSession, RouteState, RouteTicket,
    SessionEvent, Settlement, Transition, ViewportCommand, ViewportConfig, ViewportController,
    geo, project,
};
use shared::{Criterion, RouteReply};

use crate::{client::RouteService, error::CliError, panel::ResultPanel};

/// Everything derived from the session after a settlement.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteView {
    pub panel: ResultPanel,
    pub projection: Projection,
    pub reframe: Option<ViewportCommand>,
    pub legs_km: Vec<f64>,
}

pub struct RouteFinder<S> {
    service: S,
    registry: AirportRegistry,
    session: RouteSession,
    viewport: ViewportController,
}

impl<S: RouteService> RouteFinder<S> {
    /// Load the catalog once. A failed load leaves an empty catalog behind.
    pub async fn start(service: S, viewport: ViewportConfig) -> Self {
        let registry = match service.airports().await {
            Ok(airports) => AirportRegistry::from_airports(airports),
            Err(err) => {
                tracing::error!(error = %err, "failed to load airport catalog");
                AirportRegistry::empty()
            }
        };
        tracing::info!(airports = registry.len(), "route finder ready");

        Self {
            service,
            registry,
            session: RouteSession::new(),
            viewport: ViewportController::new(viewport),
        }
    }

    pub fn registry(&self) -> &AirportRegistry {
        &self.registry
    }

    pub fn session(&self) -> &RouteSession {
        &self.session
    }

    /// Input layer: only catalog codes can be picked, and the pair must be
    /// submittable.
    pub fn select(
        &mut self,
        origin: &str,
        destination: &str,
        criterion: Criterion,
    ) -> Result<(), CliError> {
        for code in [origin, destination] {
            if self.registry.by_code(code).is_none() {
                return Err(CliError::UnknownAirport(code.to_string()));
            }
        }
        self.session.handle(SessionEvent::SelectOrigin(origin.to_string()));
        self.session.handle(SessionEvent::SelectDestination(destination.to_string()));
        self.session.handle(SessionEvent::SelectCriterion(criterion));

        if self.session.selection().can_submit() {
            Ok(())
        } else {
            Err(CliError::InvalidSelection)
        }
    }

    pub fn issue(&mut self) -> Result<RouteTicket, CliError> {
        match self.session.handle(SessionEvent::Submit) {
            Transition::Issued(ticket) => Ok(ticket),
            _ => Err(CliError::InvalidSelection),
        }
    }

    pub async fn fetch(&self, ticket: &RouteTicket) -> Result<RouteReply, RouteError> {
        self.service
            .route(&ticket.request)
            .await
            .map_err(RouteError::from)
    }

    /// Feed a reply back into the session. Stale replies yield `None`.
    pub fn settle(
        &mut self,
        token: RequestToken,
        outcome: Result<RouteReply, RouteError>,
    ) -> Option<RouteView> {
        match self
            .session
            .handle(SessionEvent::ResponseArrived { token, outcome })
        {
            Transition::Settled(Settlement::Applied) => Some(self.view()),
            _ => None,
        }
    }

    pub async fn submit(&mut self) -> Result<RouteView, CliError> {
        let ticket = self.issue()?;
        let outcome = self.fetch(&ticket).await;
        self.settle(ticket.token, outcome).ok_or(CliError::Superseded)
    }

    pub fn view(&mut self) -> RouteView {
        let state = self.session.state();
        let projection = match state {
            RouteState::Ready(route) => project(route, &self.registry),
            _ => Projection::default(),
        };
        let panel = ResultPanel::from(state);
        let reframe = self.viewport.reframe(&projection.coords);
        let legs_km = geo::legs(&projection.coords);

        RouteView {
            panel,
            projection,
            reframe,
            legs_km,
        }
    }
}
