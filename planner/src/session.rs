//! Selection state and route request lifecycle.
//!
//! The session is an explicit state machine driven by discrete events. Route
//! requests are not cancelled: every request gets a monotonically increasing
//! [`RequestToken`] and only the reply carrying the latest token is applied.

use shared::{Criterion, RouteReply, RouteRequest};

use crate::error::RouteError;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    pub origin: String,
    pub destination: String,
    pub criterion: Criterion,
}

impl Selection {
    /// Submission gate used by the input layer.
    pub fn can_submit(&self) -> bool {
        !self.origin.is_empty() && !self.destination.is_empty() && self.origin != self.destination
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// A request that has been issued and awaits settlement.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteTicket {
    pub token: RequestToken,
    pub request: RouteRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FoundRoute {
    pub path: Vec<String>,
    pub cost: f64,
    pub criterion: Criterion,
}

impl FoundRoute {
    pub fn path_label(&self) -> String {
        self.path.join(" → ")
    }

    pub fn cost_label(&self) -> String {
        format!("{} {}", format_cost(self.cost), self.criterion.unit_label())
    }
}

/// Settled result of a route request. Success and failure never mix.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Found(FoundRoute),
    Failed { message: String },
}

impl Route {
    /// Normalize a backend reply. `requested` fills in a missing `criterio`.
    pub fn from_reply(reply: RouteReply, requested: Criterion) -> Self {
        match reply {
            RouteReply::Failure { error } => Route::Failed { message: error },
            RouteReply::Found { path, .. } if path.len() < 2 => Route::from(RouteError::Malformed(
                format!("expected at least 2 airport codes, got {}", path.len()),
            )),
            RouteReply::Found { cost, .. } if !cost.is_finite() || cost < 0.0 => {
                Route::from(RouteError::Malformed(format!("invalid cost {cost}")))
            }
            RouteReply::Found {
                path,
                cost,
                criterion,
            } => Route::Found(FoundRoute {
                path,
                cost,
                criterion: criterion.unwrap_or(requested),
            }),
        }
    }
}

impl From<RouteError> for Route {
    fn from(err: RouteError) -> Self {
        Route::Failed {
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RouteState {
    #[default]
    Idle,
    Loading,
    Ready(FoundRoute),
    Failed(String),
}

impl RouteState {
    pub fn route(&self) -> Option<&FoundRoute> {
        match self {
            RouteState::Ready(route) => Some(route),
            _ => None,
        }
    }
}

impl From<Route> for RouteState {
    fn from(route: Route) -> Self {
        match route {
            Route::Found(found) => RouteState::Ready(found),
            Route::Failed { message } => RouteState::Failed(message),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SelectOrigin(String),
    SelectDestination(String),
    SelectCriterion(Criterion),
    Submit,
    ResponseArrived {
        token: RequestToken,
        outcome: Result<RouteReply, RouteError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Applied,
    Stale,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    SelectionChanged,
    /// Submission was gated off by the selection invariant.
    Rejected,
    Issued(RouteTicket),
    Settled(Settlement),
}

#[derive(Debug, Default)]
pub struct RouteSession {
    selection: Selection,
    state: RouteState,
    next_token: u64,
    in_flight: Option<(RequestToken, Criterion)>,
}

impl RouteSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn state(&self) -> &RouteState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, RouteState::Loading)
    }

    pub fn handle(&mut self, event: SessionEvent) -> Transition {
        match event {
            SessionEvent::SelectOrigin(code) => {
                self.selection.origin = code;
                Transition::SelectionChanged
            }
            SessionEvent::SelectDestination(code) => {
                self.selection.destination = code;
                Transition::SelectionChanged
            }
            SessionEvent::SelectCriterion(criterion) => {
                self.selection.criterion = criterion;
                Transition::SelectionChanged
            }
            SessionEvent::Submit => {
                if !self.selection.can_submit() {
                    return Transition::Rejected;
                }
                let Selection {
                    origin,
                    destination,
                    criterion,
                } = self.selection.clone();
                Transition::Issued(self.request_route(origin, destination, criterion))
            }
            SessionEvent::ResponseArrived { token, outcome } => {
                Transition::Settled(self.settle(token, outcome))
            }
        }
    }

    /// Issue a new request. Any request still in flight becomes stale.
    ///
    /// The selection invariant is not checked here; callers gate on
    /// [`Selection::can_submit`].
    pub fn request_route(
        &mut self,
        origin: impl Into<String>,
        destination: impl Into<String>,
        criterion: Criterion,
    ) -> RouteTicket {
        self.next_token += 1;
        let token = RequestToken(self.next_token);
        if let Some((previous, _)) = self.in_flight.replace((token, criterion)) {
            tracing::debug!(
                previous = previous.value(),
                current = token.value(),
                "superseding in-flight route request"
            );
        }
        self.state = RouteState::Loading;

        RouteTicket {
            token,
            request: RouteRequest {
                origin: origin.into(),
                destination: destination.into(),
                criterion,
            },
        }
    }

    /// Apply the outcome of the request identified by `token`, unless a newer
    /// request has been issued since.
    pub fn settle(
        &mut self,
        token: RequestToken,
        outcome: Result<RouteReply, RouteError>,
    ) -> Settlement {
        let criterion = match self.in_flight {
            Some((current, criterion)) if current == token => criterion,
            _ => {
                tracing::debug!(token = token.value(), "discarding stale route reply");
                return Settlement::Stale;
            }
        };
        self.in_flight = None;

        let route = match outcome {
            Ok(reply) => Route::from_reply(reply, criterion),
            Err(err) => {
                tracing::warn!(error = %err, "route request failed");
                Route::from(err)
            }
        };
        self.state = RouteState::from(route);
        Settlement::Applied
    }
}

fn format_cost(cost: f64) -> String {
    // -0.0 + 0.0 == +0.0
    let cost = cost + 0.0;
    if cost.fract() == 0.0 {
        format!("{cost:.0}")
    } else if cost.abs() < 0.01 {
        // two decimals would round a real cost down to "0"
        format!("{cost}")
    } else {
        let text = format!("{cost:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
