use planner::RouteError;
use thiserror::Error;

/// Failure of a single HTTP exchange with the route service.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("response body is not a recognised payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<FetchError> for RouteError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Transport(e) => RouteError::Transport(e.to_string()),
            FetchError::Decode(e) => RouteError::Decode(e.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("airport {0} is not in the catalog")]
    UnknownAirport(String),
    #[error("origin and destination must be two different airports")]
    InvalidSelection,
    #[error("route request was superseded by a newer one")]
    Superseded,
}
