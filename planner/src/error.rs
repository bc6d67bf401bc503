use thiserror::Error;

/// Failure of a route request that never produced a backend reply body.
///
/// Backend error bodies are not represented here: they are stored verbatim
/// as a failed [`crate::Route`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    #[error("route service unreachable: {0}")]
    Transport(String),
    #[error("unreadable route reply: {0}")]
    Decode(String),
    #[error("malformed route reply: {0}")]
    Malformed(String),
}
