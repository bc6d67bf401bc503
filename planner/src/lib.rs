//! Client-side derived-view pipeline for the route finder.
//!
//! Everything here is synchronous and free of I/O: the frontend and the
//! native client perform the fetches and feed the results back in as events.

pub mod error;
pub mod geo;
pub mod icons;
pub mod projector;
pub mod registry;
pub mod session;
pub mod theme;
pub mod viewport;

pub use error::RouteError;
pub use icons::{MarkerRole, MarkerView, markers, resolve};
pub use projector::{Projection, project};
pub use registry::AirportRegistry;
pub use session::{
    FoundRoute, RequestToken, Route, RouteSession, RouteState, RouteTicket, Selection,
    SessionEvent, Settlement, Transition,
};
pub use theme::{Theme, ThemeSetting, ThemeStore};
pub use viewport::{ViewportCommand, ViewportConfig, ViewportController};
