pub mod client;
pub mod error;
pub mod finder;
pub mod panel;

pub const DEFAULT_API_ROOT: &str = "http://localhost:5000";
