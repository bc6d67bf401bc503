//! Auto-framing of the map around the projected route.

use shared::{Coordinate, RouteBounds};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportConfig {
    /// Symmetric padding added around the route's bounding box, in degrees.
    pub padding_deg: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self { padding_deg: 1.0 }
    }
}

/// Instruction for the map layer to fit the given bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportCommand {
    pub bounds: RouteBounds,
}

/// Issues one reframe per distinct projected sequence.
#[derive(Debug, Default)]
pub struct ViewportController {
    config: ViewportConfig,
    last_seen: Option<Vec<Coordinate>>,
}

impl ViewportController {
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            config,
            last_seen: None,
        }
    }

    /// Feed the latest projected sequence. Returns a command only when the
    /// sequence differs by value from the previous one and has more than
    /// one point.
    pub fn reframe(&mut self, coords: &[Coordinate]) -> Option<ViewportCommand> {
        if self.last_seen.as_deref() == Some(coords) {
            return None;
        }
        self.last_seen = Some(coords.to_vec());

        if coords.len() <= 1 {
            return None;
        }
        let bounds = bounding_box(coords)?;
        Some(ViewportCommand {
            bounds: pad(bounds, self.config.padding_deg),
        })
    }
}

/// Minimal box containing every coordinate.
pub fn bounding_box(coords: &[Coordinate]) -> Option<RouteBounds> {
    let first = coords.first()?;
    let seed = RouteBounds {
        min_lat: first.lat,
        max_lat: first.lat,
        min_lon: first.lon,
        max_lon: first.lon,
    };
    Some(coords.iter().skip(1).fold(seed, |b, c| RouteBounds {
        min_lat: b.min_lat.min(c.lat),
        max_lat: b.max_lat.max(c.lat),
        min_lon: b.min_lon.min(c.lon),
        max_lon: b.max_lon.max(c.lon),
    }))
}

fn pad(bounds: RouteBounds, padding: f64) -> RouteBounds {
    RouteBounds {
        min_lat: (bounds.min_lat - padding).max(-90.0),
        max_lat: (bounds.max_lat + padding).min(90.0),
        min_lon: (bounds.min_lon - padding).max(-180.0),
        max_lon: (bounds.max_lon + padding).min(180.0),
    }
}
