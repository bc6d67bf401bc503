use shared::Coordinate;

use crate::{registry::AirportRegistry, session::Selection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerRole {
    Default,
    Origin,
    Destination,
}

impl MarkerRole {
    /// Square icon size in pixels; the anchor sits at the bottom centre.
    pub fn icon_size(self) -> u32 {
        match self {
            MarkerRole::Default => 28,
            MarkerRole::Origin | MarkerRole::Destination => 40,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MarkerRole::Default => "default",
            MarkerRole::Origin => "origin",
            MarkerRole::Destination => "destination",
        }
    }
}

/// Marker role of `code` under the current selection. Empty selection codes
/// never match. The inputs may briefly name the same airport twice (submit
/// stays disabled); the destination icon wins then.
pub fn resolve(code: &str, origin: &str, destination: &str) -> MarkerRole {
    if !destination.is_empty() && code == destination {
        MarkerRole::Destination
    } else if !origin.is_empty() && code == origin {
        MarkerRole::Origin
    } else {
        MarkerRole::Default
    }
}

/// Everything the map layer needs to draw one airport marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerView {
    pub code: String,
    pub position: Coordinate,
    pub role: MarkerRole,
    pub title: String,
    pub subtitle: String,
}

pub fn markers(registry: &AirportRegistry, selection: &Selection) -> Vec<MarkerView> {
    registry
        .iter()
        .map(|airport| MarkerView {
            code: airport.code.clone(),
            position: airport.coordinate(),
            role: resolve(&airport.code, &selection.origin, &selection.destination),
            title: airport.name.clone(),
            subtitle: format!("{}, {}", airport.city, airport.country),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::airport;

    #[test]
    fn origin_destination_and_default() {
        assert_eq!(resolve("LIM", "LIM", "BOG"), MarkerRole::Origin);
        assert_eq!(resolve("BOG", "LIM", "BOG"), MarkerRole::Destination);
        assert_eq!(resolve("SCL", "LIM", "BOG"), MarkerRole::Default);
    }

    #[test]
    fn equal_selection_shows_destination() {
        assert_eq!(resolve("LIM", "LIM", "LIM"), MarkerRole::Destination);
        assert_eq!(resolve("BOG", "LIM", "LIM"), MarkerRole::Default);
    }

    #[test]
    fn empty_selection_never_matches() {
        assert_eq!(resolve("", "", ""), MarkerRole::Default);
        assert_eq!(resolve("LIM", "", ""), MarkerRole::Default);
    }

    #[test]
    fn markers_follow_selection() {
        let registry = AirportRegistry::from_airports(vec![
            airport("LIM", -12.0, -77.0),
            airport("BOG", 4.7, -74.1),
            airport("SCL", -33.4, -70.8),
        ]);
        let selection = Selection {
            origin: "BOG".into(),
            destination: "SCL".into(),
            ..Selection::default()
        };

        let roles: Vec<(String, MarkerRole)> = markers(&registry, &selection)
            .into_iter()
            .map(|m| (m.code, m.role))
            .collect();
        assert_eq!(
            roles,
            vec![
                ("LIM".to_string(), MarkerRole::Default),
                ("BOG".to_string(), MarkerRole::Origin),
                ("SCL".to_string(), MarkerRole::Destination),
            ]
        );
    }

    #[test]
    fn marker_popup_text() {
        let registry = AirportRegistry::from_airports(vec![airport("LIM", -12.0, -77.0)]);
        let marker = &markers(&registry, &Selection::default())[0];
        assert_eq!(marker.title, "LIM International");
        assert_eq!(marker.subtitle, "LIM City, Somewhere");
        assert_eq!(marker.position, Coordinate { lat: -12.0, lon: -77.0 });
        assert_eq!(marker.role.icon_size(), 28);
    }
}
