use shared::Coordinate;

use crate::{registry::AirportRegistry, session::FoundRoute};

/// Coordinates of a route, in route order, plus the codes that could not be
/// resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Projection {
    pub coords: Vec<Coordinate>,
    pub unresolved: Vec<String>,
}

impl Projection {
    pub fn is_drawable(&self) -> bool {
        self.coords.len() > 1
    }
}

/// Map route codes to coordinates. Unknown codes are skipped, never fatal.
pub fn project(route: &FoundRoute, registry: &AirportRegistry) -> Projection {
    project_codes(&route.path, registry)
}

pub fn project_codes(codes: &[String], registry: &AirportRegistry) -> Projection {
    let mut projection = Projection {
        coords: Vec::with_capacity(codes.len()),
        unresolved: Vec::new(),
    };

    for code in codes {
        match registry.by_code(code) {
            Some(airport) => projection.coords.push(airport.coordinate()),
            None => {
                tracing::warn!(%code, "route references an airport missing from the catalog, skipping it");
                projection.unresolved.push(code.clone());
            }
        }
    }

    projection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::airport;
    use shared::Criterion;

    fn registry() -> AirportRegistry {
        AirportRegistry::from_airports(vec![
            airport("LIM", -12.0, -77.0),
            airport("BOG", 4.7, -74.1),
            airport("SCL", -33.4, -70.8),
        ])
    }

    fn route(codes: &[&str]) -> FoundRoute {
        FoundRoute {
            path: codes.iter().map(|c| c.to_string()).collect(),
            cost: 1.0,
            criterion: Criterion::Distance,
        }
    }

    #[test]
    fn projects_in_route_order() {
        let projection = project(&route(&["LIM", "BOG"]), &registry());
        assert_eq!(
            projection.coords,
            vec![
                Coordinate { lat: -12.0, lon: -77.0 },
                Coordinate { lat: 4.7, lon: -74.1 },
            ]
        );
        assert!(projection.unresolved.is_empty());
        assert!(projection.is_drawable());
    }

    #[test]
    fn skips_unknown_code_and_continues() {
        let projection = project(&route(&["LIM", "XXX", "SCL"]), &registry());
        assert_eq!(
            projection.coords,
            vec![
                Coordinate { lat: -12.0, lon: -77.0 },
                Coordinate { lat: -33.4, lon: -70.8 },
            ]
        );
        assert_eq!(projection.unresolved, vec!["XXX".to_string()]);
    }

    #[test]
    fn empty_registry_projects_nothing() {
        let projection = project(&route(&["LIM", "BOG"]), &AirportRegistry::empty());
        assert!(projection.coords.is_empty());
        assert_eq!(projection.unresolved.len(), 2);
        assert!(!projection.is_drawable());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        const KNOWN: [&str; 3] = ["LIM", "BOG", "SCL"];

        fn known_codes() -> impl Strategy<Value = Vec<String>> {
            prop::collection::vec(prop::sample::select(KNOWN.to_vec()), 2..12)
                .prop_map(|codes| codes.into_iter().map(String::from).collect::<Vec<String>>())
        }

        proptest! {
            #[test]
            fn prop_complete_when_every_code_resolves(codes in known_codes()) {
                let registry = registry();
                let projection = project_codes(&codes, &registry);
                prop_assert_eq!(projection.coords.len(), codes.len());
                for (code, coord) in codes.iter().zip(&projection.coords) {
                    let expected = registry.by_code(code).map(|a| a.coordinate());
                    prop_assert_eq!(Some(*coord), expected);
                }
            }

            #[test]
            fn prop_one_unknown_code_drops_one_entry(
                codes in known_codes(),
                slot in any::<prop::sample::Index>()
            ) {
                let mut codes = codes;
                let at = slot.index(codes.len() + 1);
                codes.insert(at, "ZZZ".to_string());

                let projection = project_codes(&codes, &registry());
                prop_assert_eq!(projection.coords.len(), codes.len() - 1);
                prop_assert!(!projection.coords.is_empty());
                prop_assert_eq!(projection.unresolved, vec!["ZZZ".to_string()]);
            }
        }
    }
}
