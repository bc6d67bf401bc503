//! Text rendering of the catalog and the result panel.

use std::fmt;

use planner::{AirportRegistry, RouteState};

use crate::finder::RouteView;

#[derive(Debug, Clone, PartialEq)]
pub enum ResultPanel {
    Waiting,
    Calculating,
    Found { path: String, cost: String },
    Error { message: String },
}

impl From<&RouteState> for ResultPanel {
    fn from(state: &RouteState) -> Self {
        match state {
            RouteState::Idle => ResultPanel::Waiting,
            RouteState::Loading => ResultPanel::Calculating,
            RouteState::Ready(route) => ResultPanel::Found {
                path: route.path_label(),
                cost: route.cost_label(),
            },
            RouteState::Failed(message) => ResultPanel::Error {
                message: message.clone(),
            },
        }
    }
}

impl fmt::Display for ResultPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultPanel::Waiting => write!(f, "Seleccione origen y destino"),
            ResultPanel::Calculating => write!(f, "Calculando..."),
            ResultPanel::Found { path, cost } => {
                writeln!(f, "Ruta encontrada")?;
                writeln!(f, "{path}")?;
                write!(f, "Total: {cost}")
            }
            ResultPanel::Error { message } => {
                writeln!(f, "Error")?;
                write!(f, "{message}")
            }
        }
    }
}

pub fn render_catalog(registry: &AirportRegistry) -> String {
    if registry.is_empty() {
        return "catalogo de aeropuertos no disponible".to_string();
    }
    registry
        .sorted_by_code()
        .into_iter()
        .map(|a| format!("{} — {} ({}, {})", a.code, a.city, a.name, a.country))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_route(view: &RouteView) -> String {
    let mut lines = vec![view.panel.to_string()];

    if view.projection.is_drawable() {
        let points: Vec<String> = view
            .projection
            .coords
            .iter()
            .map(|c| format!("({:.4}, {:.4})", c.lat, c.lon))
            .collect();
        lines.push(format!("Trazado: {}", points.join(" → ")));

        let legs: Vec<String> = view.legs_km.iter().map(|km| format!("{km:.0} km")).collect();
        lines.push(format!("Tramos (gran circulo): {}", legs.join(", ")));
    }
    if !view.projection.unresolved.is_empty() {
        lines.push(format!(
            "Aeropuertos sin coordenadas omitidos: {}",
            view.projection.unresolved.join(", ")
        ));
    }
    if let Some(command) = view.reframe {
        let b = command.bounds;
        lines.push(format!(
            "Encuadre: lat [{:.2}, {:.2}] lon [{:.2}, {:.2}]",
            b.min_lat, b.max_lat, b.min_lon, b.max_lon
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner::FoundRoute;
    use shared::Criterion;

    #[test]
    fn found_panel_shows_path_and_cost() {
        let state = RouteState::Ready(FoundRoute {
            path: vec!["LIM".into(), "BOG".into()],
            cost: 1878.0,
            criterion: Criterion::Distance,
        });
        assert_eq!(
            ResultPanel::from(&state).to_string(),
            "Ruta encontrada\nLIM → BOG\nTotal: 1878 km"
        );
    }

    #[test]
    fn error_panel_is_verbatim() {
        let state = RouteState::Failed("Aeropuerto no encontrado".into());
        assert_eq!(
            ResultPanel::from(&state).to_string(),
            "Error\nAeropuerto no encontrado"
        );
    }

    #[test]
    fn empty_catalog_is_reported() {
        assert_eq!(
            render_catalog(&AirportRegistry::empty()),
            "catalogo de aeropuertos no disponible"
        );
    }
}
