use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

/// Catalog entry as served by `GET /airports`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub code: String,
    pub name: String,
    pub city: String,
    pub country: String,
    pub lat: f64,
    pub lng: f64,
}

impl Airport {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            lat: self.lat,
            lon: self.lng,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Criterion {
    #[default]
    #[serde(rename = "km")]
    Distance,
    #[serde(rename = "horas")]
    Duration,
}

impl Criterion {
    pub fn as_wire(self) -> &'static str {
        match self {
            Criterion::Distance => "km",
            Criterion::Duration => "horas",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        match value.trim() {
            "km" => Some(Criterion::Distance),
            "horas" => Some(Criterion::Duration),
            _ => None,
        }
    }

    pub fn unit_label(self) -> &'static str {
        self.as_wire()
    }
}

/// Body of `POST /route`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    #[serde(rename = "origen")]
    pub origin: String,
    #[serde(rename = "destino")]
    pub destination: String,
    #[serde(rename = "criterio", default)]
    pub criterion: Criterion,
}

/// Reply of `POST /route`. The body shape is the only success signal;
/// the HTTP status carries no contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteReply {
    Found {
        #[serde(rename = "ruta")]
        path: Vec<String>,
        #[serde(rename = "costo")]
        cost: f64,
        #[serde(rename = "criterio", default, skip_serializing_if = "Option::is_none")]
        criterion: Option<Criterion>,
    },
    Failure {
        error: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}
