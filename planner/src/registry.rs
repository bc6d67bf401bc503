//! Airport catalog cache.

use std::collections::HashMap;

use shared::Airport;

/// Read-only airport catalog with O(1) code lookup.
///
/// Built once from the `GET /airports` payload. An empty registry is a valid
/// state: it is what the UI falls back to when the catalog fails to load.
#[derive(Debug, Clone, Default)]
pub struct AirportRegistry {
    airports: Vec<Airport>,
    by_code: HashMap<String, usize>,
}

impl AirportRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the registry from a catalog payload. On duplicate codes the
    /// first entry is kept.
    pub fn from_airports(airports: Vec<Airport>) -> Self {
        let mut kept = Vec::with_capacity(airports.len());
        let mut by_code = HashMap::with_capacity(airports.len());

        for airport in airports {
            if by_code.contains_key(&airport.code) {
                tracing::warn!(code = %airport.code, "duplicate airport code in catalog, keeping first entry");
                continue;
            }
            by_code.insert(airport.code.clone(), kept.len());
            kept.push(airport);
        }

        tracing::debug!(count = kept.len(), "airport catalog loaded");
        Self {
            airports: kept,
            by_code,
        }
    }

    pub fn by_code(&self, code: &str) -> Option<&Airport> {
        self.by_code.get(code).map(|&idx| &self.airports[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Airport> {
        self.airports.iter()
    }

    /// Airports ordered by code, as listed in the selection inputs.
    pub fn sorted_by_code(&self) -> Vec<&Airport> {
        let mut sorted: Vec<&Airport> = self.airports.iter().collect();
        sorted.sort_by(|a, b| a.code.cmp(&b.code));
        sorted
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn airport(code: &str, lat: f64, lng: f64) -> Airport {
    Airport {
        code: code.to_string(),
        name: format!("{code} International"),
        city: format!("{code} City"),
        country: "Somewhere".to_string(),
        lat,
        lng,
    }
}
