use planner::{
    AirportRegistry, Projection, RequestToken, RouteError, RouteSession, RouteState,
    RouteTicket, Selection, SessionEvent, Settlement, ThemeSetting, ThemeStore, Transition,
    ViewportController, markers, project,
};
use seed::{prelude::*, virtual_dom::AtValue, *};
use serde::Serialize;
use serde_wasm_bindgen::to_value;
use shared::{Airport, Criterion, RouteReply};
use wasm_bindgen::prelude::{JsValue, wasm_bindgen};

#[wasm_bindgen(module = "/leaflet_map.js")]
extern "C" {
    #[wasm_bindgen(js_name = initMap)]
    fn init_map();
    #[wasm_bindgen(js_name = updateMarkers)]
    fn update_markers_js(markers: JsValue);
    #[wasm_bindgen(js_name = updateRoute)]
    fn update_route_js(coords: JsValue);
    #[wasm_bindgen(js_name = fitBounds)]
    fn fit_bounds_js(bounds: JsValue);
    #[wasm_bindgen(js_name = setDarkTheme)]
    fn set_dark_theme(enabled: bool);
}

fn api_root() -> String {
    if let Some(url) = option_env!("FRONTEND_API_ROOT") {
        return url.trim_end_matches('/').to_string();
    }
    "http://localhost:5000".to_string()
}

pub struct Model {
    catalog: CatalogState,
    registry: AirportRegistry,
    session: RouteSession,
    projection: Projection,
    viewport: ViewportController,
    theme: ThemeSetting<LocalThemeStore>,
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum CatalogState {
    Loading,
    Loaded,
}

pub enum Msg {
    AirportsFetched(Result<Vec<Airport>, String>),
    OriginChanged(String),
    DestinationChanged(String),
    CriterionChanged(String),
    Submit,
    RouteFetched {
        token: RequestToken,
        outcome: Result<RouteReply, RouteError>,
    },
    ToggleTheme,
}

pub fn init(_: Url, orders: &mut impl Orders<Msg>) -> Model {
    orders.perform_cmd(fetch_airports());

    let theme = ThemeSetting::init(LocalThemeStore);
    set_dark_theme(theme.is_dark());

    Model {
        catalog: CatalogState::Loading,
        registry: AirportRegistry::empty(),
        session: RouteSession::new(),
        projection: Projection::default(),
        viewport: ViewportController::default(),
        theme,
    }
}

pub fn update(msg: Msg, model: &mut Model, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::AirportsFetched(result) => {
            model.registry = match result {
                Ok(airports) => AirportRegistry::from_airports(airports),
                Err(err) => {
                    web_sys::console::error_1(
                        &format!("[frontend] failed to load airports: {err}").into(),
                    );
                    AirportRegistry::empty()
                }
            };
            model.catalog = CatalogState::Loaded;
            sync_markers(model);
        }
        Msg::OriginChanged(code) => {
            model.session.handle(SessionEvent::SelectOrigin(code));
            sync_markers(model);
        }
        Msg::DestinationChanged(code) => {
            model.session.handle(SessionEvent::SelectDestination(code));
            sync_markers(model);
        }
        Msg::CriterionChanged(value) => {
            if let Some(criterion) = Criterion::from_wire(&value) {
                model.session.handle(SessionEvent::SelectCriterion(criterion));
            }
        }
        Msg::Submit => {
            if !submit_enabled(model.catalog, &model.session) {
                return;
            }
            if let Transition::Issued(ticket) = model.session.handle(SessionEvent::Submit) {
                sync_route_layer(model);
                orders.perform_cmd(send_route_request(ticket));
            }
        }
        Msg::RouteFetched { token, outcome } => {
            let transition = model
                .session
                .handle(SessionEvent::ResponseArrived { token, outcome });
            match transition {
                Transition::Settled(Settlement::Applied) => sync_route_layer(model),
                _ => web_sys::console::debug_1(
                    &format!("[frontend] dropped stale route reply #{}", token.value()).into(),
                ),
            }
        }
        Msg::ToggleTheme => {
            let theme = model.theme.toggle();
            set_dark_theme(model.theme.is_dark());
            web_sys::console::debug_1(&format!("[frontend] theme={}", theme.as_str()).into());
        }
    }
}

/// Submission gate: the catalog must be loaded and the selection must name
/// two distinct airports. Resubmitting while a request is in flight is
/// allowed; the older reply is discarded when it lands.
fn submit_enabled(catalog: CatalogState, session: &RouteSession) -> bool {
    catalog == CatalogState::Loaded && session.selection().can_submit()
}

async fn fetch_airports() -> Msg {
    let url = format!("{}/airports", api_root());
    let response = match Request::new(url).fetch().await {
        Err(err) => Err(format!("{err:?}")),
        Ok(resp) => resp
            .json::<Vec<Airport>>()
            .await
            .map_err(|err| format!("{err:?}")),
    };
    Msg::AirportsFetched(response)
}

async fn send_route_request(ticket: RouteTicket) -> Msg {
    let RouteTicket { token, request } = ticket;
    web_sys::console::debug_1(
        &format!(
            "[frontend] sending route request #{} {} -> {} ({})",
            token.value(),
            request.origin,
            request.destination,
            request.criterion.as_wire()
        )
        .into(),
    );
    // No status check: the reply body alone says whether a route was found.
    let outcome = match Request::new(format!("{}/route", api_root()))
        .method(Method::Post)
        .json(&request)
    {
        Err(err) => Err(RouteError::Transport(format!("{err:?}"))),
        Ok(request) => match request.fetch().await {
            Err(err) => Err(RouteError::Transport(format!("{err:?}"))),
            Ok(resp) => resp
                .json::<RouteReply>()
                .await
                .map_err(|err| RouteError::Decode(format!("{err:?}"))),
        },
    };
    if let Err(err) = &outcome {
        web_sys::console::error_1(&format!("[frontend] route request failed: {err}").into());
    }

    Msg::RouteFetched { token, outcome }
}

pub fn view(model: &Model) -> Node<Msg> {
    aside![
        C!["sidebar"],
        h1![C!["sidebar-title"], "LATAM Route Finder"],
        view_theme_toggle(model),
        p![
            C!["sidebar-subtitle"],
            "Encuentra la mejor ruta entre aeropuertos reales ✈"
        ],
        view_airport_select(
            model,
            "🛫 Origen",
            "Seleccionar origen",
            &model.session.selection().origin,
            Msg::OriginChanged
        ),
        view_airport_select(
            model,
            "🛬 Destino",
            "Seleccionar destino",
            &model.session.selection().destination,
            Msg::DestinationChanged
        ),
        view_criterion_select(model.session.selection()),
        button![
            C!["btn-calc"],
            if model.session.is_pending() {
                "Calculando..."
            } else {
                "Calcular Ruta"
            },
            attrs! { At::Disabled => bool_attr(!submit_enabled(model.catalog, &model.session)) },
            ev(Ev::Click, |event| {
                event.prevent_default();
                Msg::Submit
            }),
        ],
        view_result(model),
    ]
}

fn view_theme_toggle(model: &Model) -> Node<Msg> {
    div![
        C!["theme-toggle-container"],
        input![
            C!["theme-toggle-input"],
            id!["theme-toggle"],
            attrs! {
                At::Type => "checkbox",
                At::Checked => bool_attr(model.theme.is_dark()),
            },
            ev(Ev::Change, |_| Msg::ToggleTheme),
        ],
        label![
            C!["theme-toggle-label"],
            attrs! { At::For => "theme-toggle" },
            span![C!["toggle-icon", "sun"], "☀️"],
            span![C!["toggle-icon", "moon"], "🌙"],
            span![C!["toggle-ball"]],
        ],
    ]
}

fn view_airport_select(
    model: &Model,
    label: &str,
    placeholder: &str,
    selected: &str,
    msg: fn(String) -> Msg,
) -> Node<Msg> {
    let options = model.registry.sorted_by_code().into_iter().map(|airport| {
        option![
            attrs! {
                At::Value => &airport.code,
                At::Selected => bool_attr(airport.code == selected),
            },
            format!("{} — {}", airport.code, airport.city),
        ]
    });

    div![
        C!["input-group"],
        label![label],
        select![
            attrs! { At::Disabled => bool_attr(model.catalog == CatalogState::Loading) },
            option![
                attrs! {
                    At::Value => "",
                    At::Selected => bool_attr(selected.is_empty()),
                },
                placeholder,
            ],
            options,
            input_ev(Ev::Change, msg),
        ]
    ]
}

fn view_criterion_select(selection: &Selection) -> Node<Msg> {
    let choice = |criterion: Criterion, text: &str| {
        option![
            attrs! {
                At::Value => criterion.as_wire(),
                At::Selected => bool_attr(selection.criterion == criterion),
            },
            text,
        ]
    };

    div![
        C!["input-group"],
        label!["⚙ Criterio"],
        select![
            choice(Criterion::Distance, "Distancia (km)"),
            choice(Criterion::Duration, "Tiempo (horas)"),
            input_ev(Ev::Change, Msg::CriterionChanged),
        ]
    ]
}

fn view_result(model: &Model) -> Node<Msg> {
    match model.session.state() {
        RouteState::Ready(route) => {
            let last = route.path.len().saturating_sub(1);
            let hops = route.path.iter().enumerate().map(|(idx, code)| {
                span![
                    code,
                    IF!(idx < last => " → "),
                ]
            });
            let skipped = if model.projection.unresolved.is_empty() {
                empty![]
            } else {
                small![
                    C!["result-warning"],
                    format!(
                        "Sin coordenadas en el mapa: {}",
                        model.projection.unresolved.join(", ")
                    )
                ]
            };

            div![
                C!["result-card", "animate"],
                h3!["Ruta encontrada"],
                div![C!["result-path"], hops],
                p![
                    C!["result-cost"],
                    strong!["Total:"],
                    format!(" {}", route.cost_label()),
                ],
                skipped,
            ]
        }
        RouteState::Failed(message) => div![
            C!["result-card", "error", "animate"],
            h3!["Error"],
            p![message],
        ],
        RouteState::Idle | RouteState::Loading => empty![],
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    init_map();
    App::start("app", init, update, view);
}

#[derive(Serialize)]
struct MarkerPayload {
    code: String,
    lat: f64,
    lon: f64,
    role: &'static str,
    size: u32,
    title: String,
    subtitle: String,
}

fn marker_payloads(registry: &AirportRegistry, selection: &Selection) -> Vec<MarkerPayload> {
    markers(registry, selection)
        .into_iter()
        .map(|marker| MarkerPayload {
            code: marker.code,
            lat: marker.position.lat,
            lon: marker.position.lon,
            role: marker.role.as_str(),
            size: marker.role.icon_size(),
            title: marker.title,
            subtitle: marker.subtitle,
        })
        .collect()
}

fn sync_markers(model: &Model) {
    let payload = marker_payloads(&model.registry, model.session.selection());
    if let Ok(value) = to_value(&payload) {
        update_markers_js(value);
    }
}

/// Re-project the current route, redraw the polyline and reframe the map
/// when the projected sequence changed.
fn sync_route_layer(model: &mut Model) {
    model.projection = model
        .session
        .state()
        .route()
        .map(|route| project(route, &model.registry))
        .unwrap_or_default();

    let path: &[_] = if model.projection.is_drawable() {
        &model.projection.coords
    } else {
        &[]
    };
    if let Ok(value) = to_value(path) {
        update_route_js(value);
    }

    if let Some(command) = model.viewport.reframe(&model.projection.coords)
        && let Ok(bounds) = to_value(&command.bounds)
    {
        fit_bounds_js(bounds);
    }
}

struct LocalThemeStore;

impl LocalThemeStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl ThemeStore for LocalThemeStore {
    fn read(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn write(&mut self, key: &str, value: &str) {
        let stored = Self::storage().map(|storage| storage.set_item(key, value).is_ok());
        if stored != Some(true) {
            web_sys::console::error_1(&"[frontend] could not persist theme".into());
        }
    }
}

fn bool_attr(value: bool) -> AtValue {
    if value {
        AtValue::Some("true".into())
    } else {
        AtValue::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner::MarkerRole;

    fn airport(code: &str, lat: f64, lng: f64) -> Airport {
        Airport {
            code: code.into(),
            name: format!("Aeropuerto {code}"),
            city: format!("Ciudad {code}"),
            country: "Peru".into(),
            lat,
            lng,
        }
    }

    fn session_with(origin: &str, destination: &str) -> RouteSession {
        let mut session = RouteSession::new();
        session.handle(SessionEvent::SelectOrigin(origin.into()));
        session.handle(SessionEvent::SelectDestination(destination.into()));
        session
    }

    #[test]
    fn test_submit_disabled_until_catalog_loaded() {
        let session = session_with("LIM", "BOG");
        assert!(!submit_enabled(CatalogState::Loading, &session));
        assert!(submit_enabled(CatalogState::Loaded, &session));
    }

    #[test]
    fn test_submit_disabled_for_empty_or_equal_selection() {
        assert!(!submit_enabled(CatalogState::Loaded, &session_with("", "BOG")));
        assert!(!submit_enabled(CatalogState::Loaded, &session_with("LIM", "")));
        assert!(!submit_enabled(CatalogState::Loaded, &session_with("LIM", "LIM")));
    }

    #[test]
    fn test_resubmit_while_pending_supersedes_earlier_request() {
        let mut session = session_with("LIM", "BOG");
        let Transition::Issued(first) = session.handle(SessionEvent::Submit) else {
            panic!("first submit should issue");
        };
        assert!(submit_enabled(CatalogState::Loaded, &session));

        session.handle(SessionEvent::SelectDestination("SCL".into()));
        let Transition::Issued(second) = session.handle(SessionEvent::Submit) else {
            panic!("second submit should issue");
        };
        assert!(second.token > first.token);

        let stale = session.handle(SessionEvent::ResponseArrived {
            token: first.token,
            outcome: Ok(RouteReply::Failure {
                error: "late".into(),
            }),
        });
        assert_eq!(stale, Transition::Settled(Settlement::Stale));
        assert!(session.is_pending());
    }

    #[test]
    fn test_marker_payloads_carry_roles_and_sizes() {
        let registry = AirportRegistry::from_airports(vec![
            airport("LIM", -12.0, -77.0),
            airport("BOG", 4.7, -74.1),
            airport("SCL", -33.4, -70.8),
        ]);
        let selection = Selection {
            origin: "LIM".into(),
            destination: "BOG".into(),
            criterion: Criterion::Distance,
        };

        let payloads = marker_payloads(&registry, &selection);
        let summary: Vec<(&str, &str, u32)> = payloads
            .iter()
            .map(|p| (p.code.as_str(), p.role, p.size))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("LIM", MarkerRole::Origin.as_str(), 40),
                ("BOG", MarkerRole::Destination.as_str(), 40),
                ("SCL", MarkerRole::Default.as_str(), 28),
            ]
        );
        assert_eq!(payloads[0].subtitle, "Ciudad LIM, Peru");
    }
}
