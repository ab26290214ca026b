use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use catalyst_parser::{
    build_grid, default_year, selectable_years, to_ics, DayCell, Event, TooltipStyle, BASE_YEARS,
};
use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::catalyst::{resolve, CatalystSource, Resolution};
use crate::error::Error;
use crate::source::Fetcher;
use crate::storage::{parse_names, RecordStore};

const CALENDAR_PATH: &str = "/calendar";
const YEARS_PATH: &str = "/years";
const WATCHLIST_PATH: &str = "/watchlist";
const WATCHLIST: &str = "watchlist";

pub struct AppState {
    pub fetcher: Fetcher,
    pub sources: Vec<CatalystSource>,
    pub events: Vec<Event>,
    pub store: Arc<dyn RecordStore>,
}

type SharedState = Arc<AppState>;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(CALENDAR_PATH, get(handle_calendar))
        .route(YEARS_PATH, get(handle_years))
        .route(WATCHLIST_PATH, get(handle_get_watchlist).put(handle_put_watchlist))
        .fallback(|| async { Redirect::temporary("/calendar?format=svg") })
        .with_state(Arc::new(state))
}

#[derive(Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum Format {
    #[default]
    Json,
    Svg,
    Ics,
}

#[derive(Deserialize)]
struct CalendarQuery {
    year: Option<i32>,
    #[serde(default)]
    format: Format,
    #[serde(default)]
    tooltips: TooltipStyle,
}

#[derive(Serialize)]
struct CalendarBody<'a> {
    year: i32,
    weeks: u32,
    cells: &'a [DayCell],
    notices: &'a [String],
}

#[derive(Serialize)]
struct YearsBody {
    years: Vec<i32>,
    default: i32,
}

async fn resolve_state(state: &AppState) -> Resolution {
    resolve(&state.fetcher, &state.sources, &state.events).await
}

fn pick_year(events: &[Event]) -> (Vec<i32>, i32) {
    let years = selectable_years(events, BASE_YEARS);
    let default = default_year(events, &years).unwrap_or(*BASE_YEARS.start());
    (years, default)
}

async fn handle_calendar(
    State(state): State<SharedState>,
    Query(query): Query<CalendarQuery>,
) -> Response {
    let resolution = resolve_state(&state).await;

    if query.format == Format::Ics {
        let ics = to_ics(env!("CARGO_PKG_NAME"), &resolution.events).to_string();
        return ([("content-type", "text/calendar")], ics).into_response();
    }

    let year = query
        .year
        .unwrap_or_else(|| pick_year(&resolution.events).1);

    debug!("Building grid for {year} with {} events", resolution.events.len());
    let grid = build_grid(year, &resolution.events, query.tooltips);

    if query.format == Format::Svg {
        return match crate::render::render_svg(&grid, &resolution.notices) {
            Ok(svg) => ([("content-type", "image/svg+xml")], svg).into_response(),
            Err(err) => internal_error(err),
        };
    }

    Json(CalendarBody {
        year: grid.year(),
        weeks: grid.weeks(),
        cells: grid.cells(),
        notices: &resolution.notices,
    })
    .into_response()
}

async fn handle_years(State(state): State<SharedState>) -> Json<YearsBody> {
    let resolution = resolve_state(&state).await;
    let (years, default) = pick_year(&resolution.events);
    Json(YearsBody { years, default })
}

fn internal_error(err: Error) -> Response {
    error!("{err}");
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
}

async fn handle_get_watchlist(State(state): State<SharedState>) -> Response {
    match state.store.load(WATCHLIST) {
        Ok(names) => Json(names).into_response(),
        Err(err) => internal_error(err.into()),
    }
}

async fn handle_put_watchlist(State(state): State<SharedState>, body: String) -> Response {
    let names = parse_names(&body);

    match state.store.save(WATCHLIST, &names) {
        Ok(()) => Json(names).into_response(),
        Err(err) => internal_error(err.into()),
    }
}
