//! Single binary web server: JSON API over the in-memory fixture store.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! Play window hours: PLAY_WINDOW_START, PLAY_WINDOW_END, PLAY_WINDOW_RESET.
//! Preload a venue pool with VENUES_CSV=path/to/venues.csv.

use actix_web::{
    get, post,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::NaiveDateTime;
use cricket_fixtures_web::store::{read_team_registrations_csv, read_venues_csv};
use cricket_fixtures_web::{
    classify_by_stage_and_group, list_fixture_summaries, schedule_group_stage, Config,
    GroupLabel, InMemoryStore, ScheduleError, StoreError, Team, TeamId, Tournament,
    TournamentCatalog, TournamentId, Venue,
};
use serde::Deserialize;
use std::sync::RwLock;
use std::time::Duration;

/// One week.
const MAX_MATCH_INTERVAL_MINUTES: u64 = 7 * 24 * 60;

/// All tournaments, teams, venues, and fixtures.
type AppState = Data<RwLock<InMemoryStore>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    /// e.g. "2024-01-01T09:00:00"
    start_date: NaiveDateTime,
    #[serde(default = "default_match_interval_minutes")]
    match_interval_minutes: u64,
}

fn default_match_interval_minutes() -> u64 {
    120
}

#[derive(Deserialize)]
struct CreateTeamBody {
    name: String,
}

#[derive(Deserialize)]
struct RegisterTeamBody {
    team_id: TeamId,
    group: GroupLabel,
}

#[derive(Deserialize)]
struct CreateVenueBody {
    country: String,
    ground: String,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

fn error_body(status: actix_web::http::StatusCode, message: impl ToString) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({ "error": message.to_string() }))
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

fn store_error_response(e: &StoreError) -> HttpResponse {
    use actix_web::http::StatusCode;
    let status = match e {
        StoreError::UnknownTournament(_) | StoreError::UnknownTeam(_) => StatusCode::NOT_FOUND,
        StoreError::AlreadyRegistered { .. } | StoreError::Import(_) => StatusCode::BAD_REQUEST,
        StoreError::ConstraintViolation(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_body(status, e)
}

fn schedule_error_response(e: &ScheduleError) -> HttpResponse {
    use actix_web::http::StatusCode;
    match e {
        ScheduleError::TournamentNotFound(_) => error_body(StatusCode::NOT_FOUND, e),
        ScheduleError::NoVenuesAvailable | ScheduleError::VenueExhausted { .. } => {
            error_body(StatusCode::CONFLICT, e)
        }
        ScheduleError::ScheduleOutOfRange { .. } => error_body(StatusCode::UNPROCESSABLE_ENTITY, e),
        ScheduleError::Store(inner) => store_error_response(inner),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "cricket-fixtures-web",
    })
}

/// Create a tournament in Scheduled status.
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let name = body.name.trim();
    if name.is_empty() {
        return error_body(actix_web::http::StatusCode::BAD_REQUEST, "Tournament name is required");
    }
    if !(1..=MAX_MATCH_INTERVAL_MINUTES).contains(&body.match_interval_minutes) {
        return error_body(
            actix_web::http::StatusCode::BAD_REQUEST,
            format!("match_interval_minutes must be between 1 and {MAX_MATCH_INTERVAL_MINUTES}"),
        );
    }
    let tournament = Tournament::new(
        name,
        body.start_date,
        Duration::from_secs(body.match_interval_minutes * 60),
    );
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    g.insert_tournament(tournament.clone());
    log::info!("Created tournament '{}' ({})", tournament.name, tournament.id);
    HttpResponse::Ok().json(tournament)
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.find_tournament(path.id) {
        Ok(Some(t)) => HttpResponse::Ok().json(t),
        Ok(None) => error_body(actix_web::http::StatusCode::NOT_FOUND, "No tournament"),
        Err(e) => store_error_response(&e),
    }
}

#[post("/api/teams")]
async fn api_create_team(state: AppState, body: Json<CreateTeamBody>) -> HttpResponse {
    let name = body.name.trim();
    if name.is_empty() {
        return error_body(actix_web::http::StatusCode::BAD_REQUEST, "Team name is required");
    }
    let team = Team::new(name);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    g.add_team(team.clone());
    HttpResponse::Ok().json(team)
}

/// Register an existing team into Group A or Group B.
#[post("/api/tournaments/{id}/registrations")]
async fn api_register_team(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<RegisterTeamBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.register_team(path.id, body.team_id, body.group) {
        Ok(registration) => HttpResponse::Ok().json(registration),
        Err(e) => store_error_response(&e),
    }
}

/// Bulk registration from a `team,group` CSV body. Creates one team per row.
#[post("/api/tournaments/{id}/registrations/csv")]
async fn api_import_registrations(state: AppState, path: Path<TournamentPath>, body: String) -> HttpResponse {
    let rows = match read_team_registrations_csv(body.as_bytes()) {
        Ok(rows) => rows,
        Err(e) => return store_error_response(&e),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.import_registrations(path.id, rows) {
        Ok(registrations) => {
            log::info!("Imported {} registration(s) into {}", registrations.len(), path.id);
            HttpResponse::Ok().json(registrations)
        }
        Err(e) => store_error_response(&e),
    }
}

#[post("/api/venues")]
async fn api_create_venue(state: AppState, body: Json<CreateVenueBody>) -> HttpResponse {
    let (country, ground) = (body.country.trim(), body.ground.trim());
    if country.is_empty() || ground.is_empty() {
        return error_body(
            actix_web::http::StatusCode::BAD_REQUEST,
            "country and ground are required",
        );
    }
    let venue = Venue::new(country, ground);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    g.add_venue(venue.clone());
    HttpResponse::Ok().json(venue)
}

/// Venue pool in allocation order.
#[get("/api/venues")]
async fn api_list_venues(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.find_all_venues() {
        Ok(venues) => HttpResponse::Ok().json(venues),
        Err(e) => store_error_response(&e),
    }
}

/// Append venues from a `country,ground` CSV body to the pool.
#[post("/api/venues/csv")]
async fn api_import_venues(state: AppState, body: String) -> HttpResponse {
    let venues = match read_venues_csv(body.as_bytes()) {
        Ok(venues) => venues,
        Err(e) => return store_error_response(&e),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    for venue in &venues {
        g.add_venue(venue.clone());
    }
    HttpResponse::Ok().json(venues)
}

/// Schedule the group stage (Group A, then Group B a day later) and mark the tournament ongoing.
#[post("/api/tournaments/{id}/schedule")]
async fn api_schedule_group_stage(
    state: AppState,
    config: Data<Config>,
    path: Path<TournamentPath>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match schedule_group_stage(&mut *g, path.id, config.play_window) {
        Ok(summaries) => HttpResponse::Ok().json(summaries),
        Err(e) => {
            log::warn!("Scheduling tournament {} failed: {e}", path.id);
            schedule_error_response(&e)
        }
    }
}

/// Every fixture of the tournament as match summaries, ordered by date.
#[get("/api/tournaments/{id}/fixtures")]
async fn api_list_fixtures(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match list_fixture_summaries(&*g, path.id) {
        Ok(summaries) => HttpResponse::Ok().json(summaries),
        Err(e) => schedule_error_response(&e),
    }
}

/// Knockout fixtures grouped by stage (playoffs/semifinals/finals) and group.
#[get("/api/tournaments/{id}/matches/by-stage")]
async fn api_matches_by_stage(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match classify_by_stage_and_group(&*g, path.id) {
        Ok(buckets) => HttpResponse::Ok().json(buckets),
        Err(e) => schedule_error_response(&e),
    }
}

fn load_store(config: &Config) -> std::io::Result<InMemoryStore> {
    let mut store = InMemoryStore::new();
    if let Some(path) = &config.venues_csv {
        let file = std::fs::File::open(path)?;
        let venues = read_venues_csv(file)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        log::info!("Loaded {} venue(s) from {}", venues.len(), path.display());
        for venue in venues {
            store.add_venue(venue);
        }
    }
    Ok(store)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    log::info!(
        "Play window {:02}:00-{:02}:59",
        config.play_window.start_hour(),
        config.play_window.end_hour()
    );

    let state = Data::new(RwLock::new(load_store(&config)?));
    let config = Data::new(config);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(config.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_create_team)
            .service(api_register_team)
            .service(api_import_registrations)
            .service(api_create_venue)
            .service(api_list_venues)
            .service(api_import_venues)
            .service(api_schedule_group_stage)
            .service(api_list_fixtures)
            .service(api_matches_by_stage)
    })
    .bind(bind)?
    .run()
    .await
}
