//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! Picker settings come from PICKER_* variables (see `AppConfig`).

use actix_files::Files;
use actix_web::{
    delete, error::InternalError, get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use team_activity_picker::{
    generate_groups, generate_matches, generate_squads, pick_board_speaker, Activity,
    ActivityBoard, AppConfig, BoardId, GenerationTicket, GroupSize, MatchMode, PickerError,
    RosterBook,
};

/// Per-board entry: board data + last activity time (for auto-cleanup).
struct BoardEntry {
    board: ActivityBoard,
    last_activity: Instant,
}

/// In-memory state: many boards by ID. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<BoardId, BoardEntry>>>;
type Rosters = Data<RosterBook>;
type Settings = Data<AppConfig>;

/// Inactivity threshold: boards not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Board after a generation, with the one-line summary for the toast.
#[derive(Serialize)]
struct GenerateResponse<'a> {
    headline: Option<&'static str>,
    board: &'a ActivityBoard,
}

#[derive(Deserialize)]
struct GroupsBody {
    group_size: serde_json::Value,
}

#[derive(Deserialize)]
struct SetModeBody {
    mode: MatchMode,
}

/// Path segment: board id (e.g. /api/boards/{id})
#[derive(Deserialize)]
struct BoardPath {
    id: BoardId,
}

/// Path segments: board id and game (e.g. /api/boards/{id}/games/{game})
#[derive(Deserialize)]
struct BoardGamePath {
    id: BoardId,
    game: Activity,
}

fn no_board() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No board" }))
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(serde_json::json!({ "error": "lock error" }))
}

/// Body or path that failed to deserialize: same `{"error": ...}` shape as handler errors.
fn extractor_error(err: impl std::fmt::Display + std::fmt::Debug + 'static) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(serde_json::json!({ "error": err.to_string() }));
    InternalError::from_response(err, response).into()
}

/// API routes plus JSON/path extractor error handling. Shared by the server and tests.
fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| extractor_error(err)))
        .app_data(web::PathConfig::default().error_handler(|err, _req| extractor_error(err)))
        .service(api_health)
        .service(api_rosters)
        .service(api_create_board)
        .service(api_get_board)
        .service(api_pick_speaker)
        .service(api_reset_speaker_history)
        .service(api_generate_groups)
        .service(api_set_mode)
        .service(api_generate_matches)
        .service(api_generate_squads);
}

fn error_response(e: &PickerError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        PickerError::StaleGeneration => HttpResponse::Conflict().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn headline(board: &ActivityBoard, activity: Activity) -> Option<&'static str> {
    match activity {
        Activity::General => board.groups.as_ref().map(|o| o.headline()),
        Activity::Speaker => board.speaker.current.as_ref().map(|_| "Time to shine!"),
        Activity::Cricket => board.squads.as_ref().map(|_| "Squads are ready!"),
        game => board
            .game(game)
            .ok()
            .and_then(|g| g.outcome.as_ref())
            .map(|o| o.headline()),
    }
}

/// Shared flow for every generate endpoint: take a ticket, wait out the cosmetic delay
/// without holding the lock, then commit unless a newer request has superseded this one.
async fn run_generation<F>(
    state: &AppState,
    settings: &AppConfig,
    id: BoardId,
    activity: Activity,
    generate: F,
) -> HttpResponse
where
    F: FnOnce(&mut ActivityBoard, GenerationTicket) -> Result<(), PickerError>,
{
    let ticket = {
        let mut g = match state.write() {
            Ok(guard) => guard,
            Err(_) => return lock_error(),
        };
        let entry = match g.get_mut(&id) {
            Some(e) => e,
            None => return no_board(),
        };
        entry.last_activity = Instant::now();
        entry.board.begin_generation(activity)
    };

    if !settings.generate_delay.is_zero() {
        tokio::time::sleep(settings.generate_delay).await;
    }

    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return no_board(),
    };
    entry.last_activity = Instant::now();
    match generate(&mut entry.board, ticket) {
        Ok(()) => {
            log::debug!("board {}: {} generated", id, activity);
            HttpResponse::Ok().json(GenerateResponse {
                headline: headline(&entry.board, activity),
                board: &entry.board,
            })
        }
        Err(e) => {
            if e == PickerError::StaleGeneration {
                log::info!("board {}: dropped superseded {} request", id, activity);
            }
            error_response(&e)
        }
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "team-activity-picker",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Source list sizes per category.
#[get("/api/rosters")]
async fn api_rosters(rosters: Rosters) -> HttpResponse {
    HttpResponse::Ok().json(rosters.summary())
}

/// Create a new board (returns it with id; client stores id for subsequent requests).
#[post("/api/boards")]
async fn api_create_board(state: AppState, settings: Settings) -> HttpResponse {
    let board = ActivityBoard::new(settings.speaker_no_repeat);
    let id = board.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    log::info!("Created board {}", id);
    let entry = g.entry(id).or_insert(BoardEntry {
        board,
        last_activity: Instant::now(),
    });
    HttpResponse::Ok().json(&entry.board)
}

/// Get a board by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/boards/{id}")]
async fn api_get_board(state: AppState, path: Path<BoardPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(&entry.board)
        }
        None => no_board(),
    }
}

/// Pick today's speaker.
#[post("/api/boards/{id}/speaker")]
async fn api_pick_speaker(
    state: AppState,
    rosters: Rosters,
    settings: Settings,
    path: Path<BoardPath>,
) -> HttpResponse {
    run_generation(&state, &settings, path.id, Activity::Speaker, |board, ticket| {
        pick_board_speaker(board, ticket, &rosters, &mut rand::thread_rng())
    })
    .await
}

/// Forget past speakers so everyone is eligible again.
#[delete("/api/boards/{id}/speaker/history")]
async fn api_reset_speaker_history(state: AppState, path: Path<BoardPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_board(),
    };
    entry.last_activity = Instant::now();
    entry.board.reset_speaker_history();
    HttpResponse::Ok().json(&entry.board)
}

/// Generate general groups of the requested size.
#[post("/api/boards/{id}/groups")]
async fn api_generate_groups(
    state: AppState,
    rosters: Rosters,
    settings: Settings,
    path: Path<BoardPath>,
    body: Json<GroupsBody>,
) -> HttpResponse {
    // Validate before taking a ticket so a bad size never disturbs an in-flight request.
    let size = match GroupSize::try_from(&body.group_size) {
        Ok(size) => size,
        Err(e) => return error_response(&e),
    };
    run_generation(&state, &settings, path.id, Activity::General, |board, ticket| {
        generate_groups(board, ticket, &rosters, size, &mut rand::thread_rng())
    })
    .await
}

/// Switch a game between 1v1 and 2v2 (clears its matches).
#[put("/api/boards/{id}/games/{game}/mode")]
async fn api_set_mode(
    state: AppState,
    path: Path<BoardGamePath>,
    body: Json<SetModeBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_board(),
    };
    entry.last_activity = Instant::now();
    match entry.board.set_mode(path.game, body.mode) {
        Ok(()) => HttpResponse::Ok().json(&entry.board),
        Err(e) => error_response(&e),
    }
}

/// Generate matches for a game in its current mode.
#[post("/api/boards/{id}/games/{game}/matches")]
async fn api_generate_matches(
    state: AppState,
    rosters: Rosters,
    settings: Settings,
    path: Path<BoardGamePath>,
) -> HttpResponse {
    if !path.game.is_game() {
        return error_response(&PickerError::NotAGame(path.game));
    }
    run_generation(&state, &settings, path.id, path.game, |board, ticket| {
        generate_matches(board, ticket, &rosters, &mut rand::thread_rng())
    })
    .await
}

/// Build two cricket squads from the configured pools.
#[post("/api/boards/{id}/squads")]
async fn api_generate_squads(
    state: AppState,
    rosters: Rosters,
    settings: Settings,
    path: Path<BoardPath>,
) -> HttpResponse {
    let policy = settings.split_policy;
    run_generation(&state, &settings, path.id, Activity::Cricket, |board, ticket| {
        generate_squads(board, ticket, &rosters, policy, &mut rand::thread_rng())
    })
    .await
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env();
    let rosters = match config.load_roster_book() {
        Ok(book) => book,
        Err(e) => {
            log::error!("{}", e);
            return Err(std::io::Error::other(e.to_string()));
        }
    };
    match &config.roster_file {
        Some(path) => log::info!("Loaded rosters from {}", path.display()),
        None => log::info!("Using built-in rosters"),
    }
    log::info!(
        "{} eligible speakers, squad split policy {}, delay {:?}",
        rosters.eligible_speakers().len(),
        config.split_policy,
        config.generate_delay
    );

    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<BoardId, BoardEntry>::new()));
    let rosters = Data::new(rosters);
    let settings = Data::new(config);

    // Background task: every 30 minutes, remove boards inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive board(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(rosters.clone())
            .app_data(settings.clone())
            .route("/", web::get().to(serve_index_async))
            .service(favicon)
            .configure(configure_api)
            .service(Files::new("/static", "static"))
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
