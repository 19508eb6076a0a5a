//! Single binary web server: REST API over the arena, static files from /static.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default; see `prompt_arena::config` for the environment variables.

use actix_files::Files;
use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{
    cookie::Key,
    delete, get, post,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use prompt_arena::{
    results_csv, shuffle_inputs, Arena, ArenaConfig, ArenaError, MatchCoord, ParticipantInput,
    TournamentId,
};
use serde::Deserialize;
use std::time::Duration;
use uuid::Uuid;

type AppState = Data<Arena>;

/// Session key holding the voter id.
const VOTER_KEY: &str = "voter_id";

/// How often idle tournaments are swept.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(30 * 60);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    question: String,
    prompts: Vec<ParticipantInput>,
    /// Randomize seed order before building the bracket.
    #[serde(default)]
    shuffle: bool,
}

#[derive(Deserialize)]
struct VoteBody {
    round: usize,
    #[serde(rename = "match")]
    match_index: usize,
    winner: usize,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Voter id from the session, creating one on first contact.
fn voter_id(session: &Session) -> Option<String> {
    match session.get::<String>(VOTER_KEY) {
        Ok(Some(id)) => Some(id),
        Ok(None) => {
            let id = Uuid::new_v4().to_string();
            session.insert(VOTER_KEY, &id).ok()?;
            Some(id)
        }
        Err(e) => {
            log::warn!("Unreadable session: {}", e);
            None
        }
    }
}

fn session_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(serde_json::json!({ "error": "session error" }))
}

fn error_response(e: &ArenaError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        ArenaError::TournamentNotFound(_) => HttpResponse::NotFound().json(body),
        ArenaError::InvalidInput(_) | ArenaError::IllegalVote(_) => {
            HttpResponse::BadRequest().json(body)
        }
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "prompt-arena",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Models accepted at creation (empty list: any model).
#[get("/api/models")]
async fn api_models(state: AppState) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "models": state.limits().allowed_models }))
}

/// All tournaments, newest first.
#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "tournaments": state.list_tournaments() }))
}

/// Create a tournament from a question and at least two prompts, each with its response.
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let CreateTournamentBody {
        question,
        mut prompts,
        shuffle,
    } = body.into_inner();
    if shuffle {
        shuffle_inputs(&mut prompts);
    }
    match state.create_tournament(&question, &prompts) {
        Ok(t) => HttpResponse::Created().json(t),
        Err(e) => error_response(&e),
    }
}

/// Tournament as the session's voter sees it (bracket, next match, progress).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>, session: Session) -> HttpResponse {
    let Some(voter) = voter_id(&session) else {
        return session_error();
    };
    match state.get_tournament_view(path.id, &voter) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => error_response(&e),
    }
}

#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    match state.remove_tournament(path.id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(&e),
    }
}

/// The session voter's bracket, started on first request.
#[get("/api/tournaments/{id}/bracket")]
async fn api_get_bracket(state: AppState, path: Path<TournamentPath>, session: Session) -> HttpResponse {
    let Some(voter) = voter_id(&session) else {
        return session_error();
    };
    match state.get_or_create_voter_bracket(path.id, &voter) {
        Ok(bracket) => HttpResponse::Ok().json(bracket),
        Err(e) => error_response(&e),
    }
}

/// Vote on one match of the session voter's bracket.
#[post("/api/tournaments/{id}/vote")]
async fn api_vote(
    state: AppState,
    path: Path<TournamentPath>,
    session: Session,
    body: Json<VoteBody>,
) -> HttpResponse {
    let Some(voter) = voter_id(&session) else {
        return session_error();
    };
    let coord = MatchCoord::new(body.round, body.match_index);
    match state.vote(path.id, &voter, coord, body.winner) {
        Ok(outcome) => HttpResponse::Ok().json(serde_json::json!({
            "user_bracket": outcome.bracket,
            "completed": outcome.completed,
            "winner_prompt_index": outcome.winner,
            "next_match": outcome.next_match,
            "user_id": voter,
        })),
        Err(e) => error_response(&e),
    }
}

#[get("/api/tournaments/{id}/results")]
async fn api_results(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    match state.get_results(path.id) {
        Ok(results) => HttpResponse::Ok().json(results),
        Err(e) => error_response(&e),
    }
}

#[get("/api/tournaments/{id}/results.csv")]
async fn api_results_csv(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let results = match state.get_results(path.id) {
        Ok(r) => r,
        Err(e) => return error_response(&e),
    };
    match results_csv(&results) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"results-{}.csv\"", path.id),
            ))
            .body(bytes),
        Err(e) => {
            log::error!("CSV export failed for {}: {}", path.id, e);
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": "export failed" }))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ArenaConfig::from_env();
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(Arena::new(config.limits.clone()));

    // Background task: every 30 minutes, remove tournaments idle past the configured timeout
    if let Some(timeout) = config.idle_timeout {
        let state_cleanup = state.clone();
        actix_web::rt::spawn(async move {
            let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
            loop {
                interval.tick().await;
                let removed = state_cleanup.remove_idle(timeout);
                if removed > 0 {
                    log::info!(
                        "Cleaned up {} inactive tournament(s) (idle for {}h)",
                        removed,
                        timeout.as_secs() / 3600
                    );
                }
            }
        });
    }

    // Per-process key; sessions only carry the voter id.
    let session_key = Key::generate();
    let static_dir = config.static_dir.clone();

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), session_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .service(api_health)
            .service(favicon)
            .service(api_models)
            .service(api_list_tournaments)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_delete_tournament)
            .service(api_get_bracket)
            .service(api_vote)
            .service(api_results)
            .service(api_results_csv)
            .service(Files::new("/static", static_dir.clone()))
    })
    .bind(bind)?
    .run()
    .await
}
