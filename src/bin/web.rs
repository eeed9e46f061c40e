//! Single binary admin API for running the tournament: registration approval,
//! pairing generation, result entry, round control, standings. JSON only; the
//! front-end lives elsewhere.
//! Run with: cargo run --bin web
//! Override bind with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use chess_tournament_web::{
    advance_round, current_standings, finish_tournament, reset_tournament, start_round_robin,
    start_swiss_round, MatchResult, MemoryStore, Player, Points, RegistrationStatus, Store,
};
use serde::Deserialize;
use std::sync::RwLock;
use uuid::Uuid;

/// In-memory state: the single tournament's store behind a lock.
type AppState = Data<RwLock<MemoryStore>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct RegisterPlayerBody {
    full_name: String,
    #[serde(default)]
    rating: u32,
}

#[derive(Deserialize)]
struct SetStatusBody {
    status: RegistrationStatus,
}

#[derive(Deserialize)]
struct SetStatsBody {
    score: Points,
    rank: Option<u32>,
}

#[derive(Deserialize)]
struct SetResultBody {
    result: MatchResult,
}

#[derive(Deserialize)]
struct PlayersQuery {
    status: Option<RegistrationStatus>,
}

#[derive(Deserialize)]
struct MatchesQuery {
    round: Option<u32>,
}

/// Path segment: player id (e.g. /api/players/{id})
#[derive(Deserialize)]
struct PlayerPath {
    id: Uuid,
}

/// Path segment: match id (e.g. /api/matches/{id}/result)
#[derive(Deserialize)]
struct MatchPath {
    id: Uuid,
}

/// Path segment: round number (e.g. /api/tournament/swiss/{round})
#[derive(Deserialize)]
struct RoundPath {
    round: u32,
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

fn bad_request(e: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "chess-tournament-web",
    })
}

/// Register a new player (starts Pending until an admin approves).
#[post("/api/players")]
async fn api_register_player(state: AppState, body: Json<RegisterPlayerBody>) -> HttpResponse {
    let name = body.full_name.trim();
    if name.is_empty() {
        return bad_request("player name must not be empty");
    }
    let player = Player::new(name, body.rating);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.add_player(player.clone()) {
        Ok(()) => {
            g.invalidate_cache();
            HttpResponse::Ok().json(player)
        }
        Err(e) => bad_request(e),
    }
}

/// List players, optionally filtered by status; sorted by score then rating.
#[get("/api/players")]
async fn api_list_players(state: AppState, query: Query<PlayersQuery>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.list_players(query.status) {
        Ok(players) => HttpResponse::Ok().json(players),
        Err(e) => bad_request(e),
    }
}

/// Approve or reject a registration.
#[put("/api/players/{id}/status")]
async fn api_set_player_status(
    state: AppState,
    path: Path<PlayerPath>,
    body: Json<SetStatusBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.update_player_status(path.id, body.status) {
        Ok(()) => {
            g.invalidate_cache();
            HttpResponse::Ok().json(serde_json::json!({ "ok": true }))
        }
        Err(e) => HttpResponse::NotFound().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Admin override of a player's score and rank.
#[put("/api/players/{id}/stats")]
async fn api_set_player_stats(
    state: AppState,
    path: Path<PlayerPath>,
    body: Json<SetStatsBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let result = match g.update_player_score(path.id, body.score) {
        Ok(()) => g.update_player_rank(path.id, body.rank),
        Err(e) => Err(e),
    };
    match result {
        Ok(()) => {
            g.invalidate_cache();
            HttpResponse::Ok().json(serde_json::json!({ "ok": true }))
        }
        Err(e) => HttpResponse::NotFound().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Delete a player together with every match referencing them.
#[delete("/api/players/{id}")]
async fn api_delete_player(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.delete_player(path.id) {
        Ok(()) => {
            g.invalidate_cache();
            HttpResponse::Ok().json(serde_json::json!({ "ok": true }))
        }
        Err(e) => HttpResponse::NotFound().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// List matches, optionally for one round; bye rows sort last per round.
#[get("/api/matches")]
async fn api_list_matches(state: AppState, query: Query<MatchesQuery>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.list_matches(query.round) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => bad_request(e),
    }
}

/// Record a match result ("1-0", "0-1", "1/2-1/2").
#[put("/api/matches/{id}/result")]
async fn api_set_match_result(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<SetResultBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.set_match_result(path.id, body.result) {
        Ok(()) => {
            g.invalidate_cache();
            HttpResponse::Ok().json(serde_json::json!({ "ok": true }))
        }
        Err(e) => HttpResponse::NotFound().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Current round / total rounds / status.
#[get("/api/tournament")]
async fn api_get_tournament(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.tournament_state() {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => bad_request(e),
    }
}

/// Generate (or regenerate) Swiss pairings for a round.
#[post("/api/tournament/swiss/{round}")]
async fn api_start_swiss_round(state: AppState, path: Path<RoundPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match start_swiss_round(&mut *g, &mut rand::thread_rng(), path.round) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => bad_request(e),
    }
}

/// Generate a full round-robin schedule, replacing all existing matches.
#[post("/api/tournament/round-robin")]
async fn api_start_round_robin(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match start_round_robin(&mut *g, &mut rand::thread_rng()) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => bad_request(e),
    }
}

/// Score the current round and move to the next (or finish).
#[post("/api/tournament/advance")]
async fn api_advance_round(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match advance_round(&mut *g, &mut rand::thread_rng()) {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => bad_request(e),
    }
}

/// Score the current round and end the tournament now.
#[post("/api/tournament/finish")]
async fn api_finish_tournament(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match finish_tournament(&mut *g) {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => bad_request(e),
    }
}

/// Wipe matches, scores, and ranks; back to round 1.
#[post("/api/tournament/reset")]
async fn api_reset_tournament(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match reset_tournament(&mut *g) {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => bad_request(e),
    }
}

/// Tie-broken standings of the approved players.
#[get("/api/standings")]
async fn api_standings(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match current_standings(&mut *g) {
        Ok(standings) => HttpResponse::Ok().json(standings),
        Err(e) => bad_request(e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(MemoryStore::new()));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_register_player)
            .service(api_list_players)
            .service(api_set_player_status)
            .service(api_set_player_stats)
            .service(api_delete_player)
            .service(api_list_matches)
            .service(api_set_match_result)
            .service(api_get_tournament)
            .service(api_start_swiss_round)
            .service(api_start_round_robin)
            .service(api_advance_round)
            .service(api_finish_tournament)
            .service(api_reset_tournament)
            .service(api_standings)
    })
    .bind(bind)?
    .run()
    .await
}
