use golf_core::{Event, EventBus, GameConfig, GameSnapshot, GameState, RngState};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tiny_http::{Header, Method, Response, Server, StatusCode};

/// Pause between scoring a round and dealing the next one, so the result
/// stays on screen for a moment.
const ROUND_PAUSE: Duration = Duration::from_secs(1);

fn main() {
    let server = Server::http("0.0.0.0:7878").expect("start server");
    let state = Arc::new(Mutex::new(AppState::new()));
    println!(
        "Golf web server on http://localhost:7878 (seed {})",
        state.lock().unwrap().game.rng.seed()
    );
    for request in server.incoming_requests() {
        let state = state.clone();
        if let Err(err) = handle_request(request, state) {
            eprintln!("request error: {err}");
        }
    }
}

struct AppState {
    game: GameState,
    events: EventBus,
    /// Bumped whenever a scheduled continuation must be invalidated.
    timer_generation: u64,
}

impl AppState {
    fn new() -> Self {
        let game =
            GameState::new(GameConfig::default(), RngState::from_entropy()).expect("default game");
        Self {
            game,
            events: EventBus::default(),
            timer_generation: 0,
        }
    }
}

#[derive(Serialize)]
struct ApiResponse {
    ok: bool,
    error: Option<String>,
    state: GameSnapshot,
    events: Vec<Event>,
}

#[derive(Deserialize)]
struct ActionRequest {
    action: String,
    #[serde(default)]
    player: Option<usize>,
    #[serde(default)]
    slot: Option<usize>,
    #[serde(default)]
    players: Option<usize>,
}

fn handle_request(
    mut request: tiny_http::Request,
    state: Arc<Mutex<AppState>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let method = request.method().clone();
    let url = request.url().to_string();
    match (method, url.as_str()) {
        (Method::Get, "/") => {
            respond_with_file(request, web_path("index.html"), "text/html; charset=utf-8")
        }
        (Method::Get, "/app.js") => {
            respond_with_file(request, web_path("app.js"), "application/javascript")
        }
        (Method::Get, "/styles.css") => {
            respond_with_file(request, web_path("styles.css"), "text/css; charset=utf-8")
        }
        (Method::Get, "/api/state") => {
            let mut guard = state.lock().unwrap();
            let response = build_response(&mut guard, None);
            respond_json(request, response)
        }
        (Method::Post, "/api/action") => {
            let mut body = String::new();
            request.as_reader().read_to_string(&mut body)?;
            let action: ActionRequest = serde_json::from_str(&body)?;
            // The action, the timer reservation and the response snapshot
            // all happen under one guard so no other request can interleave.
            let (response, timer) = {
                let mut guard = state.lock().unwrap();
                let app = &mut *guard;
                let err = apply_action(app, action);
                let timer = if err.is_none() && app.game.round_pending {
                    app.timer_generation += 1;
                    Some(app.timer_generation)
                } else {
                    None
                };
                (build_response(app, err), timer)
            };
            if let Some(generation) = timer {
                arm_round_timer(&state, generation);
            }
            respond_json(request, response)
        }
        _ => {
            request.respond(Response::empty(StatusCode(404)))?;
            Ok(())
        }
    }
}

fn apply_action(app: &mut AppState, request: ActionRequest) -> Option<String> {
    let result = match request.action.as_str() {
        "select_deck" => app.game.select_deck(),
        "select_discard" => app.game.select_discard(),
        "select_slot" => match (request.player, request.slot) {
            (Some(player), Some(slot)) => app.game.select_slot(player, slot),
            _ => return Some("select_slot requires player and slot".to_string()),
        },
        "confirm" => app.game.confirm(&mut app.events),
        "set_players" => match request.players {
            Some(count) => {
                let result = app.game.set_player_count(count, &mut app.events);
                if result.is_ok() {
                    // Only a successful reinit cancels a pending round
                    // continuation; a rejected one must leave it armed.
                    app.timer_generation += 1;
                }
                result
            }
            None => return Some("set_players requires players".to_string()),
        },
        other => return Some(format!("unknown action: {other}")),
    };
    result.err().map(|err| err.to_string())
}

/// Single-shot timer for the end-of-round pause, armed with a generation
/// reserved under the request guard. A generation bump before it fires
/// cancels it; the round is already scored either way, so nothing is lost if
/// the process exits first.
fn arm_round_timer(state: &Arc<Mutex<AppState>>, generation: u64) {
    let state = Arc::clone(state);
    thread::spawn(move || {
        thread::sleep(ROUND_PAUSE);
        let mut guard = state.lock().unwrap();
        if guard.timer_generation != generation {
            return;
        }
        let app = &mut *guard;
        if let Err(err) = app.game.continue_round(&mut app.events) {
            eprintln!("round timer: {err}");
        }
    });
}

fn web_path(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("web")
        .join(file)
}

fn respond_with_file(
    request: tiny_http::Request,
    path: PathBuf,
    content_type: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = std::fs::File::open(path)?;
    let mut content = Vec::new();
    file.read_to_end(&mut content)?;
    let header =
        Header::from_bytes(&b"Content-Type"[..], content_type).expect("static content type");
    request.respond(Response::from_data(content).with_header(header))?;
    Ok(())
}

fn respond_json(
    request: tiny_http::Request,
    response: ApiResponse,
) -> Result<(), Box<dyn std::error::Error>> {
    let body = serde_json::to_vec_pretty(&response)?;
    let header = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
        .expect("static content type");
    request.respond(Response::from_data(body).with_header(header))?;
    Ok(())
}

fn build_response(app: &mut AppState, err: Option<String>) -> ApiResponse {
    let events: Vec<_> = app.events.drain().collect();
    ApiResponse {
        ok: err.is_none(),
        error: err,
        state: app.game.snapshot(),
        events,
    }
}
