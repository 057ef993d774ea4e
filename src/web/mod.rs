mod assets;

use std::{
    convert::Infallible,
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        Html, IntoResponse, Response,
    },
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::broadcast};
use tokio_stream::{wrappers::BroadcastStream, Stream, StreamExt};

use crate::{
    catalog::CityCatalog,
    guess::Comparison,
    session::{GameSession, SessionSnapshot, SubmitOutcome},
};

#[derive(Clone)]
struct AppState {
    session: Arc<Mutex<GameSession>>,
    broadcaster: broadcast::Sender<String>,
}

pub struct WebServerConfig {
    pub catalog: CityCatalog,
    pub seed: u64,
    pub host: String,
    pub port: u16,
}

#[derive(Serialize)]
struct StateEnvelope {
    city_count: usize,
    state: SessionSnapshot,
}

#[derive(Deserialize)]
struct GuessRequest {
    name: String,
}

#[derive(Deserialize)]
struct AutocompleteQuery {
    #[serde(default)]
    prefix: String,
}

#[derive(Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
enum GuessResponse {
    Duplicate {
        name: String,
    },
    UnknownCity {
        input: String,
    },
    Continue {
        comparison: Comparison,
        state: SessionSnapshot,
    },
    Win {
        guess_count: u32,
        comparison: Comparison,
        state: SessionSnapshot,
    },
    RoundOver,
}

pub async fn run(config: WebServerConfig) -> Result<()> {
    let WebServerConfig {
        catalog,
        seed,
        host,
        port,
    } = config;

    let city_count = catalog.len();
    let session = Arc::new(Mutex::new(GameSession::new(catalog, seed)));
    let (tx, _) = broadcast::channel::<String>(64);

    let state = AppState {
        session,
        broadcaster: tx,
    };

    let router = Router::new()
        .route("/", get(index))
        .route("/styles.css", get(styles))
        .route("/app.js", get(script))
        .route("/api/state", get(current_state))
        .route("/api/autocomplete", get(autocomplete))
        .route("/api/guess", post(submit_guess))
        .route("/api/new-round", post(new_round))
        .route("/api/events", get(stream_events))
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("invalid address");

    println!(
        "🌴 caliguess live at http://{}:{} with {} cities (Ctrl+C to stop)",
        host, port, city_count
    );

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    println!("Shutting down game server...");
}

async fn index() -> Html<&'static str> {
    Html(assets::INDEX_HTML)
}

async fn styles() -> impl IntoResponse {
    Response::builder()
        .header(header::CONTENT_TYPE, "text/css; charset=utf-8")
        .body(assets::STYLES_CSS.to_string())
        .unwrap()
}

async fn script() -> impl IntoResponse {
    Response::builder()
        .header(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )
        .body(assets::APP_JS.to_string())
        .unwrap()
}

fn envelope(state: &AppState) -> StateEnvelope {
    let session = state.session.lock().expect("session lock poisoned");
    StateEnvelope {
        city_count: session.catalog().len(),
        state: session.snapshot(),
    }
}

fn broadcast_state(state: &AppState) {
    if let Ok(payload) = serde_json::to_string(&envelope(state)) {
        let _ = state.broadcaster.send(payload);
    }
}

async fn current_state(State(state): State<AppState>) -> Json<StateEnvelope> {
    Json(envelope(&state))
}

async fn autocomplete(
    State(state): State<AppState>,
    Query(query): Query<AutocompleteQuery>,
) -> Json<Vec<String>> {
    let options = {
        let session = state.session.lock().expect("session lock poisoned");
        session.autocomplete(&query.prefix)
    };
    Json(options)
}

async fn submit_guess(
    State(state): State<AppState>,
    Json(request): Json<GuessRequest>,
) -> Response {
    let outcome = {
        let mut session = state.session.lock().expect("session lock poisoned");
        session.submit_guess(&request.name)
    };

    match outcome {
        Err(_) => (StatusCode::CONFLICT, Json(GuessResponse::RoundOver)).into_response(),
        Ok(SubmitOutcome::Duplicate { name }) => {
            Json(GuessResponse::Duplicate { name }).into_response()
        }
        Ok(SubmitOutcome::UnknownCity { input }) => {
            Json(GuessResponse::UnknownCity { input }).into_response()
        }
        Ok(SubmitOutcome::Continue { comparison }) => {
            broadcast_state(&state);
            let snapshot = envelope(&state).state;
            Json(GuessResponse::Continue {
                comparison,
                state: snapshot,
            })
            .into_response()
        }
        Ok(SubmitOutcome::Win {
            guess_count,
            comparison,
        }) => {
            broadcast_state(&state);
            let snapshot = envelope(&state).state;
            Json(GuessResponse::Win {
                guess_count,
                comparison,
                state: snapshot,
            })
            .into_response()
        }
    }
}

async fn new_round(State(state): State<AppState>) -> Json<StateEnvelope> {
    {
        let mut session = state.session.lock().expect("session lock poisoned");
        session.start_new_round();
    }
    broadcast_state(&state);
    Json(envelope(&state))
}

async fn stream_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.broadcaster.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|msg| match msg {
        Ok(payload) => Some(Ok(Event::default().data(payload))),
        Err(_) => None,
    });
    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(2))
            .text("keep-alive"),
    )
}
