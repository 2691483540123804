//! demos/test_backend.rs
//! Local backend for manual smoke runs.
//! Run: cargo run --example test_backend -- <port> [mode]
//!
//! Modes: ok (default), not-json, no-message, error, slow.
//! Then: REACT_APP_BACKEND_URL=http://127.0.0.1:<port> cargo run

use hyper::{
    service::{make_service_fn, service_fn},
    Body, Request, Response, Server, StatusCode,
};
use rand::Rng;
use std::{
    convert::Infallible,
    net::SocketAddr,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::time::sleep;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Ok,
    NotJson,
    NoMessage,
    Error,
    Slow,
}

impl std::str::FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ok" => Ok(Mode::Ok),
            "not-json" => Ok(Mode::NotJson),
            "no-message" => Ok(Mode::NoMessage),
            "error" => Ok(Mode::Error),
            "slow" => Ok(Mode::Slow),
            other => anyhow::bail!("unknown mode '{}'", other),
        }
    }
}

#[derive(Clone)]
struct BackendState {
    mode:        Mode,
    req_counter: Arc<AtomicU64>,
    jitter_ms:   u64,
    fail_pct:    f64,
}

fn respond(status: StatusCode, content_type: &str, body: String) -> Response<Body> {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    if let Ok(value) = content_type.parse() {
        response.headers_mut().insert("Content-Type", value);
    }
    response
}

// ——————————————————————————————————————————
// Request handler
async fn handle(
    req: Request<Body>,
    state: BackendState,
) -> Result<Response<Body>, Infallible> {
    let n = state.req_counter.fetch_add(1, Ordering::SeqCst) + 1;
    println!("#{} {} {}", n, req.method(), req.uri().path());

    if req.uri().path() != "/api/" {
        return Ok(respond(StatusCode::NOT_FOUND, "text/plain", "Not Found".into()));
    }

    if state.jitter_ms > 0 {
        let delay = rand::thread_rng().gen_range(0..=state.jitter_ms);
        sleep(Duration::from_millis(delay)).await;
    }

    if state.fail_pct > 0.0
        && rand::thread_rng().gen_bool((state.fail_pct / 100.0).min(1.0))
    {
        return Ok(respond(
            StatusCode::INTERNAL_SERVER_ERROR,
            "text/plain",
            "Injected failure".into(),
        ));
    }

    let response = match state.mode {
        Mode::Ok => respond(
            StatusCode::OK,
            "application/json",
            r#"{"message":"Hello World"}"#.into(),
        ),
        Mode::NotJson => respond(StatusCode::OK, "text/plain", "OK".into()),
        Mode::NoMessage => respond(
            StatusCode::OK,
            "application/json",
            r#"{"status":"ok"}"#.into(),
        ),
        Mode::Error => respond(
            StatusCode::INTERNAL_SERVER_ERROR,
            "application/json",
            r#"{"detail":"Internal Server Error"}"#.into(),
        ),
        // Longer than the checker's 10 s default timeout
        Mode::Slow => {
            sleep(Duration::from_secs(15)).await;
            respond(
                StatusCode::OK,
                "application/json",
                r#"{"message":"too late"}"#.into(),
            )
        }
    };

    Ok(response)
}

// ——————————————————————————————————————————
// Main
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let port: u16 = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "8001".into())
        .parse()?;
    let mode: Mode = std::env::args()
        .nth(2)
        .unwrap_or_else(|| "ok".into())
        .parse()?;

    let jitter_ms =
        std::env::var("JITTER_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(0);
    let fail_pct =
        std::env::var("FAIL_PCT").ok().and_then(|v| v.parse().ok()).unwrap_or(0.0);

    let state = BackendState {
        mode,
        req_counter: Arc::new(AtomicU64::new(0)),
        jitter_ms,
        fail_pct,
    };

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let make_svc = make_service_fn(move |_conn| {
        let st = state.clone();
        async move {
            Ok::<_, Infallible>(service_fn(move |req| {
                handle(req, st.clone())
            }))
        }
    });

    println!(
        "Test backend on http://{}  [mode={:?} jitter={}ms fail={} %]",
        addr, mode, jitter_ms, fail_pct
    );

    Server::bind(&addr).serve(make_svc).await?;
    Ok(())
}
