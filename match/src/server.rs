//! HTTP front of the match engine
//!
//! Serves the matching API on `addr` and the Prometheus text endpoint on
//! `metrics_addr`. [`Server::stop`] signals both listeners and returns once
//! their in-flight requests have completed.

use crate::config;
use crate::engine::matchengine::{MatchCmdType, MatchEngine};
use crate::error::{EngineError, ServeError};
use crate::metrics;

use hyper::header::CONTENT_TYPE;
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Method, Request, Response, StatusCode};
use serde::Serialize;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub struct Server {
    engine: Arc<MatchEngine>,
    addr: String,
    metrics_addr: String,
    shutdown: watch::Sender<bool>,
    local_addrs: Vec<SocketAddr>,
    tasks: Vec<JoinHandle<()>>,
}

impl Server {
    /// Builds a server from the process-wide runtime config
    pub fn builder() -> Self {
        let config = match config::instance().lock() {
            Ok(current) => current.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        let (shutdown, _) = watch::channel(false);
        Server {
            engine: Arc::new(MatchEngine::new(config.max_participants)),
            addr: config.addr,
            metrics_addr: config.metrics_addr,
            shutdown,
            local_addrs: Vec::new(),
            tasks: Vec::new(),
        }
    }

    pub async fn start(&mut self) -> Result<(), ServeError> {
        self.start_api_server()?;
        self.start_metrics_server()?;
        Ok(())
    }

    /// Addresses actually bound, API listener first
    pub fn local_addrs(&self) -> &[SocketAddr] {
        &self.local_addrs
    }

    /// Signals both listeners and waits until in-flight requests are done
    pub async fn stop(&mut self) {
        let _ = self.shutdown.send(true);
        for task in self.tasks.drain(..) {
            if let Err(e) = task.await {
                log::error!("server task failed: {}", e);
            }
        }
        self.local_addrs.clear();
        log::info!("server stop");
    }

    fn start_api_server(&mut self) -> Result<(), ServeError> {
        let addr = parse_addr(&self.addr)?;
        let engine = self.engine.clone();
        let make_svc = make_service_fn(move |_| {
            let engine = engine.clone();
            async move {
                Ok::<_, Infallible>(service_fn(move |req: Request<Body>| {
                    handle(engine.clone(), req)
                }))
            }
        });
        let server = hyper::Server::try_bind(&addr)
            .map_err(|source| ServeError::Bind {
                addr: self.addr.clone(),
                source,
            })?
            .serve(make_svc);
        let local_addr = server.local_addr();
        let server = server.with_graceful_shutdown(wait_for_stop(self.shutdown.subscribe()));
        self.tasks.push(tokio::spawn(async move {
            if let Err(e) = server.await {
                log::error!("api server error: {}", e);
            }
        }));
        self.local_addrs.push(local_addr);
        log::info!("api server started on {}", local_addr);
        Ok(())
    }

    fn start_metrics_server(&mut self) -> Result<(), ServeError> {
        let addr = parse_addr(&self.metrics_addr)?;
        let make_svc = make_service_fn(move |_| async move {
            Ok::<_, Infallible>(service_fn(move |_: Request<Body>| async move {
                Ok::<_, Infallible>(Response::new(Body::from(metrics::gather())))
            }))
        });
        metrics::init_registry();
        let server = hyper::Server::try_bind(&addr)
            .map_err(|source| ServeError::Bind {
                addr: self.metrics_addr.clone(),
                source,
            })?
            .serve(make_svc);
        let local_addr = server.local_addr();
        let server = server.with_graceful_shutdown(wait_for_stop(self.shutdown.subscribe()));
        self.tasks.push(tokio::spawn(async move {
            if let Err(e) = server.await {
                log::error!("metrics server error: {}", e);
            }
        }));
        self.local_addrs.push(local_addr);
        log::info!("metrics server started on {}", local_addr);
        Ok(())
    }
}

fn parse_addr(addr: &str) -> Result<SocketAddr, ServeError> {
    addr.parse()
        .map_err(|_| ServeError::Addr(addr.to_string()))
}

async fn wait_for_stop(mut rx: watch::Receiver<bool>) {
    loop {
        let stopped = *rx.borrow();
        if stopped || rx.changed().await.is_err() {
            return;
        }
    }
}

/// Routes one API request
pub async fn handle(
    engine: Arc<MatchEngine>,
    req: Request<Body>,
) -> Result<Response<Body>, Infallible> {
    let (parts, body) = req.into_parts();
    let cmd_type = match (&parts.method, parts.uri.path()) {
        (&Method::GET, "/v1/health") => {
            return Ok(json_response(
                StatusCode::OK,
                &serde_json::json!({ "status": "ok" }),
            ))
        }
        (&Method::POST, "/v1/matches") => MatchCmdType::CreateMatches,
        (&Method::POST, "/v1/runs/execute") => MatchCmdType::ExecuteRun,
        (&Method::POST, "/v1/runs/cancel") => MatchCmdType::CancelRun,
        _ => return Ok(error_response(StatusCode::NOT_FOUND, "not found")),
    };

    let bytes = match hyper::body::to_bytes(body).await {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("failed to read request body: {}", e);
            return Ok(error_response(StatusCode::BAD_REQUEST, "unreadable body"));
        }
    };

    match engine.on_request(cmd_type, &bytes) {
        Ok(reply) => Ok(json_response(StatusCode::OK, &reply)),
        Err(e) => {
            log::warn!("{} {} failed: {}", parts.method, parts.uri.path(), e);
            Ok(error_response(status_for(&e), &e.to_string()))
        }
    }
}

fn status_for(error: &EngineError) -> StatusCode {
    if error.is_bad_request() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::CONFLICT
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Body> {
    let payload = match serde_json::to_vec(body) {
        Ok(payload) => payload,
        Err(e) => {
            log::error!("failed to encode response: {}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "encoding failed");
        }
    };
    let mut response = Response::new(Body::from(payload));
    *response.status_mut() = status;
    response.headers_mut().insert(
        CONTENT_TYPE,
        hyper::header::HeaderValue::from_static("application/json"),
    );
    response
}

fn error_response(status: StatusCode, message: &str) -> Response<Body> {
    let payload = serde_json::json!({ "error": message }).to_string();
    let mut response = Response::new(Body::from(payload));
    *response.status_mut() = status;
    response.headers_mut().insert(
        CONTENT_TYPE,
        hyper::header::HeaderValue::from_static("application/json"),
    );
    response
}
