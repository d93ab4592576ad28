//! Service context, request dispatcher and axum router.

use std::sync::Arc;

use axum::Router;
use axum::extract::{DefaultBodyLimit, Request, State};
use axum::response::{IntoResponse, Response};
use giztoy_simhash::Engine;
use http::{StatusCode, header};
use percent_encoding::percent_decode_str;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ServiceConfig;
use crate::error::{Result, ServiceError};
use crate::handlers;
use crate::params;
use crate::registry::{Registry, Route};
use crate::stores::StoreManager;

/// Successful handler output: a status and plain text lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: StatusCode,
    pub lines: Vec<String>,
}

impl Reply {
    /// 200 OK with the given lines.
    pub fn ok(lines: Vec<String>) -> Self {
        Self {
            status: StatusCode::OK,
            lines,
        }
    }

    /// Response body: one line per entry, each newline-terminated.
    pub fn body(&self) -> String {
        self.lines.iter().map(|l| format!("{l}\n")).collect()
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        let body = self.body();
        (
            self.status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            body,
        )
            .into_response()
    }
}

/// SimService holds everything a request needs: the route table, the
/// named stores and the engine that creates them.
///
/// Built once at startup and shared behind an `Arc` for the lifetime of
/// the server.
pub struct SimService<E: Engine> {
    config: ServiceConfig,
    registry: Registry,
    stores: StoreManager<E::Store>,
    engine: E,
}

impl<E: Engine> SimService<E> {
    /// Create a service with the standard routes.
    pub fn new(config: ServiceConfig, engine: E) -> Self {
        Self::with_registry(config, engine, Registry::standard())
    }

    /// Create a service with a custom route table.
    pub fn with_registry(config: ServiceConfig, engine: E, registry: Registry) -> Self {
        Self {
            config,
            registry,
            stores: StoreManager::new(),
            engine,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn stores(&self) -> &StoreManager<E::Store> {
        &self.stores
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Resolve, validate and run one request.
    ///
    /// The route is the percent-decoded path without its leading `/`.
    /// Checks happen in order: route, verb, body, required parameters.
    /// Only the first missing parameter is reported.
    pub async fn dispatch(&self, req: Request) -> Result<Reply> {
        let route = {
            let path = percent_decode_str(req.uri().path()).decode_utf8_lossy();
            path.strip_prefix('/').unwrap_or(path.as_ref()).to_string()
        };
        info!(%route, verb = %req.method(), "handling request");

        let method = self
            .registry
            .lookup(&route)
            .ok_or_else(|| ServiceError::RouteNotFound(route.clone()))?;

        if *req.method() != method.verb {
            return Err(ServiceError::MethodMismatch(method.verb.clone()));
        }

        let params = params::from_request(req, self.config.max_body_bytes).await?;

        if let Some(key) = method.required.iter().find(|key| !params.contains(key)) {
            return Err(ServiceError::MissingParameter(key.to_string()));
        }

        match method.route {
            Route::Create => Ok(handlers::create(&self.stores, &self.engine, &params)),
            Route::Delete => Ok(handlers::delete(&self.stores, &params)),
            Route::Insert => handlers::insert(&self.stores, &params),
            Route::Consensus => handlers::consensus(&self.stores, &params).await,
        }
    }

    /// Release every store. Returns how many were dropped.
    pub fn shutdown(&self) -> usize {
        let dropped = self.stores.clear();
        info!(dropped, "released stores");
        dropped
    }
}

/// Build the HTTP router. Every path goes through [`SimService::dispatch`].
pub fn router<E: Engine>(service: Arc<SimService<E>>) -> Router {
    let limit = service.config().max_body_bytes;
    Router::new()
        .fallback(handle::<E>)
        .with_state(service)
        .layer(DefaultBodyLimit::max(limit))
        .layer(TraceLayer::new_for_http())
}

async fn handle<E: Engine>(
    State(service): State<Arc<SimService<E>>>,
    req: Request,
) -> Response {
    match service.dispatch(req).await {
        Ok(reply) => reply.into_response(),
        Err(err) => {
            warn!(error = %err, status = %err.status(), "request failed");
            err.into_response()
        }
    }
}
