//! HTTP service managing named SimHash stores.
//!
//! Clients create independent stores, insert `(content, id)` pairs into
//! them, and ask a store for its consensus entry. Every request goes
//! through a single dispatcher that resolves the route in a [`Registry`],
//! checks the verb and required parameters, and runs the matching handler.
//!
//! | route       | verb   | required params      |
//! |-------------|--------|----------------------|
//! | `create`    | POST   | `name`               |
//! | `delete`    | DELETE | `name`               |
//! | `insert`    | POST   | `name`, `id`, `content` |
//! | `consensus` | GET    | `name`               |
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use giztoy_simhash::SimHashEngine;
//! use giztoy_simservice::{ServiceConfig, SimService, router};
//!
//! # async fn run() -> std::io::Result<()> {
//! let service = Arc::new(SimService::new(ServiceConfig::default(), SimHashEngine::default()));
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, router(service)).await
//! # }
//! ```

mod config;
mod error;
mod handlers;
mod params;
mod registry;
mod service;
mod stores;

pub use config::{DEFAULT_ADDR, DEFAULT_MAX_BODY, ServiceConfig};
pub use error::{Result, RowError, ServiceError};
pub use params::Params;
pub use registry::{Method, Registry, Route};
pub use service::{Reply, SimService, router};
pub use stores::{CreateOutcome, StoreManager};
