//! Server construction and middleware wiring.
//!
//! The repository is built once from [`BooksSettings`] and shared by every
//! worker through [`HttpState`]; nothing here is global.

pub mod settings;

pub use settings::{BooksSettings, SettingsError, StorageSettings};

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::BookService;
use crate::inbound::http::configure;
use crate::inbound::http::state::HttpState;
use crate::middleware::RequestTrace;
use crate::outbound::memory::InMemoryBookRepository;
use crate::outbound::persistence::{
    DbPool, DieselBookRepository, MigrationError, PoolConfig, PoolError, run_migrations,
};

/// Failures that prevent the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// Settings are incomplete or malformed.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// Schema migrations could not be applied.
    #[error(transparent)]
    Migration(#[from] MigrationError),
    /// The connection pool could not be built.
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Build the application: shared state, request tracing, book routes and, in
/// debug builds, Swagger UI at `/docs`.
pub fn build_app(
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(http_state)
        .wrap(RequestTrace)
        .configure(configure);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct the repository selected by `storage` and wrap it in handler
/// state.
///
/// PostgreSQL startup applies pending migrations before the pool is built.
///
/// # Errors
///
/// Returns [`StartupError`] when migrations fail or the pool cannot connect.
pub async fn build_http_state(
    storage: StorageSettings,
) -> Result<web::Data<HttpState>, StartupError> {
    let state = match storage {
        StorageSettings::InMemory => {
            info!("using in-memory book store");
            HttpState::from_service(BookService::new(Arc::new(InMemoryBookRepository::new())))
        }
        StorageSettings::Postgres {
            database_url,
            pool_max_size,
        } => {
            run_migrations(&database_url).await?;
            let pool =
                DbPool::new(PoolConfig::new(database_url).with_max_size(pool_max_size)).await?;
            info!(pool_max_size, "using PostgreSQL book store");
            HttpState::from_service(BookService::new(Arc::new(DieselBookRepository::new(pool))))
        }
    };
    Ok(web::Data::new(state))
}

/// Construct an Actix HTTP server bound to `bind_addr`.
///
/// # Returns
/// A [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    http_state: web::Data<HttpState>,
    bind_addr: SocketAddr,
) -> std::io::Result<Server> {
    let server = HttpServer::new(move || build_app(http_state.clone()))
        .bind(bind_addr)?
        .run();
    info!(%bind_addr, "books server listening");
    Ok(server)
}
