//! Roomkeeper JSON API Server

use std::process;

use salvo::{
    affix_state::inject,
    oapi::{OpenApi, swagger_ui::SwaggerUi},
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use roomkeeper_app::{
    context::{AppContext, AppOptions},
    domain::maintenance::MaintenanceScheduler,
};

use crate::{
    config::ServerConfig,
    observability::{Observability, metrics_handler, request_logging},
    router::app_router,
    state::State,
};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod bookings;
mod config;
mod extensions;
mod healthcheck;
mod identity;
mod observability;
mod params;
mod rooms;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// Roomkeeper JSON API Server entry point
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    let observability = Observability::init(&config).unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("Observability error: {e}");
        }

        process::exit(1);
    });

    let time_zone = match config.hotel.resolve_time_zone() {
        Ok(time_zone) => time_zone,
        Err(tz_error) => {
            error!("unknown hotel time zone {:?}: {tz_error}", config.hotel.time_zone);

            process::exit(1);
        }
    };

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let options = AppOptions {
        migrate: config.database.migrate,
        smtp: config.smtp.settings(),
    };

    let app = match AppContext::from_database_url(&config.database.database_url, options).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let mut scheduler = config.maintenance.maintenance_enabled.then(|| {
        let mut scheduler = MaintenanceScheduler::new(
            app.maintenance.clone(),
            config.maintenance.period(),
            time_zone.clone(),
        );

        scheduler.start();

        scheduler
    });

    let router = Router::new()
        .hoop(request_logging)
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app, time_zone)))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(app_router());

    let doc = OpenApi::new("Roomkeeper API", env!("CARGO_PKG_VERSION")).merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();
    let drain = config.server.shutdown_timeout();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle, drain).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(router).await;

    if let Some(scheduler) = scheduler.as_mut() {
        scheduler.stop().await;
    }

    observability.shutdown();
}
