mod routes;
mod seed;
mod state;

use actix_web::{web, App, HttpServer};
use qdart_broadcast::Broadcaster;
use qdart_config::ServiceConfig;
use qdart_engine::{CoordinationStore, Engine};
use qdart_identity::MockCredentialStore;
use qdart_observability::{init, log_startup, ObservabilityConfig};
use qdart_storage_mem::MemoryStore;
use state::AppState;
use std::io;
use std::sync::Arc;
use std::time::Duration;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let config = ServiceConfig::from_env("qdart-api");
    let obs_config = ObservabilityConfig {
        service_name: config.service_name.clone(),
        environment: config.environment.to_string(),
        log_level: config.log_level.clone(),
        metrics_addr: config.metrics_addr.clone(),
    };
    let handle = init(&obs_config);
    log_startup(&handle, &obs_config.environment);

    let store: Arc<dyn CoordinationStore> = Arc::new(MemoryStore::new());
    if config.seed_demo {
        if let Err(err) = seed::demo_fixtures(store.as_ref()).await {
            tracing::warn!(error = %err, "demo fixtures could not be seeded");
        }
    }

    let broadcaster = Arc::new(Broadcaster::with_command_room(config.command_room.clone()));
    let engine = Engine::new(store, broadcaster.clone())
        .with_geocode_timeout(Duration::from_millis(config.geocode_timeout_ms));

    let bind_addr = config.bind_addr.clone();
    let state = web::Data::new(AppState {
        config,
        engine,
        broadcaster,
        authenticator: MockCredentialStore::default(),
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
