use qdart_broadcast::Broadcaster;
use qdart_config::ServiceConfig;
use qdart_engine::Engine;
use qdart_identity::MockCredentialStore;
use std::sync::Arc;

pub struct AppState {
    pub config: ServiceConfig,
    pub engine: Engine,
    pub broadcaster: Arc<Broadcaster>,
    pub authenticator: MockCredentialStore,
}
