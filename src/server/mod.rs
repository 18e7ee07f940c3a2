pub mod auth;
pub mod routes;
pub mod store;
pub mod types;

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::Config;
use auth::BearerTokenAuthorizer;
use routes::{build_router, ApiState};
use store::ScheduleStore;
use types::ServerInfo;

pub struct AppState {
    pub server_info: ServerInfo,
    pub api_state: ApiState,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let store = Arc::new(ScheduleStore::load(&config.data_dir));
        let authorizer = Arc::new(BearerTokenAuthorizer::new(config.admin_token.clone()));

        let ip = get_local_ipv4();
        let port = config.port;
        let url = format!("http://{ip}:{port}");
        let server_info = ServerInfo { ip, port, url };

        let api_state = ApiState {
            store,
            authorizer,
            timezone: config.timezone,
            server_info: server_info.clone(),
        };

        Self {
            server_info,
            api_state,
        }
    }
}

fn get_local_ipv4() -> String {
    local_ip_address::local_ip()
        .ok()
        .and_then(|ip| match ip {
            std::net::IpAddr::V4(v4) => Some(v4.to_string()),
            _ => None,
        })
        .unwrap_or_else(|| "127.0.0.1".to_string())
}

pub async fn start_server(state: Arc<AppState>) -> std::io::Result<()> {
    let router = build_router(state.api_state.clone());
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], state.server_info.port));

    let listener = TcpListener::bind(addr).await.map_err(|e| {
        error!("failed to bind port {}: {e}", state.server_info.port);
        e
    })?;
    info!(%addr, url = %state.server_info.url, "schedule server listening");
    axum::serve(listener, router).await
}
