use playerdata_server::frameworks::host::{InMemoryHost, PlayerSeed};
use playerdata_server::interface_adapters::state::AppState;
use playerdata_server::run_with_config;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Standalone demo host so the server runs without a game attached; real
    // deployments embed the crate and implement StateSource themselves.
    let host = InMemoryHost::new(env!("CARGO_PKG_VERSION"), false);
    host.seed(&PlayerSeed::default());
    host.set_mods(format!("playerdata_server:{}", env!("CARGO_PKG_VERSION")));

    let state = Arc::new(AppState {
        source: host.clone(),
        hooks: host.hooks().clone(),
    });

    if let Err(e) = run_with_config(state).await {
        tracing::error!(error = %e, "server exited with error");
    }
}
