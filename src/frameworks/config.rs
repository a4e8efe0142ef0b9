use std::env;

// Runtime/server constants (not protocol behavior).

/// Route tracker clients connect to.
pub const WS_ROUTE: &str = "/playerData";

/// Capacity for host change-notification broadcast channels.
pub const HOOK_CHANNEL_CAPACITY: usize = 128;

/// Port tracker clients expect by default; override with PLAYERDATA_PORT.
pub fn port() -> u16 {
    env::var("PLAYERDATA_PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(11420)
}
