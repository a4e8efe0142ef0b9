use crate::domain::StateSource;
use crate::use_cases::HostHooks;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    // Read-only view of the host's live player state.
    pub source: Arc<dyn StateSource>,
    // Change-notification hooks each connection subscribes to at open.
    pub hooks: HostHooks,
}
