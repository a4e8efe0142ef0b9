// Use cases layer: session dispatch and host hook wiring.

pub mod events;
pub mod session;

pub use events::{FieldChange, HookSubscription, HookVariant, HostHooks};
pub use session::{Session, SessionState};
