// Domain layer: player-state ports and forwarding rules.

pub mod filters;
pub mod snapshot;
pub mod source;

pub use source::{RandomizerSettings, StateSource};
