// Ports onto the host application that owns the live player state.

/// Settings of the optional randomizer subsystem, read when it is loaded.
#[derive(Debug, Clone)]
pub struct RandomizerSettings {
    /// Whether the randomizer is active for the current save.
    pub active: bool,
    /// Seed of the current randomization.
    pub seed: i32,
    /// Hard mode flag; decides the `mode` value pushed to clients.
    pub hard_mode: bool,
}

/// Read-only view of the host's live player-state object.
///
/// Everything the socket server knows about the game goes through this trait;
/// it never writes back. The host decides how fields are resolved and how the
/// full state is rendered to JSON.
pub trait StateSource: Send + Sync {
    /// Current value of a boolean player-state field.
    fn get_bool(&self, name: &str) -> bool;

    /// Current value of an integer player-state field. Hosts use -1 for
    /// fields that are unset or not applicable.
    fn get_int(&self, name: &str) -> i32;

    /// The host's own generic rendering of the full player state as a flat
    /// JSON object. Treated as opaque apart from the spell-level override.
    fn player_json(&self) -> String;

    /// Currently loaded mod list, pre-rendered by the host. Sent as-is.
    fn mods(&self) -> String;

    /// Host application version string.
    fn version(&self) -> String;

    /// Randomizer settings, or `None` when that subsystem is not loaded.
    fn randomizer(&self) -> Option<RandomizerSettings>;
}
