// Full-state snapshot construction with the randomizer spell-level override.

use crate::domain::source::StateSource;
use serde_json::Value;
use tracing::warn;

// Spell levels the randomizer tracks outside the regular snapshot fields.
// `_fireballLevel` doubles as the sentinel: -1 means "unset".
const FIREBALL_OVERRIDE: &str = "_fireballLevel";
const QUAKE_OVERRIDE: &str = "_quakeLevel";
const SCREAM_OVERRIDE: &str = "_screamLevel";

const FIREBALL_FIELD: &str = "fireballLevel";
const QUAKE_FIELD: &str = "quakeLevel";
const SCREAM_FIELD: &str = "screamLevel";

/// Renders the full player-state snapshot.
///
/// The host's own JSON rendering passes through untouched unless the
/// randomizer has populated its spell-level overrides, in which case the
/// three level fields are spliced in before the snapshot is returned.
pub fn full_snapshot(source: &dyn StateSource) -> String {
    let json = source.player_json();

    let fireball = source.get_int(FIREBALL_OVERRIDE);
    if fireball < 0 {
        return json;
    }
    let quake = source.get_int(QUAKE_OVERRIDE);
    let scream = source.get_int(SCREAM_OVERRIDE);

    let mut snapshot: Value = match serde_json::from_str(&json) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "snapshot is not valid JSON; skipping spell-level override");
            return json;
        }
    };
    let Some(fields) = snapshot.as_object_mut() else {
        warn!("snapshot is not a JSON object; skipping spell-level override");
        return json;
    };

    fields.insert(FIREBALL_FIELD.to_string(), Value::from(fireball));
    fields.insert(QUAKE_FIELD.to_string(), Value::from(quake));
    fields.insert(SCREAM_FIELD.to_string(), Value::from(scream));

    serde_json::to_string(&snapshot).unwrap_or(json)
}
