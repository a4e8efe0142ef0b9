// In-memory host implementation of the player-state ports.
//
// Stands in for the game process: the binary seeds it with baseline data so
// the server is runnable standalone, and integration tests drive it directly.
// Real embeddings implement `StateSource` against live game state instead.

use crate::domain::{RandomizerSettings, StateSource};
use crate::frameworks::config;
use crate::use_cases::events::{FieldChange, HostHooks};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// Baseline player-state fields, rendered through serde the same way the
/// host's own generic serializer would name them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSeed {
    pub max_health: i32,
    #[serde(rename = "MPReserveMax")]
    pub mp_reserve_max: i32,
    pub nail_damage: i32,
    pub ore: i32,
    pub simple_keys: i32,
    pub rancid_eggs: i32,
    pub grubs_collected: i32,
    pub charm_slots: i32,
    pub charm_slots_filled: i32,
    pub fireball_level: i32,
    pub quake_level: i32,
    pub scream_level: i32,
    pub trinket1: i32,
    pub trinket2: i32,
    pub trinket3: i32,
    pub trinket4: i32,
    pub has_dash: bool,
    pub overcharmed: bool,
}

impl Default for PlayerSeed {
    fn default() -> Self {
        Self {
            max_health: 5,
            mp_reserve_max: 0,
            nail_damage: 5,
            ore: 0,
            simple_keys: 0,
            rancid_eggs: 0,
            grubs_collected: 0,
            charm_slots: 3,
            charm_slots_filled: 0,
            fireball_level: 0,
            quake_level: 0,
            scream_level: 0,
            trinket1: 0,
            trinket2: 0,
            trinket3: 0,
            trinket4: 0,
            has_dash: false,
            overcharmed: false,
        }
    }
}

/// In-memory player state with live change hooks.
pub struct InMemoryHost {
    version: String,
    mods: RwLock<String>,
    bools: RwLock<BTreeMap<String, bool>>,
    ints: RwLock<BTreeMap<String, i32>>,
    randomizer: RwLock<Option<RandomizerSettings>>,
    hooks: HostHooks,
}

impl InMemoryHost {
    /// `randomizer_hooks` controls whether the randomizer-specific
    /// field-changed hook variant exists for connections to probe.
    pub fn new(version: impl Into<String>, randomizer_hooks: bool) -> Arc<Self> {
        Arc::new(Self {
            version: version.into(),
            mods: RwLock::new(String::new()),
            bools: RwLock::new(BTreeMap::new()),
            ints: RwLock::new(BTreeMap::new()),
            randomizer: RwLock::new(None),
            hooks: HostHooks::new(config::HOOK_CHANNEL_CAPACITY, randomizer_hooks),
        })
    }

    pub fn hooks(&self) -> &HostHooks {
        &self.hooks
    }

    /// Populates baseline fields without firing change hooks; meant to run
    /// before any client connects.
    pub fn seed(&self, seed: &PlayerSeed) {
        let Ok(Value::Object(fields)) = serde_json::to_value(seed) else {
            return;
        };
        let mut bools = self.bools.write().expect("player state lock poisoned");
        let mut ints = self.ints.write().expect("player state lock poisoned");
        for (name, value) in fields {
            match value {
                Value::Bool(flag) => {
                    bools.insert(name, flag);
                }
                Value::Number(number) => {
                    if let Some(int) = number.as_i64() {
                        ints.insert(name, int as i32);
                    }
                }
                _ => {}
            }
        }
    }

    pub fn set_mods(&self, mods: impl Into<String>) {
        *self.mods.write().expect("mods lock poisoned") = mods.into();
    }

    pub fn set_randomizer(&self, settings: Option<RandomizerSettings>) {
        *self.randomizer.write().expect("randomizer lock poisoned") = settings;
    }

    /// Stores a boolean field and fires the field-changed hook.
    pub fn set_bool(&self, name: &str, value: bool) {
        self.bools
            .write()
            .expect("player state lock poisoned")
            .insert(name.to_string(), value);
        let _ = self.hooks.active_fields().bool_tx.send(FieldChange {
            name: name.to_string(),
            value,
        });
    }

    /// Stores an integer field and fires the field-changed hook.
    pub fn set_int(&self, name: &str, value: i32) {
        self.ints
            .write()
            .expect("player state lock poisoned")
            .insert(name.to_string(), value);
        let _ = self.hooks.active_fields().int_tx.send(FieldChange {
            name: name.to_string(),
            value,
        });
    }

    pub fn new_game(&self) {
        let _ = self.hooks.new_game_tx.send(());
    }

    pub fn save_loaded(&self, slot: i32) {
        let _ = self.hooks.save_loaded_tx.send(slot);
    }

    pub fn quit(&self) {
        let _ = self.hooks.quit_tx.send(());
    }
}

impl StateSource for InMemoryHost {
    fn get_bool(&self, name: &str) -> bool {
        self.bools
            .read()
            .expect("player state lock poisoned")
            .get(name)
            .copied()
            .unwrap_or(false)
    }

    // -1 mirrors the host's "unset" sentinel convention.
    fn get_int(&self, name: &str) -> i32 {
        self.ints
            .read()
            .expect("player state lock poisoned")
            .get(name)
            .copied()
            .unwrap_or(-1)
    }

    // Underscore-prefixed names are hook-only overrides, not snapshot fields.
    fn player_json(&self) -> String {
        let mut fields = Map::new();
        for (name, value) in self.bools.read().expect("player state lock poisoned").iter() {
            if !name.starts_with('_') {
                fields.insert(name.clone(), Value::from(*value));
            }
        }
        for (name, value) in self.ints.read().expect("player state lock poisoned").iter() {
            if !name.starts_with('_') {
                fields.insert(name.clone(), Value::from(*value));
            }
        }
        Value::Object(fields).to_string()
    }

    fn mods(&self) -> String {
        self.mods.read().expect("mods lock poisoned").clone()
    }

    fn version(&self) -> String {
        self.version.clone()
    }

    fn randomizer(&self) -> Option<RandomizerSettings> {
        self.randomizer
            .read()
            .expect("randomizer lock poisoned")
            .clone()
    }
}
