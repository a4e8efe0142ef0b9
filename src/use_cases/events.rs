// Host change-notification hooks, modeled as broadcast channels.

use tokio::sync::broadcast;

/// A single field-change notification from the host.
#[derive(Debug, Clone)]
pub struct FieldChange<T> {
    pub name: String,
    pub value: T,
}

/// Bool and int field-changed hook pair.
#[derive(Clone)]
pub struct FieldHooks {
    pub bool_tx: broadcast::Sender<FieldChange<bool>>,
    pub int_tx: broadcast::Sender<FieldChange<i32>>,
}

impl FieldHooks {
    fn new(capacity: usize) -> Self {
        let (bool_tx, _) = broadcast::channel(capacity);
        let (int_tx, _) = broadcast::channel(capacity);
        Self { bool_tx, int_tx }
    }
}

/// Change-notification hooks the host exposes to connections.
#[derive(Clone)]
pub struct HostHooks {
    pub new_game_tx: broadcast::Sender<()>,
    pub save_loaded_tx: broadcast::Sender<i32>,
    pub quit_tx: broadcast::Sender<()>,
    /// Generic field-changed hooks, always present.
    pub fields: FieldHooks,
    /// Randomizer-specific field-changed hooks, present only when that
    /// subsystem is loaded. Connections prefer these at subscribe time.
    pub randomizer_fields: Option<FieldHooks>,
}

/// Which field-changed hook variant a connection resolved at open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookVariant {
    Randomizer,
    Generic,
}

/// Receivers one connection holds while open.
///
/// Dropping the subscription is the unsubscribe; there is nothing else to
/// tear down, and the order the receivers drop in does not matter.
pub struct HookSubscription {
    pub variant: HookVariant,
    pub new_game_rx: broadcast::Receiver<()>,
    pub save_loaded_rx: broadcast::Receiver<i32>,
    pub quit_rx: broadcast::Receiver<()>,
    pub bool_rx: broadcast::Receiver<FieldChange<bool>>,
    pub int_rx: broadcast::Receiver<FieldChange<i32>>,
}

impl HostHooks {
    pub fn new(capacity: usize, with_randomizer: bool) -> Self {
        let (new_game_tx, _) = broadcast::channel(capacity);
        let (save_loaded_tx, _) = broadcast::channel(capacity);
        let (quit_tx, _) = broadcast::channel(capacity);
        Self {
            new_game_tx,
            save_loaded_tx,
            quit_tx,
            fields: FieldHooks::new(capacity),
            randomizer_fields: with_randomizer.then(|| FieldHooks::new(capacity)),
        }
    }

    /// Field hooks the host fires on a change. When the randomizer is loaded
    /// its hooks shadow the generic ones, mirroring how it intercepts the
    /// host's setters.
    pub fn active_fields(&self) -> &FieldHooks {
        self.randomizer_fields.as_ref().unwrap_or(&self.fields)
    }

    /// Capability probe, resolved once per connection: attach to the
    /// randomizer-specific field hooks when available, else the generic ones.
    pub fn subscribe(&self) -> HookSubscription {
        let (variant, fields) = match &self.randomizer_fields {
            Some(fields) => (HookVariant::Randomizer, fields),
            None => (HookVariant::Generic, &self.fields),
        };
        HookSubscription {
            variant,
            new_game_rx: self.new_game_tx.subscribe(),
            save_loaded_rx: self.save_loaded_tx.subscribe(),
            quit_rx: self.quit_tx.subscribe(),
            bool_rx: fields.bool_tx.subscribe(),
            int_rx: fields.int_tx.subscribe(),
        }
    }
}
