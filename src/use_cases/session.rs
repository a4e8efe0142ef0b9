// Per-connection protocol dispatch and lifecycle state.

use crate::domain::snapshot::full_snapshot;
use crate::domain::{StateSource, filters};
use crate::interface_adapters::protocol::{
    CAPABILITIES, Command, Row, join_rows, parse_command, render_bool, version_reply,
};
use std::sync::Arc;
use tracing::debug;

/// Connection lifecycle. `Closed` is terminal; a session never reopens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Open,
    Closed,
}

/// Dispatch core for one client connection.
///
/// Owns no IO: every method returns the outbound frames to write, and the
/// network adapter decides how they reach the socket. Any frame-producing
/// path is gated on the session being open; when it is not, the result is
/// empty rather than an error, so delivery stays best-effort end to end.
pub struct Session {
    source: Arc<dyn StateSource>,
    state: SessionState,
}

impl Session {
    pub fn new(source: Arc<dyn StateSource>) -> Self {
        Self {
            source,
            state: SessionState::Disconnected,
        }
    }

    pub fn open(&mut self) {
        if self.state == SessionState::Disconnected {
            self.state = SessionState::Open;
        }
    }

    pub fn close(&mut self) {
        self.state = SessionState::Closed;
    }

    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    /// Dispatches one inbound text frame and returns the replies, in order.
    pub fn handle_text(&self, text: &str) -> Vec<String> {
        if !self.is_open() {
            return Vec::new();
        }

        match parse_command(text) {
            Command::Mods => vec![self.source.mods()],
            Command::Version => vec![version_reply(&self.source.version())],
            Command::Json => {
                let mut frames = vec![full_snapshot(&*self.source)];
                frames.extend(self.randomizer_push());
                frames
            }
            Command::Relics => vec![self.relics()],
            Command::Bool(name) => self
                .field_record(&name, render_bool(self.source.get_bool(&name)))
                .into_iter()
                .collect(),
            Command::Int(name) => self
                .field_record(&name, self.source.get_int(&name).to_string())
                .into_iter()
                .collect(),
            Command::Unknown => vec![CAPABILITIES.to_string()],
        }
    }

    /// Forwards a boolean field-change notification, if it passes the filter.
    pub fn echo_bool(&self, name: &str, value: bool) -> Option<String> {
        debug!(name, value, "echo bool");
        if !filters::forwards_bool(name) {
            return None;
        }
        self.field_record(name, render_bool(value))
    }

    /// Forwards an integer field-change notification, if it passes the filter.
    pub fn echo_int(&self, name: &str, value: i32) -> Option<String> {
        debug!(name, value, "echo int");
        if !filters::forwards_int(name) {
            return None;
        }
        self.field_record(name, value.to_string())
    }

    /// New-game hook: randomizer push plus a `NewSave` notice.
    pub fn on_new_game(&self) -> Vec<String> {
        let mut frames = self.randomizer_push();
        frames.extend(self.field_record("NewSave", "true"));
        frames
    }

    /// Save-loaded hook: randomizer push plus a `SaveLoaded` notice.
    pub fn on_save_loaded(&self, slot: i32) -> Vec<String> {
        debug!(slot, "save loaded");
        let mut frames = self.randomizer_push();
        frames.extend(self.field_record("SaveLoaded", "true"));
        frames
    }

    /// Application-quit hook.
    pub fn on_quit(&self) -> Option<String> {
        self.field_record("GameExiting", "true")
    }

    /// Best-effort randomizer info. Present and active yields `seed` and
    /// `mode`; an absent or inactive collaborator yields the sentinel reply
    /// instead, never an error.
    fn randomizer_push(&self) -> Vec<String> {
        match self.source.randomizer() {
            Some(settings) if settings.active => {
                let mode = if settings.hard_mode { "hard" } else { "easy" };
                self.field_record("seed", settings.seed.to_string())
                    .into_iter()
                    .chain(self.field_record("mode", mode))
                    .collect()
            }
            _ => self.field_record("randomizer", "false").into_iter().collect(),
        }
    }

    fn relics(&self) -> String {
        let rows: Vec<Row> = ["trinket1", "trinket2", "trinket3", "trinket4"]
            .into_iter()
            .map(|name| Row::new(name, self.source.get_int(name).to_string()))
            .collect();
        join_rows(&rows)
    }

    // Sends are dropped silently while the session is not open.
    fn field_record(&self, var: &str, value: impl Into<String>) -> Option<String> {
        if !self.is_open() {
            return None;
        }
        Some(Row::new(var, value).to_pair())
    }
}
