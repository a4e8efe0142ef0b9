// Wire protocol for the player-data socket: inbound command grammar and
// outbound message formatting.
//
// Outbound shapes reproduce the legacy wire text exactly (spacing included);
// tracker clients in the wild parse these strings as-is, so they are built by
// hand rather than through serde.

/// Capability advertisement sent for any unrecognized input. Not JSON.
pub const CAPABILITIES: &str = "mods,version,json,bool|{var},int|{var}|relics";

/// Inbound commands clients may send as text frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Mods,
    Version,
    Json,
    Relics,
    Bool(String),
    Int(String),
    Unknown,
}

/// Parses one inbound text frame.
///
/// Exact matches first, then the `|`-delimited typed queries. Anything else
/// is `Unknown`; there is no such thing as a malformed message on this wire.
pub fn parse_command(text: &str) -> Command {
    match text {
        "mods" => Command::Mods,
        "version" => Command::Version,
        "json" => Command::Json,
        "relics" => Command::Relics,
        _ => {
            let mut segments = text.split('|');
            match (segments.next(), segments.next()) {
                (Some("bool"), Some(name)) => Command::Bool(name.to_string()),
                (Some("int"), Some(name)) => Command::Int(name.to_string()),
                _ => Command::Unknown,
            }
        }
    }
}

/// One key/value pair rendered in the legacy wire format.
#[derive(Debug, Clone)]
pub struct Row {
    pub var: String,
    pub value: String,
}

impl Row {
    pub fn new(var: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            var: var.into(),
            value: value.into(),
        }
    }

    /// Standalone field-record message. The value is always quoted, even for
    /// booleans and integers; clients coerce on their side.
    pub fn to_pair(&self) -> String {
        format!(
            " {{ \"var\" : \"{}\",  \"value\" :  \"{}\" }}",
            self.var, self.value
        )
    }

    /// Fragment used when joining several rows into one flat object.
    fn to_element(&self) -> String {
        format!("\"{}\" : \"{}\"", self.var, self.value)
    }
}

/// Joins rows into a single flat JSON object.
pub fn join_rows(rows: &[Row]) -> String {
    let elements: Vec<String> = rows.iter().map(Row::to_element).collect();
    format!("{{{}}}", elements.join(","))
}

/// The `version` command reply.
pub fn version_reply(version: &str) -> String {
    format!("{{ \"version\":\"{version}\" }}")
}

/// Boolean rendering on the wire, matching the host's own stringification.
pub fn render_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exact_commands() {
        assert_eq!(parse_command("mods"), Command::Mods);
        assert_eq!(parse_command("version"), Command::Version);
        assert_eq!(parse_command("json"), Command::Json);
        assert_eq!(parse_command("relics"), Command::Relics);
    }

    #[test]
    fn parses_typed_queries() {
        assert_eq!(
            parse_command("bool|hasDash"),
            Command::Bool("hasDash".to_string())
        );
        assert_eq!(parse_command("int|ore"), Command::Int("ore".to_string()));
        // Only the first two segments matter.
        assert_eq!(
            parse_command("bool|hasDash|extra"),
            Command::Bool("hasDash".to_string())
        );
        assert_eq!(parse_command("bool|"), Command::Bool(String::new()));
    }

    #[test]
    fn everything_else_is_unknown() {
        assert_eq!(parse_command(""), Command::Unknown);
        assert_eq!(parse_command("help"), Command::Unknown);
        assert_eq!(parse_command("bool"), Command::Unknown);
        assert_eq!(parse_command("float|geo"), Command::Unknown);
        assert_eq!(parse_command("MODS"), Command::Unknown);
    }

    #[test]
    fn field_record_pair_keeps_legacy_spacing() {
        let pair = Row::new("hasDash", "True").to_pair();
        assert_eq!(pair, " { \"var\" : \"hasDash\",  \"value\" :  \"True\" }");
    }

    #[test]
    fn joined_rows_form_one_flat_object() {
        let rows = [Row::new("trinket1", "2"), Row::new("trinket2", "0")];
        assert_eq!(
            join_rows(&rows),
            "{\"trinket1\" : \"2\",\"trinket2\" : \"0\"}"
        );
    }

    #[test]
    fn version_reply_keeps_legacy_spacing() {
        assert_eq!(version_reply("1.4.3.2"), "{ \"version\":\"1.4.3.2\" }");
    }
}
