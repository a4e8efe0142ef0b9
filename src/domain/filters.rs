// Static forwarding rules for field-change notifications.
//
// Trackers only care about a narrow slice of player state (charms, relics,
// upgrade levels, a few counters); everything else stays on the host side.

const BOOL_PREFIXES: &[&str] = &[
    "gotCharm_",
    "brokenCharm_",
    "equippedCharm_",
    "has",
    "maskBroken",
];
const BOOL_EXACT: &str = "overcharmed";

const INT_KEYS: &[&str] = &[
    "simpleKeys",
    "nailDamage",
    "maxHealth",
    "MPReserveMax",
    "ore",
    "rancidEggs",
    "grubsCollected",
    "charmSlotsFilled",
    "charmSlots",
];
const INT_SUFFIX: &str = "Level";
const INT_PREFIX: &str = "trinket";

/// Whether a boolean field-change notification is forwarded to clients.
pub fn forwards_bool(name: &str) -> bool {
    name == BOOL_EXACT || BOOL_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
}

/// Whether an integer field-change notification is forwarded to clients.
pub fn forwards_int(name: &str) -> bool {
    INT_KEYS.contains(&name) || name.ends_with(INT_SUFFIX) || name.starts_with(INT_PREFIX)
}
