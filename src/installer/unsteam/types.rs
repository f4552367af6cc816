//! Online fix type definitions

/// Optional identity written to the `[player]` section
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerIdentity {
    pub steam_id: Option<String>,
    pub player_name: Option<String>,
}

/// One `key=value` to set inside `[section]`
#[derive(Debug, Clone, PartialEq)]
pub struct IniEdit {
    pub section: &'static str,
    pub key: &'static str,
    pub value: String,
}

impl IniEdit {
    pub fn new(section: &'static str, key: &'static str, value: impl Into<String>) -> Self {
        Self {
            section,
            key,
            value: value.into(),
        }
    }
}
