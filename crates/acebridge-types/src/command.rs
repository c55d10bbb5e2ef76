// ABOUTME: Read-only descriptors of the engine's named commands
// ABOUTME: Enumerated on demand from the engine, never cached or mutated

use serde::{Deserialize, Serialize};

/// Key binding of a command per platform family
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyBinding {
    #[serde(default)]
    pub win: Option<String>,
    #[serde(default)]
    pub mac: Option<String>,
}

impl KeyBinding {
    pub fn is_unbound(&self) -> bool {
        self.win.is_none() && self.mac.is_none()
    }
}

/// A named engine command and its key binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "bindKey", deserialize_with = "deserialize_binding")]
    pub binding: KeyBinding,
    #[serde(default, rename = "readOnly")]
    pub read_only: bool,
}

/// Engines report bindings either as `{win, mac}` or as a single string
fn deserialize_binding<'de, D>(deserializer: D) -> Result<KeyBinding, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawBinding {
        Both(KeyBinding),
        Single(String),
        Missing(Option<()>),
    }

    Ok(match RawBinding::deserialize(deserializer)? {
        RawBinding::Both(binding) => binding,
        RawBinding::Single(keys) => KeyBinding {
            win: Some(keys.clone()),
            mac: Some(keys),
        },
        RawBinding::Missing(_) => KeyBinding::default(),
    })
}
