// ABOUTME: Named command table of the test engine
// ABOUTME: Mirrors the shape the engine reports: a byName object of name, bindKey and readOnly

use serde_json::{Map, Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub win: &'static str,
    pub mac: &'static str,
    /// Allowed while the editor is read-only
    pub read_only: bool,
}

const fn command(name: &'static str, win: &'static str, mac: &'static str, read_only: bool) -> CommandSpec {
    CommandSpec {
        name,
        win,
        mac,
        read_only,
    }
}

pub const COMMANDS: &[CommandSpec] = &[
    command("selectall", "Ctrl-A", "Command-A", true),
    command("copy", "Ctrl-C", "Command-C", true),
    command("cut", "Ctrl-X", "Command-X", false),
    command("paste", "Ctrl-V", "Command-V", false),
    command("undo", "Ctrl-Z", "Command-Z", false),
    command("redo", "Ctrl-Shift-Z|Ctrl-Y", "Command-Shift-Z|Command-Y", false),
    command("removeline", "Ctrl-D", "Command-D", false),
    command("gotoline", "Ctrl-L", "Command-L", true),
    command("find", "Ctrl-F", "Command-F", true),
    command("replace", "Ctrl-H", "Command-Option-F", true),
    command("showSettingsMenu", "Ctrl-,", "Command-,", true),
];

pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.name == name)
}

/// The `commands.byName` object
pub fn by_name() -> Value {
    let mut by_name = Map::new();
    for spec in COMMANDS {
        by_name.insert(
            spec.name.to_string(),
            json!({
                "name": spec.name,
                "bindKey": { "win": spec.win, "mac": spec.mac },
                "readOnly": spec.read_only,
            }),
        );
    }
    Value::Object(by_name)
}
