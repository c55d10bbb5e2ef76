// ABOUTME: Static alias table of the engine's syntax highlighting modes
// ABOUTME: Maps typed modes to engine identifiers like "ace/mode/java" and back

use serde::{Deserialize, Serialize};

/// Syntax highlighting mode known to the bundled engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Mode {
    #[default]
    Text,
    Batchfile,
    CCpp,
    CSharp,
    Clojure,
    Css,
    Diff,
    Dockerfile,
    Golang,
    Groovy,
    Haskell,
    Html,
    Ini,
    Java,
    JavaScript,
    Json,
    Kotlin,
    Less,
    Lua,
    Makefile,
    Markdown,
    Perl,
    Php,
    PowerShell,
    Properties,
    Python,
    Ruby,
    Rust,
    Scala,
    Scss,
    Sh,
    Sql,
    Svg,
    Swift,
    Toml,
    TypeScript,
    Velocity,
    Xml,
    Yaml,
}

impl Mode {
    /// Every mode in the table, in display order
    pub const ALL: &'static [Mode] = &[
        Mode::Text,
        Mode::Batchfile,
        Mode::CCpp,
        Mode::CSharp,
        Mode::Clojure,
        Mode::Css,
        Mode::Diff,
        Mode::Dockerfile,
        Mode::Golang,
        Mode::Groovy,
        Mode::Haskell,
        Mode::Html,
        Mode::Ini,
        Mode::Java,
        Mode::JavaScript,
        Mode::Json,
        Mode::Kotlin,
        Mode::Less,
        Mode::Lua,
        Mode::Makefile,
        Mode::Markdown,
        Mode::Perl,
        Mode::Php,
        Mode::PowerShell,
        Mode::Properties,
        Mode::Python,
        Mode::Ruby,
        Mode::Rust,
        Mode::Scala,
        Mode::Scss,
        Mode::Sh,
        Mode::Sql,
        Mode::Svg,
        Mode::Swift,
        Mode::Toml,
        Mode::TypeScript,
        Mode::Velocity,
        Mode::Xml,
        Mode::Yaml,
    ];

    /// Engine identifier for this mode
    pub fn alias(self) -> &'static str {
        match self {
            Mode::Text => "ace/mode/text",
            Mode::Batchfile => "ace/mode/batchfile",
            Mode::CCpp => "ace/mode/c_cpp",
            Mode::CSharp => "ace/mode/csharp",
            Mode::Clojure => "ace/mode/clojure",
            Mode::Css => "ace/mode/css",
            Mode::Diff => "ace/mode/diff",
            Mode::Dockerfile => "ace/mode/dockerfile",
            Mode::Golang => "ace/mode/golang",
            Mode::Groovy => "ace/mode/groovy",
            Mode::Haskell => "ace/mode/haskell",
            Mode::Html => "ace/mode/html",
            Mode::Ini => "ace/mode/ini",
            Mode::Java => "ace/mode/java",
            Mode::JavaScript => "ace/mode/javascript",
            Mode::Json => "ace/mode/json",
            Mode::Kotlin => "ace/mode/kotlin",
            Mode::Less => "ace/mode/less",
            Mode::Lua => "ace/mode/lua",
            Mode::Makefile => "ace/mode/makefile",
            Mode::Markdown => "ace/mode/markdown",
            Mode::Perl => "ace/mode/perl",
            Mode::Php => "ace/mode/php",
            Mode::PowerShell => "ace/mode/powershell",
            Mode::Properties => "ace/mode/properties",
            Mode::Python => "ace/mode/python",
            Mode::Ruby => "ace/mode/ruby",
            Mode::Rust => "ace/mode/rust",
            Mode::Scala => "ace/mode/scala",
            Mode::Scss => "ace/mode/scss",
            Mode::Sh => "ace/mode/sh",
            Mode::Sql => "ace/mode/sql",
            Mode::Svg => "ace/mode/svg",
            Mode::Swift => "ace/mode/swift",
            Mode::Toml => "ace/mode/toml",
            Mode::TypeScript => "ace/mode/typescript",
            Mode::Velocity => "ace/mode/velocity",
            Mode::Xml => "ace/mode/xml",
            Mode::Yaml => "ace/mode/yaml",
        }
    }

    /// Human-readable name for menus and status bars
    pub fn display_name(self) -> &'static str {
        match self {
            Mode::Text => "Plain Text",
            Mode::Batchfile => "Batch",
            Mode::CCpp => "C/C++",
            Mode::CSharp => "C#",
            Mode::Clojure => "Clojure",
            Mode::Css => "CSS",
            Mode::Diff => "Diff",
            Mode::Dockerfile => "Dockerfile",
            Mode::Golang => "Go",
            Mode::Groovy => "Groovy",
            Mode::Haskell => "Haskell",
            Mode::Html => "HTML",
            Mode::Ini => "INI",
            Mode::Java => "Java",
            Mode::JavaScript => "JavaScript",
            Mode::Json => "JSON",
            Mode::Kotlin => "Kotlin",
            Mode::Less => "Less",
            Mode::Lua => "Lua",
            Mode::Makefile => "Makefile",
            Mode::Markdown => "Markdown",
            Mode::Perl => "Perl",
            Mode::Php => "PHP",
            Mode::PowerShell => "PowerShell",
            Mode::Properties => "Properties",
            Mode::Python => "Python",
            Mode::Ruby => "Ruby",
            Mode::Rust => "Rust",
            Mode::Scala => "Scala",
            Mode::Scss => "SCSS",
            Mode::Sh => "Shell",
            Mode::Sql => "SQL",
            Mode::Svg => "SVG",
            Mode::Swift => "Swift",
            Mode::Toml => "TOML",
            Mode::TypeScript => "TypeScript",
            Mode::Velocity => "Velocity",
            Mode::Xml => "XML",
            Mode::Yaml => "YAML",
        }
    }

    /// Look up a mode by its engine identifier
    pub fn from_alias(alias: &str) -> Option<Mode> {
        Self::ALL.iter().copied().find(|mode| mode.alias() == alias)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.alias())
    }
}

impl From<Mode> for &'static str {
    fn from(mode: Mode) -> Self {
        mode.alias()
    }
}

impl TryFrom<String> for Mode {
    type Error = String;

    fn try_from(alias: String) -> Result<Self, Self::Error> {
        Mode::from_alias(&alias).ok_or_else(|| format!("unknown mode alias '{alias}'"))
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(alias: &str) -> Result<Self, Self::Err> {
        Mode::from_alias(alias).ok_or_else(|| format!("unknown mode alias '{alias}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_alias_round_trip_for_every_mode() {
        for mode in Mode::ALL {
            assert_eq!(Mode::from_alias(mode.alias()), Some(*mode));
        }
    }

    #[test]
    fn test_aliases_are_unique() {
        let aliases: HashSet<_> = Mode::ALL.iter().map(|m| m.alias()).collect();
        assert_eq!(aliases.len(), Mode::ALL.len());
    }

    #[test]
    fn test_unknown_alias() {
        assert_eq!(Mode::from_alias("unknown/alias"), None);
        assert_eq!(Mode::from_alias("java"), None);
        assert!("ace/mode/cobol".parse::<Mode>().is_err());
    }

    #[test]
    fn test_default_is_plain_text() {
        assert_eq!(Mode::default(), Mode::Text);
        assert_eq!(Mode::default().alias(), "ace/mode/text");
    }

    #[test]
    fn test_serde_uses_alias() {
        let json = serde_json::to_string(&Mode::Velocity).unwrap();
        assert_eq!(json, "\"ace/mode/velocity\"");
        let mode: Mode = serde_json::from_str("\"ace/mode/json\"").unwrap();
        assert_eq!(mode, Mode::Json);
        assert!(serde_json::from_str::<Mode>("\"ace/mode/nope\"").is_err());
    }
}
