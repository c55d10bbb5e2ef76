// ABOUTME: Pure value types with no cross-crate dependencies
// ABOUTME: Foundation layer carried across the host/engine boundary

pub mod command;
pub mod position;
pub mod search;
pub mod syntax;
pub mod text;
pub mod theme;

// Re-export commonly used types
pub use command::{Command, KeyBinding};
pub use position::{Position, Range};
pub use search::SearchOptions;
pub use syntax::Mode;
pub use text::normalize_line_endings;
pub use theme::Theme;

/// Which static alias table a lookup was made against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AliasKind {
    Mode,
    Theme,
}

impl std::fmt::Display for AliasKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AliasKind::Mode => f.write_str("mode"),
            AliasKind::Theme => f.write_str("theme"),
        }
    }
}
