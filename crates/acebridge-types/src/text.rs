// ABOUTME: Canonical line-ending handling for text crossing the bridge

use std::borrow::Cow;

/// Strip every carriage return so text always uses `\n` line endings.
///
/// Borrows when there is nothing to strip.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace('\r', ""))
    } else {
        Cow::Borrowed(text)
    }
}
