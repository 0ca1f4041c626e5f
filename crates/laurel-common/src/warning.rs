//! Colored warnings on stderr.
//!
//! Provides deduplication so that a problem hit once per record (an unreadable
//! font, a missing template) is only reported once per run.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a recoverable problem (prints once per unique message).
///
/// Returns `true` if the warning was printed, `false` if it was a repeat.
///
/// # Example
/// ```ignore
/// warn_once("fonts", "skipping '/tmp/broken.ttf': not a font file");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        eprintln!("{}", format!("[Laurel {component}] ⚠ {message}").yellow());
    }
    should_print
}

/// Report an informational message on stderr, e.g. which font file was picked.
pub fn note(component: &str, message: &str) {
    eprintln!("{}", format!("[Laurel {component}] {message}").dimmed());
}

/// Clear all recorded warnings (call when starting a new batch).
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
