//! Identity and timestamp helpers shared by every subsystem.

use chrono::Utc;
use rand::Rng;
use rand::distributions::Alphanumeric;

/// Current instant as a fixed-width, padded ISO-8601 string
/// (`2026-08-07T12:30:45.123Z`).
///
/// The output length never varies, so lexicographic order IS
/// chronological order. Evolution timelines and backup pruning both
/// sort these strings directly.
#[must_use]
pub fn now_iso() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Filename-safe form of a [`now_iso`] timestamp: `:` and `.` become `-`.
///
/// Preserves the sortable property, so backup filenames embedding this
/// stamp sort oldest-first.
#[must_use]
pub fn backup_stamp(iso: &str) -> String {
    iso.replace([':', '.'], "-")
}

/// Generate a practically unique entity id without coordination:
/// `<prefix>-<coarse timestamp>-<random suffix>`.
///
/// Uniqueness holds because two ids collide only when generated in the
/// same second AND drawing the same 6-character suffix.
#[must_use]
pub fn generate_id(prefix: &str) -> String {
    let stamp = Utc::now().format("%Y%m%d%H%M%S");
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();
    format!("{prefix}-{stamp}-{}", suffix.to_lowercase())
}
