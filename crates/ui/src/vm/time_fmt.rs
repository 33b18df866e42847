use persona_core::time::from_millis;

/// `mm:ss`, or `h:mm:ss` from one hour on.
#[must_use]
pub fn format_elapsed(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}

#[must_use]
pub fn format_started_at(millis: i64) -> Option<String> {
    from_millis(millis).map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string())
}
