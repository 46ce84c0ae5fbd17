/// Countdown label as `m:ss`. Minutes are not wrapped into hours.
#[must_use]
pub fn format_countdown(secs: u64) -> String {
    let minutes = secs / 60;
    let remainder = secs % 60;
    format!("{minutes}:{remainder:02}")
}
