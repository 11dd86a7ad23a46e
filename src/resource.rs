//! Static SQL resources embedded at compile time.

/// The session-timezone statement, embedded from `resources/set_timezone.sql`.
///
/// Loaded once and reused for every transaction; executed on each connection
/// before any work runs so date/time interpretation is pinned for the
/// transaction's lifetime.
pub fn set_timezone_sql() -> &'static str {
    include_str!("../resources/set_timezone.sql").trim()
}
