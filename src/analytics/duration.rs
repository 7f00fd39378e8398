use super::parse::parse_instant;

/// Holding time in whole minutes between open and close.
///
/// Both sides are read in the same naive local frame. Returns `None` when any
/// field is missing or malformed, or when the close precedes the open.
pub fn duration(open_date: &str, open_time: &str, close_date: &str, close_time: &str) -> Option<u64> {
    let opened = parse_instant(open_date, open_time)?;
    let closed = parse_instant(close_date, close_time)?;

    if closed < opened {
        return None;
    }
    u64::try_from(closed.signed_duration_since(opened).num_minutes()).ok()
}
