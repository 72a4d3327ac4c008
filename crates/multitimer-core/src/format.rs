//! Millisecond display formatting for hosts.

/// Format milliseconds as "HH:MM:SS".
pub fn format_hms(ms: u64) -> String {
    let total_secs = ms / 1000;
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;
    format!("{h:02}:{m:02}:{s:02}")
}

/// Format milliseconds as "HH:MM:SS.cs" (centiseconds).
pub fn format_hms_cs(ms: u64) -> String {
    let cs = (ms % 1000) / 10;
    format!("{}.{cs:02}", format_hms(ms))
}

/// Format milliseconds as "MM:SS" (countdown display).
pub fn format_ms(ms: u64) -> String {
    let total_secs = ms / 1000;
    let m = total_secs / 60;
    let s = total_secs % 60;
    format!("{m:02}:{s:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hms_rolls_over_units() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(59_999), "00:00:59");
        assert_eq!(format_hms(60_000), "00:01:00");
        assert_eq!(format_hms(3_600_000 + 2 * 60_000 + 3_000), "01:02:03");
    }

    #[test]
    fn centiseconds_truncate() {
        assert_eq!(format_hms_cs(500), "00:00:00.50");
        assert_eq!(format_hms_cs(1_239), "00:00:01.23");
    }

    #[test]
    fn minute_seconds_for_countdowns() {
        assert_eq!(format_ms(25 * 60 * 1000), "25:00");
        assert_eq!(format_ms(90_500), "01:30");
    }
}
