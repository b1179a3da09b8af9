use std::time::{Duration, UNIX_EPOCH};
use unicode_width::UnicodeWidthChar;

const DATE_FORMAT_TODAY: &str = "Today %H:%M";
const DATE_FORMAT_YESTERDAY: &str = "Yesterday %H:%M";
const DATE_FORMAT_OTHER: &str = "%Y-%m-%d";

/// Keeps the first `max_width` columns of `s`, appending "..." when anything
/// was cut.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    let mut width = 0;
    for (idx, ch) in s.char_indices() {
        width += ch.width().unwrap_or(0);
        if width > max_width {
            return format!("{}...", &s[..idx]);
        }
    }
    s.to_string()
}

/// `MM:SS`; minutes keep counting past an hour.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

pub fn format_attempt_date(timestamp: i64) -> String {
    let attempt_time = UNIX_EPOCH + Duration::from_secs(timestamp.max(0) as u64);
    let datetime: chrono::DateTime<chrono::Local> = attempt_time.into();

    let today = chrono::Local::now();
    let attempt_date = datetime.date_naive();

    if attempt_date == today.date_naive() {
        datetime.format(DATE_FORMAT_TODAY).to_string()
    } else if attempt_date == today.date_naive() - chrono::Duration::days(1) {
        datetime.format(DATE_FORMAT_YESTERDAY).to_string()
    } else {
        datetime.format(DATE_FORMAT_OTHER).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string_no_truncation() {
        assert_eq!(truncate_string("Short string", 20), "Short string");
        assert_eq!(truncate_string("", 20), "");
    }

    #[test]
    fn test_truncate_string_exact_length() {
        let s = "a".repeat(150);
        assert_eq!(truncate_string(&s, 150), s);
    }

    #[test]
    fn test_truncate_string_with_truncation() {
        let s = "This is a very long string that should be truncated";
        assert_eq!(truncate_string(s, 20), "This is a very long ...");
    }

    #[test]
    fn test_truncate_string_multibyte() {
        assert_eq!(truncate_string("caf\u{e9} au lait", 4), "caf\u{e9}...");
        assert_eq!(truncate_string("\u{7269}\u{4ef6}\u{8cc7}\u{7522}", 5), "\u{7269}\u{4ef6}...");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_secs(0)), "00:00");
        assert_eq!(format_elapsed(Duration::from_secs(95)), "01:35");
        assert_eq!(format_elapsed(Duration::from_secs(3725)), "62:05");
    }

    #[test]
    fn test_format_attempt_date_today() {
        let now = chrono::Utc::now().timestamp();
        assert!(format_attempt_date(now).starts_with("Today "));
    }

    #[test]
    fn test_format_attempt_date_old() {
        assert_eq!(format_attempt_date(86_400 * 400).len(), "1971-02-05".len());
    }
}
