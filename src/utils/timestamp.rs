use chrono::Local;

/// Full timestamp string, e.g. "2026-08-07 14:03:21.512".
pub fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

/// Compact timestamp suitable for file names, e.g. "20260807140321".
pub fn short_timestamp() -> String {
    Local::now().format("%Y%m%d%H%M%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_starts_with_current_date() {
        let stamp = timestamp();
        assert!(!stamp.is_empty());

        let today = Local::now().format("%Y-%m-%d").to_string();
        assert_eq!(&stamp[..10], today);
    }

    #[test]
    fn short_timestamp_is_compact_digits() {
        let stamp = short_timestamp();
        assert_eq!(stamp.len(), 14);
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));
    }
}
