use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Countdown clock as `m:ss`; minutes are not wrapped into hours
pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Shorten `text` to at most `max_width` terminal columns, ending in `…` when cut
pub fn fit_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(3600), "60:00");
        assert_eq!(format_clock(3599), "59:59");
        assert_eq!(format_clock(61), "1:01");
        assert_eq!(format_clock(9), "0:09");
        assert_eq!(format_clock(0), "0:00");
    }

    #[test]
    fn test_fit_width_short_text_untouched() {
        assert_eq!(fit_width("Stack", 10), "Stack");
        assert_eq!(fit_width("Stack", 5), "Stack");
    }

    #[test]
    fn test_fit_width_truncates_with_ellipsis() {
        assert_eq!(fit_width("Structured Query Language", 10), "Structure…");
        assert_eq!(fit_width("abc", 0), "");
    }

    #[test]
    fn test_fit_width_counts_wide_chars() {
        // each CJK glyph takes two columns
        assert_eq!(fit_width("試験監督", 5), "試験…");
    }
}
