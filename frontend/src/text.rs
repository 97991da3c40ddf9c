//! Text helpers shared by the page scripts.

/// Formats a playback offset as `MM:SS`, or `HH:MM:SS` from one hour up.
///
/// Every component is floored. Negative and non-finite offsets format as
/// `00:00`.
pub fn format_time(total_seconds: f64) -> String {
    let total = if total_seconds.is_finite() && total_seconds > 0.0 {
        total_seconds.floor() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Escapes `text` for use as HTML text content or a quoted attribute value.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            // innerHTML serializes no-break spaces this way too
            '\u{a0}' => escaped.push_str("&nbsp;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unescape(markup: &str) -> String {
        let mut out = String::new();
        let mut rest = markup;
        while let Some(start) = rest.find('&') {
            out.push_str(&rest[..start]);
            let end = rest[start..].find(';').expect("entity must be terminated") + start;
            out.push(match &rest[start..=end] {
                "&amp;" => '&',
                "&lt;" => '<',
                "&gt;" => '>',
                "&quot;" => '"',
                "&#39;" => '\'',
                "&nbsp;" => '\u{a0}',
                other => panic!("unexpected entity {}", other),
            });
            rest = &rest[end + 1..];
        }
        out.push_str(rest);
        out
    }

    #[test]
    fn short_durations() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(65.0), "01:05");
        assert_eq!(format_time(59.99), "00:59");
        assert_eq!(format_time(3599.5), "59:59");
    }

    #[test]
    fn hour_and_up() {
        assert_eq!(format_time(3600.0), "01:00:00");
        assert_eq!(format_time(3725.0), "01:02:05");
        assert_eq!(format_time(100.0 * 3600.0 + 1.0), "100:00:01");
    }

    #[test]
    fn out_of_range_offsets() {
        assert_eq!(format_time(-5.0), "00:00");
        assert_eq!(format_time(f64::NAN), "00:00");
        assert_eq!(format_time(f64::INFINITY), "00:00");
    }

    #[test]
    fn escaped_markup_has_no_tags() {
        let input = "<b>&amp;</b>";
        let escaped = escape_html(input);
        assert!(!escaped.contains('<'));
        assert!(!escaped.contains('>'));
        assert_eq!(escaped, "&lt;b&gt;&amp;amp;&lt;/b&gt;");
        assert_eq!(unescape(&escaped), input);
    }

    #[test]
    fn quotes_and_plain_text() {
        assert_eq!(escape_html(r#"say "hi" 'there'"#), "say &quot;hi&quot; &#39;there&#39;");
        assert_eq!(escape_html("plain кириллица"), "plain кириллица");
        let tricky = "a\u{a0}b & \"c\"";
        assert_eq!(unescape(&escape_html(tricky)), tricky);
    }
}
