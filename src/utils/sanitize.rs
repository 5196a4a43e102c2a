//! Utilities for sanitizing upstream text before logging it.
//!
//! Upstream bodies are arbitrary HTML or JSON from third parties; only a
//! bounded, control-character-free prefix of them ever reaches the logs.

use crate::config::MAX_DIAGNOSTIC_LENGTH;

/// Removes control characters (0x00-0x1F except tab, newline, carriage return).
pub fn sanitize_message(message: &str) -> String {
    message
        .chars()
        .filter(|c| {
            let code = *c as u32;
            code >= 0x20 // Printable ASCII starts at 0x20 (space)
                || code == 0x09 // Tab
                || code == 0x0A // Newline
                || code == 0x0D // Carriage return
        })
        .collect()
}

/// Sanitizes `message` and cuts it to at most `MAX_DIAGNOSTIC_LENGTH` characters.
///
/// A truncated message is suffixed with the original length so the log line
/// still says how much was dropped.
pub fn truncate_for_log(message: &str) -> String {
    let sanitized = sanitize_message(message);
    let char_count = sanitized.chars().count();
    if char_count <= MAX_DIAGNOSTIC_LENGTH {
        return sanitized;
    }

    // Cut on a char boundary; the body may be multi-byte UTF-8.
    let cut = sanitized
        .char_indices()
        .nth(MAX_DIAGNOSTIC_LENGTH)
        .map(|(idx, _)| idx)
        .unwrap_or(sanitized.len());
    format!(
        "{}... (truncated, original length: {} chars)",
        &sanitized[..cut],
        char_count
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_message_removes_control_chars() {
        let input = "Error\x00message\x01with\x02control\x03chars";
        assert_eq!(sanitize_message(input), "Errormessagewithcontrolchars");
    }

    #[test]
    fn test_sanitize_message_preserves_whitespace() {
        let input = "line one\nline\ttwo\r\n";
        assert_eq!(sanitize_message(input), input);
    }

    #[test]
    fn test_sanitize_message_preserves_unicode() {
        let input = "Error message with unicode: 测试 🚀";
        assert_eq!(sanitize_message(input), input);
    }

    #[test]
    fn test_truncate_short_message_unchanged() {
        assert_eq!(truncate_for_log("<html></html>"), "<html></html>");
        assert_eq!(truncate_for_log(""), "");
    }

    #[test]
    fn test_truncate_long_message() {
        let long = "a".repeat(MAX_DIAGNOSTIC_LENGTH + 100);
        let out = truncate_for_log(&long);
        assert!(out.starts_with(&"a".repeat(MAX_DIAGNOSTIC_LENGTH)));
        assert!(out.ends_with(&format!(
            "(truncated, original length: {} chars)",
            MAX_DIAGNOSTIC_LENGTH + 100
        )));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let long = "测".repeat(MAX_DIAGNOSTIC_LENGTH + 1);
        let out = truncate_for_log(&long);
        assert!(out.starts_with(&"测".repeat(MAX_DIAGNOSTIC_LENGTH)));
        assert!(out.contains("truncated"));
    }
}
