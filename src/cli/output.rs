//! Output formatting for CLI commands

use serde::Serialize;

/// Format output as pretty JSON
pub fn format_output<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::NotificationContent;

    #[test]
    fn test_format_output() {
        let out = format_output(&NotificationContent::new("π", "ok"));
        assert!(out.contains("\"title\": \"π\""));
        assert!(out.contains("\"body\": \"ok\""));
    }
}
