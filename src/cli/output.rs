//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use serde::Serialize;

use crate::auth::{Claims, TokenError};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Result of checking a token, as shown by `authpad token inspect`
#[derive(Debug, Clone, Serialize)]
pub struct TokenReport {
    pub status: String,
    pub subject_identity: Option<String>,
    pub expires_at: Option<i64>,
    pub expires_at_utc: Option<String>,
}

impl TokenReport {
    pub fn from_outcome(outcome: &std::result::Result<Claims, TokenError>) -> Self {
        match outcome {
            Ok(claims) => Self {
                status: "valid".to_string(),
                subject_identity: Some(claims.subject_identity.clone()),
                expires_at: Some(claims.expires_at),
                expires_at_utc: chrono::DateTime::from_timestamp(claims.expires_at, 0)
                    .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
            },
            Err(e) => Self {
                status: match e {
                    TokenError::Expired => "expired".to_string(),
                    TokenError::Invalid => "invalid".to_string(),
                },
                subject_identity: None,
                expires_at: None,
                expires_at_utc: None,
            },
        }
    }
}

/// Format a token status as a colored string
pub fn format_status(status: &str) -> String {
    match status {
        "valid" => status.green().to_string(),
        "expired" => status.yellow().to_string(),
        _ => status.red().to_string(),
    }
}

/// Print a token report as a table
pub fn print_token_table(report: &TokenReport) {
    let status_color = match report.status.as_str() {
        "valid" => Color::Green,
        "expired" => Color::Yellow,
        _ => Color::Red,
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Status").fg(Color::Cyan),
            Cell::new("Subject").fg(Color::Cyan),
            Cell::new("Expires").fg(Color::Cyan),
        ]);

    table.add_row(vec![
        Cell::new(&report.status).fg(status_color),
        Cell::new(report.subject_identity.as_deref().unwrap_or("-")),
        Cell::new(report.expires_at_utc.as_deref().unwrap_or("-")),
    ]);

    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_for_valid_claims() {
        let claims = Claims::new("a@x.com", 900, 0);
        let report = TokenReport::from_outcome(&Ok(claims));
        assert_eq!(report.status, "valid");
        assert_eq!(report.subject_identity.as_deref(), Some("a@x.com"));
        assert_eq!(report.expires_at, Some(900));
        assert_eq!(
            report.expires_at_utc.as_deref(),
            Some("1970-01-01 00:15:00 UTC")
        );
    }

    #[test]
    fn test_report_for_rejections() {
        assert_eq!(
            TokenReport::from_outcome(&Err(TokenError::Expired)).status,
            "expired"
        );
        let invalid = TokenReport::from_outcome(&Err(TokenError::Invalid));
        assert_eq!(invalid.status, "invalid");
        assert!(invalid.subject_identity.is_none());
    }
}
