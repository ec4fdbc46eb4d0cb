//! Display formatting for terminal output
//!
//! Lists render as tables; single entities render as aligned detail blocks.

pub mod budget;
pub mod category;
pub mod notification;
pub mod transaction;

pub use budget::{format_budget_details, format_budget_list};
pub use category::{format_category_details, format_category_tree};
pub use notification::{format_notification_list, format_toast};
pub use transaction::{format_transaction_details, format_transaction_list};

/// Truncate a string to at most `max_len` characters, with an ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer description", 10), "a longe...");
        assert_eq!(truncate("abcdef", 2), "..");
        assert_eq!(truncate("café au lait", 7), "café...");
    }
}
