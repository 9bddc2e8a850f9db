//! Output rendering for the CLI.
//!
//! Records print as pretty JSON on stdout. Logs go to stderr.

use serde::Serialize;
use shift_core::Strategy;

/// Pretty JSON for any record.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Print `value` as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", to_json(value)?);
    Ok(())
}

/// The resolved fan-out, one flag per line.
pub fn strategy_lines(strategy: &Strategy) -> String {
    let next = strategy
        .mode
        .next()
        .map_or_else(|| "-".to_string(), |m| m.to_string());
    format!(
        "mode:    {}\nread_a:  {}\nread_b:  {}\nwrite_a: {}\nwrite_b: {}\nnext:    {}",
        strategy.mode, strategy.read_a, strategy.read_b, strategy.write_a, strategy.write_b, next
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shift_core::MigrationMode;

    #[test]
    fn test_strategy_lines() {
        let out = strategy_lines(&Strategy::resolve(MigrationMode::DoubleWrite, false));
        assert_eq!(
            out,
            "mode:    double_write\nread_a:  true\nread_b:  false\nwrite_a: true\nwrite_b: true\nnext:    read_migration"
        );
    }

    #[test]
    fn test_strategy_lines_last_mode() {
        let out = strategy_lines(&Strategy::resolve(MigrationMode::DestinationOnly, false));
        assert!(out.ends_with("next:    -"));
    }

    #[test]
    fn test_to_json_flattens_feed_post() {
        use chrono::{TimeZone, Utc};
        use shift_core::{FeedPost, Post};

        let post = Post {
            id: "p1".to_string(),
            user_id: "u1".to_string(),
            title: "T".to_string(),
            content: "C".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        };
        let json = to_json(&FeedPost::new(post, None, 0)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["id"], "p1");
        assert_eq!(value["author_name"], "Unknown");
        assert_eq!(value["author_post_count"], 0);
    }
}
