use serde::Deserialize;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::clock::Clock;
use crate::internal_error::{InternalError, InternalResult};
use crate::storage::Storage;

pub type SharedStorage = Arc<Mutex<dyn Storage + Send>>;
pub type SharedClock = Arc<dyn Clock + Send + Sync>;

pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Settings read from `Rocket.toml` / `ROCKET_*` alongside rocket's own.
#[derive(Deserialize, Debug, Clone)]
pub struct AppConfig {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default)]
    pub web_root: Option<String>,
}

fn default_database() -> String {
    "rgoals.db".to_string()
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Trims `title` and checks it is non-empty and within `MAX_TITLE_LEN` characters.
pub fn validate_title(title: &str) -> InternalResult<String> {
    let title = title.trim();

    if title.is_empty() {
        return Err(InternalError::validation("title is required"));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(InternalError::validation(format!(
            "title must be at most {} characters",
            MAX_TITLE_LEN
        )));
    }

    Ok(title.to_string())
}

pub fn validate_description(description: Option<String>) -> InternalResult<Option<String>> {
    match description {
        Some(d) if d.chars().count() > MAX_DESCRIPTION_LEN => Err(InternalError::validation(
            format!("description must be at most {} characters", MAX_DESCRIPTION_LEN),
        )),
        Some(d) if d.trim().is_empty() => Ok(None),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_are_trimmed_and_bounded() {
        assert_eq!(validate_title("  Run  ").unwrap(), "Run");
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"x".repeat(MAX_TITLE_LEN)).is_ok());
        assert!(validate_title(&"x".repeat(MAX_TITLE_LEN + 1)).is_err());
    }

    #[test]
    fn blank_description_is_dropped() {
        assert_eq!(validate_description(Some("  ".into())).unwrap(), None);
        assert!(validate_description(Some("d".repeat(MAX_DESCRIPTION_LEN + 1))).is_err());
    }
}
