use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

/// Name used when the environment doesn't say who is chatting.
pub const FALLBACK_USER_NAME: &str = "friend";

pub const DEFAULT_SAVE_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_DICTATION_INTERVAL_MS: u64 = 1000;

/// Everything a chat session needs to start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Name the bot greets the user with.
    pub user_name: String,
    /// Where the memory document lives.
    pub memory_path: PathBuf,
    pub save_interval_secs: u64,
    /// Endpoint polled for dictated sentences, if any.
    pub dictation_url: Option<Url>,
    pub dictation_interval_ms: u64,
    /// Seed for synonym selection. Random when absent.
    pub seed: Option<u64>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        ChatConfig {
            user_name: default_user_name(),
            memory_path: default_memory_path(),
            save_interval_secs: DEFAULT_SAVE_INTERVAL_SECS,
            dictation_url: None,
            dictation_interval_ms: DEFAULT_DICTATION_INTERVAL_MS,
            seed: None,
        }
    }
}

/// The login name from `USER` or `USERNAME`.
pub fn default_user_name() -> String {
    ["USER", "USERNAME"]
        .into_iter()
        .filter_map(|variable| std::env::var(variable).ok())
        .find(|name| !name.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_USER_NAME.to_string())
}

/// `vat/memory.json` under the platform data directory.
pub fn default_memory_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vat")
        .join("memory.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ChatConfig::default();
        assert!(!config.user_name.is_empty());
        assert!(config.memory_path.ends_with("vat/memory.json"));
        assert_eq!(config.save_interval_secs, 5);
        assert_eq!(config.dictation_interval_ms, 1000);
        assert_eq!(config.dictation_url, None);
    }

    #[test]
    fn serializes_as_json() {
        let config = ChatConfig {
            user_name: "Sam".into(),
            memory_path: PathBuf::from("/tmp/memory.json"),
            save_interval_secs: 5,
            dictation_url: Some(Url::parse("http://localhost:8080/dictation").unwrap()),
            dictation_interval_ms: 1000,
            seed: Some(7),
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"dictation_url\":\"http://localhost:8080/dictation\""));
        assert_eq!(serde_json::from_str::<ChatConfig>(&json).unwrap(), config);
    }
}
