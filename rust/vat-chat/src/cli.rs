use std::path::PathBuf;

use clap::Parser;
use url::Url;

use crate::config::{
    ChatConfig, DEFAULT_DICTATION_INTERVAL_MS, DEFAULT_SAVE_INTERVAL_SECS, default_memory_path,
    default_user_name,
};

#[derive(Debug, Parser)]
#[command(name = "vat")]
#[command(bin_name = "vat")]
#[command(about = "Chat with a virtual modelling assistant", long_about = None)]
pub struct VatCli {
    /// How the assistant addresses you
    #[arg(long, env = "VAT_USER_NAME")]
    pub user_name: Option<String>,

    /// JSON file the conversation memory is kept in
    #[arg(long = "memory", env = "VAT_MEMORY")]
    pub memory_path: Option<PathBuf>,

    #[arg(long, default_value_t = DEFAULT_SAVE_INTERVAL_SECS)]
    pub save_interval_secs: u64,

    /// Endpoint that returns one dictated sentence per request
    #[arg(long, env = "VAT_DICTATION_URL")]
    pub dictation_url: Option<Url>,

    #[arg(long, default_value_t = DEFAULT_DICTATION_INTERVAL_MS)]
    pub dictation_interval_ms: u64,

    /// Make the assistant's wording reproducible
    #[arg(long)]
    pub seed: Option<u64>,
}

impl From<VatCli> for ChatConfig {
    fn from(cli: VatCli) -> Self {
        ChatConfig {
            user_name: cli.user_name.unwrap_or_else(default_user_name),
            memory_path: cli.memory_path.unwrap_or_else(default_memory_path),
            save_interval_secs: cli.save_interval_secs,
            dictation_url: cli.dictation_url,
            dictation_interval_ms: cli.dictation_interval_ms,
            seed: cli.seed,
        }
    }
}
