use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vat_chat::{
    ChatConfig, Dictation, HttpDictation, JsonFileStore, Session, SimulatedHost, VatCli,
    completion_channel,
};

#[tokio::main]
pub async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ChatConfig::from(VatCli::parse());
    let (sender, mut completions) = completion_channel();
    let store = JsonFileStore::new(&config.memory_path);
    let mut session = Session::open(&config, SimulatedHost::demo(), store, sender)?;
    let mut dictation = config.dictation_url.clone().map(HttpDictation::new);

    println!(
        "Hello {}! Type \"help\" to see what I can do.",
        session.user_name()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut save = tokio::time::interval(Duration::from_secs(config.save_interval_secs.max(1)));
    let mut listen =
        tokio::time::interval(Duration::from_millis(config.dictation_interval_ms.max(1)));
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::info!("end of input");
                    break;
                };
                println!("{}", session.say(&line));
            }
            Some(event) = completions.recv() => {
                if let Some(text) = session.complete(&event) {
                    println!("{text}");
                }
            }
            _ = save.tick() => {
                session.persist();
            }
            _ = listen.tick(), if dictation.is_some() => {
                if let Some(source) = dictation.as_mut() {
                    match source.poll().await {
                        Ok(Some(sentence)) => {
                            println!("> {sentence}");
                            println!("{}", session.say(&sentence));
                        }
                        Ok(None) => {}
                        Err(error) => tracing::warn!(%error, "dictation poll failed"),
                    }
                }
            }
            _ = &mut shutdown => {
                tracing::info!("CTRL-C received; shutting down");
                break;
            }
        }

        if session.is_closed() {
            break;
        }
    }

    while let Ok(event) = completions.try_recv() {
        if let Some(text) = session.complete(&event) {
            println!("{text}");
        }
    }
    if session.persist() {
        tracing::info!(path = %session.store().path().display(), "memory saved");
    }
    Ok(())
}
