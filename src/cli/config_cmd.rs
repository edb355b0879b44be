//! Settings CLI commands

use anyhow::Result;
use clap::Subcommand;
use serde_json::{json, Value};

use super::session::Session;
use crate::storage::SettingKey;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current settings, or the effective value of one key
    Get {
        /// Setting key (e.g. truncation.maxLength)
        key: Option<String>,
    },

    /// Update a setting
    Set {
        /// Setting key
        key: String,

        /// Setting value
        value: String,
    },

    /// Reset all settings to defaults, or just one key
    Reset {
        /// Setting key
        key: Option<String>,
    },

    /// List all available setting keys
    ListKeys,
}

pub fn run(cmd: ConfigCommands, session: &Session) -> Result<()> {
    match cmd {
        ConfigCommands::Get { key } => get(session, key.as_deref()),
        ConfigCommands::Set { key, value } => set(session, &key, &value),
        ConfigCommands::Reset { key } => reset(session, key.as_deref()),
        ConfigCommands::ListKeys => list_keys(session),
    }
}

fn get(session: &Session, key: Option<&str>) -> Result<()> {
    let store = session.settings();
    session
        .output
        .verbose_ctx("config", &format!("Reading {}", store.path().display()));
    let settings = store.load()?;

    match key {
        Some(raw) => {
            let key: SettingKey = raw.parse()?;
            let value = key.get(&settings).unwrap_or_else(|| key.default_value());
            session.output.data(&json!({ key.as_str(): value }))
        }
        None => session.output.data(&settings),
    }
}

fn set(session: &Session, raw_key: &str, raw_value: &str) -> Result<()> {
    let key: SettingKey = raw_key.parse()?;
    let store = session.settings();
    let mut settings = store.load()?;

    let value = key.set(&mut settings, raw_value)?;
    store.save(&settings)?;
    session
        .output
        .verbose_ctx("config", &format!("Wrote {}", store.path().display()));

    session.output.data(&json!({ key.as_str(): value }))
}

fn reset(session: &Session, raw_key: Option<&str>) -> Result<()> {
    let key = raw_key.map(str::parse::<SettingKey>).transpose()?;
    session.settings().reset(key)?;

    let reset = key.map_or("all", |k| k.as_str());
    session.output.data(&json!({ "reset": reset }))
}

fn list_keys(session: &Session) -> Result<()> {
    let keys: Vec<Value> = SettingKey::ALL
        .iter()
        .map(|key| {
            json!({
                "key": key.as_str(),
                "description": key.description(),
                "default": key.default_value(),
            })
        })
        .collect();

    session.output.data(&json!({ "keys": keys }))
}
