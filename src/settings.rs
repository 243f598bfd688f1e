//! API settings persisted under the user's config directory.
//!
//! The key is base64-encoded at rest and lives decoded in memory; a stored
//! key that fails to decode is discarded rather than carried through.

use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_key: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub selected_model: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub selected_answer_model: String,
}

fn settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("turtle-soup")
        .join("settings.json")
}

pub fn save_to_path(settings: &Settings, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }

    let mut on_disk = settings.clone();
    if !on_disk.api_key.is_empty() {
        on_disk.api_key = base64::engine::general_purpose::STANDARD.encode(on_disk.api_key.as_bytes());
    }

    let json = serde_json::to_string_pretty(&on_disk).map_err(|e| e.to_string())?;
    fs::write(path, json).map_err(|e| format!("Failed to save settings: {}", e))?;
    Ok(())
}

pub fn load_from_path(path: &Path) -> Settings {
    if path.exists() {
        if let Ok(content) = fs::read_to_string(path) {
            if let Ok(mut settings) = serde_json::from_str::<Settings>(&content) {
                if !settings.api_key.is_empty() {
                    settings.api_key = decode_key(&settings.api_key);
                }
                return settings;
            }
        }
    }
    Settings::default()
}

fn decode_key(encoded: &str) -> String {
    match base64::engine::general_purpose::STANDARD.decode(encoded.as_bytes()) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(key) => key,
            Err(_) => {
                eprintln!("[settings] stored API key is not valid UTF-8, discarding");
                String::new()
            }
        },
        Err(e) => {
            eprintln!("[settings] failed to decode stored API key: {}", e);
            String::new()
        }
    }
}

pub fn save(settings: &Settings) -> Result<(), String> {
    save_to_path(settings, &settings_path())
}

pub fn load() -> Settings {
    load_from_path(&settings_path())
}
