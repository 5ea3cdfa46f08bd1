//! Configuration and credential store for visforge
//!
//! Settings live in ~/.config/visforge/config.json. API keys prefer the
//! system keychain, with environment variables as an override and the
//! config file as a last-resort fallback when no keychain is available.

use keyring::Entry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const KEYRING_SERVICE: &str = "visforge-credentials";
const KEYRING_USERNAME: &str = "default";

const IMAGE_KEY_ENV: &str = "VISFORGE_IMAGE_API_KEY";
const CHAT_KEY_ENV: &str = "VISFORGE_CHAT_API_KEY";

pub const DEFAULT_IMAGE_API_BASE: &str = "https://api.tu-zi.com";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-3-pro-image-preview";
pub const DEFAULT_CHAT_API_BASE: &str = "https://ark.cn-beijing.volces.com/api/v3";
pub const DEFAULT_CHAT_MODEL: &str = "doubao-seed-1-6-251015";

/// Both credentials stored in a single keychain entry so platforms that
/// prompt per entry only prompt once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredCredentials {
    #[serde(skip_serializing_if = "Option::is_none")]
    image_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    chat_api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Plaintext fallback for environments without a keychain.
    pub image_api_key: Option<String>,
    pub chat_api_key: Option<String>,
    #[serde(default = "default_image_api_base")]
    pub image_api_base: String,
    #[serde(default = "default_image_model")]
    pub image_model: String,
    #[serde(default = "default_chat_api_base")]
    pub chat_api_base: String,
    #[serde(default = "default_chat_model")]
    pub chat_model: String,
}

fn default_image_api_base() -> String {
    DEFAULT_IMAGE_API_BASE.to_string()
}

fn default_image_model() -> String {
    DEFAULT_IMAGE_MODEL.to_string()
}

fn default_chat_api_base() -> String {
    DEFAULT_CHAT_API_BASE.to_string()
}

fn default_chat_model() -> String {
    DEFAULT_CHAT_MODEL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_api_key: None,
            chat_api_key: None,
            image_api_base: default_image_api_base(),
            image_model: default_image_model(),
            chat_api_base: default_chat_api_base(),
            chat_model: default_chat_model(),
        }
    }
}

fn keyring_disabled() -> bool {
    if cfg!(test) {
        return true;
    }
    matches!(
        std::env::var("VISFORGE_DISABLE_KEYRING")
            .unwrap_or_default()
            .to_lowercase()
            .as_str(),
        "1" | "true" | "yes"
    )
}

fn keyring_entry() -> Result<Entry, keyring::Error> {
    Entry::new(KEYRING_SERVICE, KEYRING_USERNAME)
}

fn read_keyring_credentials() -> StoredCredentials {
    if keyring_disabled() {
        return StoredCredentials::default();
    }
    let entry = match keyring_entry() {
        Ok(entry) => entry,
        Err(_) => return StoredCredentials::default(),
    };
    match entry.get_password() {
        Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
        Err(_) => StoredCredentials::default(),
    }
}

fn write_keyring_credentials(creds: &StoredCredentials) -> Result<(), String> {
    if keyring_disabled() {
        return Err("keychain disabled".to_string());
    }
    let entry = keyring_entry().map_err(|e| e.to_string())?;
    let json = serde_json::to_string(creds).map_err(|e| e.to_string())?;
    entry.set_password(&json).map_err(|e| e.to_string())
}

impl Config {
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("visforge"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.json"))
    }

    /// Load config from disk, or return default
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if let Ok(content) = fs::read_to_string(&path) {
                match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(err) => {
                        eprintln!(
                            "  Warning: Config file was corrupted ({}). Defaults were loaded.",
                            err
                        );
                    }
                }
            }
        }
        Self::default()
    }

    /// Save config to disk
    pub fn save(&self) -> Result<(), String> {
        let dir =
            Self::config_dir().ok_or_else(|| "Could not determine config directory".to_string())?;
        fs::create_dir_all(&dir).map_err(|e| format!("Failed to create config directory: {}", e))?;

        let path = dir.join("config.json");
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;
        fs::write(&path, content).map_err(|e| format!("Failed to write config: {}", e))
    }

    /// Image-generation key: environment > keychain > config file.
    pub fn image_api_key(&self) -> Option<String> {
        if let Ok(key) = std::env::var(IMAGE_KEY_ENV) {
            if !key.is_empty() {
                return Some(key);
            }
        }
        if let Some(key) = read_keyring_credentials().image_api_key {
            return Some(key);
        }
        self.image_api_key.clone()
    }

    /// Chat-completion key: environment > keychain > config file.
    pub fn chat_api_key(&self) -> Option<String> {
        if let Ok(key) = std::env::var(CHAT_KEY_ENV) {
            if !key.is_empty() {
                return Some(key);
            }
        }
        if let Some(key) = read_keyring_credentials().chat_api_key {
            return Some(key);
        }
        self.chat_api_key.clone()
    }

    /// Both keys must be present for any generation or analysis flow.
    pub fn has_credentials(&self) -> bool {
        self.image_api_key().is_some() && self.chat_api_key().is_some()
    }

    /// Store the image key, preferring the keychain and falling back to the
    /// config file when no keychain is usable.
    pub fn set_image_api_key(&mut self, key: &str) -> Result<(), String> {
        let mut creds = read_keyring_credentials();
        creds.image_api_key = Some(key.to_string());
        if write_keyring_credentials(&creds).is_ok() {
            self.image_api_key = None;
        } else {
            self.image_api_key = Some(key.to_string());
        }
        self.save()
    }

    pub fn set_chat_api_key(&mut self, key: &str) -> Result<(), String> {
        let mut creds = read_keyring_credentials();
        creds.chat_api_key = Some(key.to_string());
        if write_keyring_credentials(&creds).is_ok() {
            self.chat_api_key = None;
        } else {
            self.chat_api_key = Some(key.to_string());
        }
        self.save()
    }

    /// Config file location for display
    pub fn config_location() -> String {
        Self::config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "~/.config/visforge/config.json".to_string())
    }
}

/// Interactive prompt to set up both API keys
pub fn setup_credentials_interactive() -> Result<(), String> {
    use std::io::{self, Write};

    println!();
    println!("  VISFORGE SETUP");
    println!();
    println!("  visforge needs two API keys:");
    println!("  1. An image-generation key (asset rendering)");
    println!("  2. A chat-completion key (request analysis and prompt expansion)");
    println!();

    let mut config = Config::load();

    print!("  Image API key: ");
    io::stdout().flush().map_err(|e| e.to_string())?;
    let mut key = String::new();
    io::stdin().read_line(&mut key).map_err(|e| e.to_string())?;
    let key = key.trim();
    if key.is_empty() {
        return Err("No image API key provided".to_string());
    }
    config.set_image_api_key(key)?;

    print!("  Chat API key: ");
    io::stdout().flush().map_err(|e| e.to_string())?;
    let mut key = String::new();
    io::stdin().read_line(&mut key).map_err(|e| e.to_string())?;
    let key = key.trim();
    if key.is_empty() {
        return Err("No chat API key provided".to_string());
    }
    config.set_chat_api_key(key)?;

    println!();
    println!("  + Credentials saved ({})", Config::config_location());
    println!();
    Ok(())
}
