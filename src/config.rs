use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_POLLINATIONS_BASE: &str = "https://image.pollinations.ai";
pub const DEFAULT_ELEVENLABS_API_BASE: &str = "https://api.elevenlabs.io";
pub const DEFAULT_ELEVENLABS_MODEL: &str = "eleven_turbo_v2";
pub const DEFAULT_VOICE_ID: &str = "Sm1seazb4gs7RSlUVw7c";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("PORT must be a number, got '{0}'")]
    InvalidPort(String),

    #[error("Invalid listen address: {0}")]
    InvalidAddress(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub gemini: GeminiSettings,
    pub pollinations_base: String,
    pub elevenlabs: ElevenLabsSettings,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct ElevenLabsSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub default_voice: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        // Empty credentials count as missing.
        let secret = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port_raw = var("PORT", "3000");
        let port = port_raw
            .parse()
            .map_err(|_| ConfigError::InvalidPort(port_raw.clone()))?;

        Ok(Self {
            host: var("HOST", "0.0.0.0"),
            port,
            static_dir: var("STATIC_DIR", "./static").into(),
            gemini: GeminiSettings {
                api_key: secret("GOOGLE_GEMINI_API_KEY"),
                model: var("GEMINI_IMAGE_MODEL", DEFAULT_GEMINI_IMAGE_MODEL),
                api_base: var("GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE),
            },
            pollinations_base: var("POLLINATIONS_BASE", DEFAULT_POLLINATIONS_BASE),
            elevenlabs: ElevenLabsSettings {
                api_key: secret("ELEVENLABS_API_KEY"),
                model: var("ELEVENLABS_MODEL", DEFAULT_ELEVENLABS_MODEL),
                api_base: var("ELEVENLABS_API_BASE", DEFAULT_ELEVENLABS_API_BASE),
                default_voice: var("DEFAULT_VOICE_ID", DEFAULT_VOICE_ID),
            },
        })
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ConfigError::InvalidAddress(addr))
    }
}
