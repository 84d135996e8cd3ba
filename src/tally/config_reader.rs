use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use vote_classifier::sample::DEFAULT_SEED;

use crate::tally::*;

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;
pub const DEFAULT_CHATBOT_URL: &str = "http://127.0.0.1:5000/procesar";
pub const DEFAULT_CHATBOT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_SAMPLE_SIZE: usize = 10;
pub const DEFAULT_TOP_WORDS: usize = 20;

pub const BIND_ENV: &str = "VOTE_TALLY_BIND";
pub const CHATBOT_URL_ENV: &str = "VOTE_TALLY_CHATBOT_URL";

/// The content of the optional JSON settings file.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub bind: Option<String>,
    #[serde(rename = "maxUploadBytes")]
    pub max_upload_bytes: Option<usize>,
    #[serde(rename = "chatbotUrl")]
    pub chatbot_url: Option<String>,
    #[serde(rename = "chatbotTimeoutSeconds")]
    pub chatbot_timeout_seconds: Option<u64>,
    #[serde(rename = "sampleSize")]
    pub sample_size: Option<usize>,
    #[serde(rename = "sampleSeed")]
    pub sample_seed: Option<u32>,
    #[serde(rename = "topWords")]
    pub top_words: Option<usize>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ServiceConfig {
    pub bind: String,
    pub max_upload_bytes: usize,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ChatbotConfig {
    pub url: String,
    pub timeout: Duration,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ReportConfig {
    pub sample_size: usize,
    pub seed: u32,
    pub top_words: usize,
    pub chatbot: ChatbotConfig,
}

pub fn read_settings(path: &str) -> TallyResult<Settings> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let settings: Settings =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    info!("settings: {:?}", settings);
    Ok(settings)
}

/// Reads the settings file if one is given, otherwise all the defaults apply.
pub fn load_settings(path: Option<&str>) -> TallyResult<Settings> {
    match path {
        Some(p) => read_settings(p),
        None => Ok(Settings::default()),
    }
}

fn env_override(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Settings {
    /// Precedence: command line, then environment, then settings file, then defaults.
    pub fn service_config(&self, bind_arg: Option<&str>) -> ServiceConfig {
        let bind = bind_arg
            .map(|s| s.to_string())
            .or_else(|| env_override(BIND_ENV))
            .or_else(|| self.bind.clone())
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        ServiceConfig {
            bind,
            max_upload_bytes: self.max_upload_bytes.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
        }
    }

    pub fn chatbot_config(&self) -> ChatbotConfig {
        ChatbotConfig {
            url: env_override(CHATBOT_URL_ENV)
                .or_else(|| self.chatbot_url.clone())
                .unwrap_or_else(|| DEFAULT_CHATBOT_URL.to_string()),
            timeout: Duration::from_secs(
                self.chatbot_timeout_seconds
                    .unwrap_or(DEFAULT_CHATBOT_TIMEOUT_SECONDS),
            ),
        }
    }

    pub fn report_config(&self, sample_size: Option<usize>, seed: Option<u32>) -> ReportConfig {
        ReportConfig {
            sample_size: sample_size
                .or(self.sample_size)
                .unwrap_or(DEFAULT_SAMPLE_SIZE),
            seed: seed.or(self.sample_seed).unwrap_or(DEFAULT_SEED),
            top_words: self.top_words.unwrap_or(DEFAULT_TOP_WORDS),
            chatbot: self.chatbot_config(),
        }
    }
}
