//! Configuration management for the textbook reader

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{ReaderError, Result};
use crate::reader::ReadingSettings;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub library: LibraryConfig,
    pub reader: ReadingSettings,
    pub assistant: AssistantConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LibraryConfig {
    /// Catalog JSON to load instead of the bundled sample library
    pub catalog_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    pub resource_delay_ms: u64,
    pub explanation_delay_ms: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        AssistantConfig {
            resource_delay_ms: 1000,
            explanation_delay_ms: 800,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build a config from a variable lookup; unset variables keep defaults
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let reader = ReadingSettings {
            font_size: parse_var(&var, "READER_FONT_SIZE")?.unwrap_or(defaults.reader.font_size),
            font_family: parse_var(&var, "READER_FONT_FAMILY")?
                .unwrap_or(defaults.reader.font_family),
            line_height: parse_var(&var, "READER_LINE_HEIGHT")?
                .unwrap_or(defaults.reader.line_height),
            theme: parse_var(&var, "READER_THEME")?.unwrap_or(defaults.reader.theme),
            page_layout: parse_var(&var, "READER_LAYOUT")?.unwrap_or(defaults.reader.page_layout),
            fullscreen: defaults.reader.fullscreen,
        }
        .normalized();

        Ok(Config {
            library: LibraryConfig {
                catalog_path: var("LIBRARY_PATH")
                    .filter(|p| !p.trim().is_empty())
                    .map(PathBuf::from),
            },
            reader,
            assistant: AssistantConfig {
                resource_delay_ms: parse_var(&var, "ASSISTANT_RESOURCE_DELAY_MS")?
                    .unwrap_or(defaults.assistant.resource_delay_ms),
                explanation_delay_ms: parse_var(&var, "ASSISTANT_EXPLANATION_DELAY_MS")?
                    .unwrap_or(defaults.assistant.explanation_delay_ms),
            },
        })
    }
}

fn parse_var<T, F>(var: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| ReaderError::Config(format!("{}={:?}: {}", key, raw, e))),
        None => Ok(None),
    }
}
