//! Page effect configuration.
//!
//! Every field has a default so a page can override only what it needs:
//!
//! ```json
//! { "typewriter": { "phrases": ["hello", "world"] } }
//! ```

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::types::Millis;

/// Top-level configuration for all three effects.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FxConfig {
    pub pointer: PointerConfig,
    pub typewriter: TypewriterConfig,
    pub reveal: RevealConfig,
}

/// Cursor glow settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    /// CSS selector of the element that follows the pointer.
    pub selector: String,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            selector: ".cursor-glow".to_string(),
        }
    }
}

/// Typewriter settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    /// CSS selector of the element whose text is animated.
    pub selector: String,
    /// Phrases typed in order, wrapping after the last.
    pub phrases: Vec<String>,
    /// Delay between typing ticks (default: 150).
    pub type_interval_ms: Millis,
    /// Delay between deleting ticks (default: 75).
    pub delete_interval_ms: Millis,
    /// Hold time once a phrase is fully typed (default: 2000).
    pub dwell_ms: Millis,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            selector: ".typewriter".to_string(),
            phrases: vec!["hello, world".to_string()],
            type_interval_ms: Millis(150),
            delete_interval_ms: Millis(75),
            dwell_ms: Millis(2000),
        }
    }
}

/// Reveal-on-scroll settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// CSS selector matching every reveal candidate at startup.
    pub selector: String,
    /// Class added once an element is revealed.
    pub shown_class: String,
    /// Minimum visible fraction of the element (default: 0.15).
    pub threshold: f32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selector: ".hidden".to_string(),
            shown_class: "show".to_string(),
            threshold: 0.15,
        }
    }
}

impl FxConfig {
    /// Parse a config from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: FxConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replace the phrase list, keeping every other setting.
    pub fn with_phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.typewriter.phrases = phrases.into_iter().map(Into::into).collect();
        self
    }

    /// This config if it validates, otherwise the defaults. The rejection
    /// is logged.
    pub fn or_default(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(err) => {
                log::warn!("invalid config, using defaults: {}", err);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let tw = &self.typewriter;
        if tw.phrases.is_empty() {
            return Err(ConfigError::NoPhrases);
        }
        if tw.type_interval_ms == Millis::ZERO {
            return Err(ConfigError::ZeroInterval { field: "type_interval_ms" });
        }
        if tw.delete_interval_ms == Millis::ZERO {
            return Err(ConfigError::ZeroInterval { field: "delete_interval_ms" });
        }
        let t = self.reveal.threshold;
        if !(0.0..=1.0).contains(&t) {
            return Err(ConfigError::ThresholdOutOfRange(t));
        }
        Ok(())
    }
}
