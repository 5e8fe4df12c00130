//! Application configuration. API credentials, model identifiers, paths.

use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMELINE_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_OUTPUT_DIR: &str = "./output";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Gemini API key. Read from THEN_NOW_API_KEY, falling back to GEMINI_API_KEY then API_KEY.
    #[serde(default)]
    pub api_key: Option<String>,

    /// API base URL. Read from THEN_NOW_API_URL.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Model for search-grounded timeline generation. Read from THEN_NOW_TIMELINE_MODEL.
    #[serde(default)]
    pub timeline_model: Option<String>,

    /// Model for image editing. Read from THEN_NOW_IMAGE_MODEL.
    #[serde(default)]
    pub image_model: Option<String>,

    /// Where edited images are written. Read from THEN_NOW_OUTPUT_DIR.
    #[serde(default)]
    pub output_dir: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("THEN_NOW"));
        if let Ok(path) = std::env::var("THEN_NOW_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let cfg: Self = c.build()?.try_deserialize()?;
        Ok(cfg)
    }

    /// Returns the API key if configured. Blank values count as unset.
    pub fn api_key(&self) -> Option<String> {
        resolve_api_key(
            self.api_key.clone(),
            std::env::var("GEMINI_API_KEY").ok(),
            std::env::var("API_KEY").ok(),
        )
    }

    pub fn api_url_or_default(&self) -> String {
        self.api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    pub fn timeline_model_or_default(&self) -> String {
        self.timeline_model
            .clone()
            .unwrap_or_else(|| DEFAULT_TIMELINE_MODEL.to_string())
    }

    pub fn image_model_or_default(&self) -> String {
        self.image_model
            .clone()
            .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string())
    }

    pub fn output_dir_or_default(&self) -> String {
        self.output_dir
            .clone()
            .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string())
    }

    /// Returns true if a real model backend can be used (API key present).
    pub fn is_ai_configured(&self) -> bool {
        self.api_key().is_some()
    }
}

/// First non-blank key among: explicit config, GEMINI_API_KEY, API_KEY.
fn resolve_api_key(
    configured: Option<String>,
    gemini_env: Option<String>,
    generic_env: Option<String>,
) -> Option<String> {
    [configured, gemini_env, generic_env]
        .into_iter()
        .flatten()
        .find(|k| !k.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.api_url_or_default(), DEFAULT_API_URL);
        assert_eq!(cfg.timeline_model_or_default(), "gemini-2.5-flash");
        assert_eq!(cfg.image_model_or_default(), "gemini-2.5-flash-image");
        assert_eq!(cfg.output_dir_or_default(), "./output");
    }

    #[test]
    fn test_explicit_values_win() {
        let cfg = AppConfig {
            api_key: Some("k".to_string()),
            timeline_model: Some("gemini-2.5-pro".to_string()),
            ..AppConfig::default()
        };
        assert_eq!(cfg.api_key().as_deref(), Some("k"));
        assert!(cfg.is_ai_configured());
        assert_eq!(cfg.timeline_model_or_default(), "gemini-2.5-pro");
    }

    #[test]
    fn test_blank_key_is_unset() {
        assert_eq!(resolve_api_key(Some("  ".to_string()), None, None), None);
        assert_eq!(resolve_api_key(None, Some(String::new()), None), None);
    }

    #[test]
    fn test_key_precedence_skips_blanks() {
        let key = |s: &str| Some(s.to_string());
        assert_eq!(
            resolve_api_key(key(" "), key("gemini"), key("generic")).as_deref(),
            Some("gemini")
        );
        assert_eq!(
            resolve_api_key(None, key(""), key("generic")).as_deref(),
            Some("generic")
        );
        assert_eq!(
            resolve_api_key(key("cfg"), key("gemini"), None).as_deref(),
            Some("cfg")
        );
    }
}
