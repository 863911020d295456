//! Console configuration.
//!
//! The hosting page can inject settings through `<meta name="oims:*">` tags
//! or a `window.__OIMS_CONFIG__` object; anything missing falls back to the
//! defaults below.

use wasm_bindgen::JsCast;

use crate::services::logging::LogLevel;

/// Notification poll interval: five minutes
pub const DEFAULT_REFRESH_INTERVAL_MS: u32 = 300_000;

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    /// Backend origin, e.g. `https://oims.example.org`; empty means same origin
    pub api_url: String,
    pub refresh_interval_ms: u32,
    pub page_size: usize,
    pub log_level: LogLevel,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            page_size: shared::pagination::DEFAULT_PAGE_SIZE,
            log_level: LogLevel::Info,
        }
    }
}

impl ConsoleConfig {
    /// Load configuration (priority order):
    /// 1. `<meta name="oims:...">` tags
    /// 2. `window.__OIMS_CONFIG__`
    /// 3. defaults, with the API at the current origin
    pub fn load() -> Self {
        let mut config = Self::default();
        let lookup = |meta: &str, js: &str| -> Option<String> {
            web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| get_meta_content(&d, meta))
                .filter(|v| !v.trim().is_empty())
                .or_else(|| get_js_config(js))
        };

        if let Some(url) = lookup("oims:api-url", "api_url") {
            config.api_url = url;
        }
        config.apply("refresh_interval_ms", lookup("oims:refresh-ms", "refresh_interval_ms"));
        config.apply("page_size", lookup("oims:page-size", "page_size"));
        config.apply("log_level", lookup("oims:log-level", "log_level"));

        if config.api_url.is_empty() {
            config.api_url = web_sys::window()
                .and_then(|w| w.location().origin().ok())
                .unwrap_or_else(|| "http://localhost:8080".to_string());
        }

        config
    }

    /// Apply one raw override; unparseable values leave the default in place
    fn apply(&mut self, key: &str, raw: Option<String>) {
        let Some(raw) = raw else { return };
        let raw = raw.trim();
        match key {
            "refresh_interval_ms" => {
                if let Ok(ms) = raw.parse::<u32>() {
                    if ms > 0 {
                        self.refresh_interval_ms = ms;
                    }
                }
            }
            "page_size" => {
                if let Ok(size) = raw.parse::<usize>() {
                    if size > 0 {
                        self.page_size = size;
                    }
                }
            }
            "log_level" => {
                if let Some(level) = LogLevel::parse(raw) {
                    self.log_level = level;
                }
            }
            _ => {}
        }
    }
}

fn get_meta_content(document: &web_sys::Document, name: &str) -> Option<String> {
    let selector = format!("meta[name=\"{}\"]", name);
    document
        .query_selector(&selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web_sys::HtmlMetaElement>().ok())
        .map(|meta| meta.content())
}

fn get_js_config(key: &str) -> Option<String> {
    let window = web_sys::window()?;
    let config = js_sys::Reflect::get(&window, &"__OIMS_CONFIG__".into()).ok()?;
    if config.is_undefined() || config.is_null() {
        return None;
    }
    let value = js_sys::Reflect::get(&config, &key.into()).ok()?;
    value
        .as_string()
        .or_else(|| value.as_f64().map(|n| n.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_default_config() {
        let config = ConsoleConfig::default();
        assert!(config.api_url.is_empty());
        assert_eq!(config.refresh_interval_ms, 300_000);
        assert_eq!(config.page_size, 5);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[wasm_bindgen_test]
    fn test_overrides_ignore_bad_values() {
        let mut config = ConsoleConfig::default();
        config.apply("refresh_interval_ms", Some("60000".into()));
        config.apply("page_size", Some("0".into()));
        config.apply("log_level", Some("verbose".into()));
        assert_eq!(config.refresh_interval_ms, 60_000);
        assert_eq!(config.page_size, 5);
        assert_eq!(config.log_level, LogLevel::Info);
    }
}
