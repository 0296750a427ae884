#![forbid(unsafe_code)]

//! Selector-level configuration accepted from JavaScript as JSON.

use anchor_scroll_core::SelectionPolicy;
use serde::Deserialize;
use thiserror::Error;
use web_time::Duration;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid anchor scroll config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("empty value for `{field}`")]
    EmptyValue { field: &'static str },
}

/// Page wiring for one anchor set.
///
/// Shape (all keys optional):
/// ```json
/// { "sections": ".section", "bullets": ".anchor-bullet", "wrap": "#nav",
///   "scrollNext": "#scroll-next", "policy": "edge-aware", "throttleMs": 100 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct AnchorScrollConfig {
    /// Selector for the tracked sections, in document order.
    pub sections: String,
    /// Selector for existing bullets. Ignored when `wrap` is set.
    pub bullets: String,
    /// Container that receives one synthesized bullet per section.
    pub wrap: Option<String>,
    /// Control whose visibility follows the edge-aware policy.
    pub scroll_next: Option<String>,
    pub policy: SelectionPolicy,
    /// Minimum spacing of scroll evaluations.
    pub throttle_ms: u32,
    /// Attribute holding an element's explicit anchor id.
    pub anchor_attribute: String,
    /// Class marking the current bullet.
    pub current_class: String,
    /// Class hiding the scroll-next control.
    pub hidden_class: String,
    /// Class put on `wrap` when every section fits on screen.
    pub disable_class: String,
    /// Class given to synthesized bullets.
    pub bullet_class: String,
}

impl Default for AnchorScrollConfig {
    fn default() -> Self {
        Self {
            sections: ".section".to_owned(),
            bullets: ".anchor-bullet".to_owned(),
            wrap: None,
            scroll_next: None,
            policy: SelectionPolicy::default(),
            throttle_ms: 100,
            anchor_attribute: "data-anchor".to_owned(),
            current_class: "current".to_owned(),
            hidden_class: "hidden".to_owned(),
            disable_class: "disable".to_owned(),
            bullet_class: "anchor-bullet".to_owned(),
        }
    }
}

impl AnchorScrollConfig {
    /// Parse and validate a JSON config. An empty string means all defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = if json.trim().is_empty() {
            Self::default()
        } else {
            serde_json::from_str(json)?
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("sections", self.sections.as_str()),
            ("bullets", self.bullets.as_str()),
            ("anchorAttribute", self.anchor_attribute.as_str()),
            ("currentClass", self.current_class.as_str()),
            ("hiddenClass", self.hidden_class.as_str()),
            ("disableClass", self.disable_class.as_str()),
            ("bulletClass", self.bullet_class.as_str()),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyValue { field });
            }
        }
        for (field, value) in [("wrap", &self.wrap), ("scrollNext", &self.scroll_next)] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(ConfigError::EmptyValue { field });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn throttle_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.throttle_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_input_is_default() {
        assert_eq!(
            AnchorScrollConfig::from_json("  ").unwrap(),
            AnchorScrollConfig::default()
        );
        assert_eq!(
            AnchorScrollConfig::from_json("{}").unwrap(),
            AnchorScrollConfig::default()
        );
    }

    #[test]
    fn camel_case_keys() {
        let config = AnchorScrollConfig::from_json(
            r##"{"sections":".panel","scrollNext":"#scroll-next","policy":"nearest","throttleMs":50}"##,
        )
        .unwrap();
        assert_eq!(config.sections, ".panel");
        assert_eq!(config.bullets, ".anchor-bullet");
        assert_eq!(config.scroll_next.as_deref(), Some("#scroll-next"));
        assert_eq!(config.policy, SelectionPolicy::Nearest);
        assert_eq!(config.throttle_interval(), Duration::from_millis(50));
    }

    #[test]
    fn unknown_key_rejected() {
        let err = AnchorScrollConfig::from_json(r#"{"section":".typo"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn empty_selector_rejected() {
        let err = AnchorScrollConfig::from_json(r#"{"wrap":" "}"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyValue { field: "wrap" }));
        let err = AnchorScrollConfig::from_json(r#"{"sections":""}"#).unwrap_err();
        assert_eq!(err.to_string(), "empty value for `sections`");
    }
}
