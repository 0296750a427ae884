#![forbid(unsafe_code)]

//! Construction-time configuration for an [`AnchorSet`](crate::AnchorSet).

use serde::{Deserialize, Serialize};

/// How the current section is chosen on each evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionPolicy {
    /// Smallest distance wins; some section is always current (if any exist).
    Nearest,
    /// Region closest to the viewport center by screen position wins, with
    /// separate enter/leave thresholds at the first and last section and
    /// scroll-next toggling.
    #[default]
    EdgeAware,
}

/// Where the bullets come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BulletSource {
    /// Existing bullet elements in document order, each with an optional
    /// explicit anchor id.
    Elements(Vec<Option<String>>),
    /// One bullet synthesized per section, carrying the section's id.
    Synthesized,
}

impl Default for BulletSource {
    fn default() -> Self {
        Self::Elements(Vec::new())
    }
}

/// Shape of the page an anchor set is built from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorSetConfig {
    /// Sections in document order, each with an optional explicit anchor id.
    pub sections: Vec<Option<String>>,
    /// Bullets paired with the sections.
    pub bullets: BulletSource,
    /// Whether the page has a scroll-next control.
    pub scroll_next: bool,
    /// Selection policy.
    pub policy: SelectionPolicy,
}

impl AnchorSetConfig {
    /// `count` sections and `count` bullets, all positionally identified.
    #[must_use]
    pub fn positional(count: usize) -> Self {
        Self {
            sections: vec![None; count],
            bullets: BulletSource::Elements(vec![None; count]),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_scroll_next(mut self, enabled: bool) -> Self {
        self.scroll_next = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_policy_is_edge_aware() {
        assert_eq!(SelectionPolicy::default(), SelectionPolicy::EdgeAware);
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: AnchorSetConfig =
            serde_json::from_str(r#"{"sections":[null,"faq"],"bullets":"synthesized"}"#).unwrap();
        assert_eq!(
            config,
            AnchorSetConfig {
                sections: vec![None, Some("faq".into())],
                bullets: BulletSource::Synthesized,
                scroll_next: false,
                policy: SelectionPolicy::EdgeAware,
            }
        );
    }

    #[test]
    fn policy_names_are_kebab_case() {
        let policy: SelectionPolicy = serde_json::from_str(r#""nearest""#).unwrap();
        assert_eq!(policy, SelectionPolicy::Nearest);
        assert_eq!(
            serde_json::to_string(&SelectionPolicy::EdgeAware).unwrap(),
            r#""edge-aware""#
        );
    }

    #[test]
    fn positional_builder() {
        let config = AnchorSetConfig::positional(3)
            .with_policy(SelectionPolicy::Nearest)
            .with_scroll_next(true);
        assert_eq!(config.sections.len(), 3);
        assert_eq!(config.bullets, BulletSource::Elements(vec![None; 3]));
        assert!(config.scroll_next);
    }
}
