use thiserror::Error;

use crate::pairing::AnchorId;

pub type Result<T> = std::result::Result<T, AnchorError>;

/// Configuration errors detected while building an [`AnchorSet`](crate::AnchorSet).
///
/// Every variant is raised at construction time; evaluation never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnchorError {
    #[error("section/bullet count mismatch: {sections} sections, {bullets} bullets")]
    CountMismatch { sections: usize, bullets: usize },

    #[error("duplicate {kind} anchor id: {id}")]
    DuplicateId { kind: ElementKind, id: AnchorId },

    #[error("section anchor id has no matching bullet: {id}")]
    UnmatchedSection { id: AnchorId },
}

/// Which side of the pairing an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Section,
    Bullet,
}

impl core::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Section => f.write_str("section"),
            Self::Bullet => f.write_str("bullet"),
        }
    }
}
