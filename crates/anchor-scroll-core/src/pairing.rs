#![forbid(unsafe_code)]

//! Anchor ids and the one-shot section/bullet pairing.

use std::collections::HashMap;

use crate::error::{AnchorError, ElementKind, Result};

/// Identity shared by a section and its bullet.
///
/// Either the explicit identifier an element declares, or its positional index
/// rendered as decimal text. Explicit `"2"` therefore pairs with the element at
/// position 2 on the other side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorId(String);

impl AnchorId {
    /// Resolve an element's id from its optional explicit value and position.
    pub fn resolve(explicit: Option<&str>, index: usize) -> Self {
        match explicit {
            Some(id) => Self(id.to_owned()),
            None => Self(index.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for AnchorId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AnchorId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Resolve ids for a whole element sequence, rejecting duplicates.
pub fn resolve_ids(explicit: &[Option<String>], kind: ElementKind) -> Result<Vec<AnchorId>> {
    let mut seen = HashMap::with_capacity(explicit.len());
    let mut ids = Vec::with_capacity(explicit.len());
    for (index, value) in explicit.iter().enumerate() {
        let id = AnchorId::resolve(value.as_deref(), index);
        if seen.insert(id.clone(), index).is_some() {
            return Err(AnchorError::DuplicateId { kind, id });
        }
        ids.push(id);
    }
    Ok(ids)
}

/// Pair sections with bullets by id equality.
///
/// Returns, for each section position, the position of its bullet. Fails when
/// the counts differ or a section id has no bullet; nothing is dropped.
pub fn pair(sections: &[AnchorId], bullets: &[AnchorId]) -> Result<Vec<usize>> {
    if sections.len() != bullets.len() {
        return Err(AnchorError::CountMismatch {
            sections: sections.len(),
            bullets: bullets.len(),
        });
    }
    let by_id: HashMap<&AnchorId, usize> = bullets
        .iter()
        .enumerate()
        .map(|(index, id)| (id, index))
        .collect();
    sections
        .iter()
        .map(|id| {
            by_id
                .get(id)
                .copied()
                .ok_or_else(|| AnchorError::UnmatchedSection { id: id.clone() })
        })
        .collect()
}
