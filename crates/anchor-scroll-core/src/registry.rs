#![forbid(unsafe_code)]

//! Host-owned registry of active anchor sets.
//!
//! The embedding application owns one [`AnchorScrollContext`] and forwards its
//! page events to it. Sets are only ever appended; each evaluation is local to
//! its set, so one misconfigured set never affects another.

use crate::anchor_set::AnchorSet;
use crate::config::AnchorSetConfig;
use crate::error::Result;
use crate::host::ScrollHost;

#[cfg(feature = "tracing")]
use crate::logging::{trace, warn};
#[cfg(not(feature = "tracing"))]
use crate::{trace, warn};

/// Handle to a set registered in an [`AnchorScrollContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnchorSetId(usize);

impl AnchorSetId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Append-only collection of anchor sets sharing one page.
#[derive(Debug)]
pub struct AnchorScrollContext<H> {
    sets: Vec<AnchorSet<H>>,
}

impl<H> Default for AnchorScrollContext<H> {
    fn default() -> Self {
        Self { sets: Vec::new() }
    }
}

impl<H: ScrollHost> AnchorScrollContext<H> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and register a set. A rejected configuration leaves the context
    /// unchanged.
    ///
    /// # Errors
    ///
    /// See [`AnchorSet::create`].
    pub fn create(&mut self, config: AnchorSetConfig, host: H) -> Result<AnchorSetId> {
        match AnchorSet::create(config, host) {
            Ok(set) => Ok(self.register(set)),
            Err(err) => {
                warn!(error = %err, "anchor set rejected");
                Err(err)
            }
        }
    }

    /// Register an already-built set.
    pub fn register(&mut self, set: AnchorSet<H>) -> AnchorSetId {
        let id = AnchorSetId(self.sets.len());
        self.sets.push(set);
        id
    }

    /// Handle of the set at registration position `index`.
    #[must_use]
    pub fn id_at(&self, index: usize) -> Option<AnchorSetId> {
        (index < self.sets.len()).then_some(AnchorSetId(index))
    }

    #[must_use]
    pub fn get(&self, id: AnchorSetId) -> Option<&AnchorSet<H>> {
        self.sets.get(id.0)
    }

    pub fn get_mut(&mut self, id: AnchorSetId) -> Option<&mut AnchorSet<H>> {
        self.sets.get_mut(id.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnchorSet<H>> {
        self.sets.iter()
    }

    /// Re-evaluate every set.
    pub fn find_current_all(&mut self) {
        trace!(sets = self.sets.len(), "re-evaluating anchor sets");
        for set in &mut self.sets {
            set.find_current();
        }
    }

    /// Initial evaluation once the page has loaded.
    pub fn on_load(&mut self) {
        for set in &mut self.sets {
            set.find_current();
            set.check_all_on_screen();
        }
    }

    /// Page scrolled (already rate-limited by the caller).
    pub fn on_scroll(&mut self) {
        self.find_current_all();
    }

    /// Layout of the page changed without a scroll.
    pub fn on_layout_change(&mut self) {
        self.find_current_all();
    }

    /// Viewport resized: section geometry and the fits-on-screen check may
    /// both have changed.
    pub fn on_resize(&mut self) {
        for set in &mut self.sets {
            set.check_all_on_screen();
            set.find_current();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BulletSource;
    use crate::error::AnchorError;
    use crate::host::StaticPage;

    #[test]
    fn rejected_set_not_registered() {
        let mut ctx = AnchorScrollContext::new();
        let bad = AnchorSetConfig {
            sections: vec![None, None],
            bullets: BulletSource::Elements(vec![None]),
            ..AnchorSetConfig::default()
        };
        let err = ctx.create(bad, StaticPage::uniform(800.0, 800.0, 2));
        assert!(matches!(err, Err(AnchorError::CountMismatch { .. })));
        assert!(ctx.is_empty());

        let id = ctx
            .create(AnchorSetConfig::positional(2), StaticPage::uniform(800.0, 800.0, 2))
            .unwrap();
        assert_eq!(id.index(), 0);
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn scroll_reaches_every_set() {
        let mut ctx = AnchorScrollContext::new();
        let mut ids = Vec::new();
        for count in [2, 3] {
            let mut page = StaticPage::uniform(800.0, 800.0, count);
            page.set_scroll_offset(800.0);
            ids.push(
                ctx.create(AnchorSetConfig::positional(count), page)
                    .unwrap(),
            );
        }
        ctx.on_scroll();
        // Two sections: section 1 is last and the center is inside it.
        assert_eq!(ctx.get(ids[0]).unwrap().current_index(), Some(1));
        assert_eq!(ctx.get(ids[1]).unwrap().current_index(), Some(1));
    }

    #[test]
    fn load_checks_fit_and_selects() {
        let mut ctx = AnchorScrollContext::new();
        let id = ctx
            .create(AnchorSetConfig::positional(3), StaticPage::uniform(800.0, 100.0, 3))
            .unwrap();
        ctx.on_load();
        let set = ctx.get(id).unwrap();
        assert!(set.is_navigation_disabled());
        // Center sits 100px below the last section: within the H/4 band.
        assert_eq!(set.current_index(), Some(2));
    }

    #[test]
    fn resize_rechecks_fit() {
        let mut ctx = AnchorScrollContext::new();
        let id = ctx
            .create(AnchorSetConfig::positional(3), StaticPage::uniform(800.0, 600.0, 3))
            .unwrap();
        ctx.on_load();
        assert!(!ctx.get(id).unwrap().is_navigation_disabled());

        let set = ctx.get_mut(id).unwrap();
        let mut viewport = set.host().viewport_metrics();
        viewport.viewport_height = 2000.0;
        set.host_mut().set_viewport(viewport);
        ctx.on_resize();
        assert!(ctx.get(id).unwrap().is_navigation_disabled());
    }

    #[test]
    fn unknown_id_is_none() {
        let mut ctx = AnchorScrollContext::new();
        ctx.create(AnchorSetConfig::positional(1), StaticPage::uniform(800.0, 800.0, 1))
            .unwrap();
        assert!(ctx.get(AnchorSetId(3)).is_none());
        assert_eq!(ctx.id_at(0), Some(AnchorSetId(0)));
        assert_eq!(ctx.id_at(1), None);
    }
}
