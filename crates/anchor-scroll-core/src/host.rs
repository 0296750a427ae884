#![forbid(unsafe_code)]

//! The embedding environment as seen by the core.
//!
//! [`ScrollHost`] bundles every collaborator the core does not own: geometry
//! measurement, class toggling, and the animated scroll. Section and bullet
//! indexes always refer to positions in the sequences handed to
//! [`AnchorSet::create`](crate::AnchorSet::create).

use crate::geometry::{RegionMetrics, ViewportMetrics};

/// Measurement and effect surface implemented by the embedding environment.
pub trait ScrollHost {
    /// Current page scroll state.
    fn viewport(&self) -> ViewportMetrics;

    /// Current extent of the section at `section`.
    fn region(&self, section: usize) -> RegionMetrics;

    /// Set or clear the "current" visual state of the bullet at `bullet`.
    fn set_bullet_current(&mut self, bullet: usize, current: bool);

    /// Show or hide the scroll-next control. Only called when one is configured.
    fn set_scroll_next_visible(&mut self, visible: bool);

    /// Flag the whole navigation as disabled (every section fits on screen).
    fn set_navigation_disabled(&mut self, disabled: bool);

    /// Start an animated scroll to `top`. Fire-and-forget.
    fn scroll_to(&mut self, top: f64);
}

impl<H: ScrollHost + ?Sized> ScrollHost for Box<H> {
    fn viewport(&self) -> ViewportMetrics {
        (**self).viewport()
    }

    fn region(&self, section: usize) -> RegionMetrics {
        (**self).region(section)
    }

    fn set_bullet_current(&mut self, bullet: usize, current: bool) {
        (**self).set_bullet_current(bullet, current);
    }

    fn set_scroll_next_visible(&mut self, visible: bool) {
        (**self).set_scroll_next_visible(visible);
    }

    fn set_navigation_disabled(&mut self, disabled: bool) {
        (**self).set_navigation_disabled(disabled);
    }

    fn scroll_to(&mut self, top: f64) {
        (**self).scroll_to(top);
    }
}

/// An effect the core asked the host to apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEffect {
    BulletCurrent { bullet: usize, current: bool },
    ScrollNextVisible(bool),
    NavigationDisabled(bool),
    ScrollTo(f64),
}

/// In-memory page: fixed geometry the caller mutates, effects recorded in order.
///
/// Useful for native embeddings that do their own rendering, and for tests.
/// `scroll_to` is recorded but does not move the viewport; call
/// [`StaticPage::scroll_by`] or [`StaticPage::set_scroll_offset`] to simulate
/// the user or a finished animation.
#[derive(Debug, Clone, Default)]
pub struct StaticPage {
    viewport: ViewportMetrics,
    regions: Vec<RegionMetrics>,
    bullets_current: Vec<bool>,
    scroll_next_visible: bool,
    navigation_disabled: bool,
    effects: Vec<HostEffect>,
}

impl StaticPage {
    /// Create a page with the given viewport height and sections.
    ///
    /// The document height is the bottom of the last section (or the viewport
    /// height, whichever is larger). One bullet is tracked per section.
    #[must_use]
    pub fn new(viewport_height: f64, regions: Vec<RegionMetrics>) -> Self {
        let document_height = regions
            .iter()
            .map(RegionMetrics::end)
            .fold(viewport_height, f64::max);
        Self {
            viewport: ViewportMetrics::new(0.0, viewport_height, document_height),
            bullets_current: vec![false; regions.len()],
            regions,
            scroll_next_visible: true,
            navigation_disabled: false,
            effects: Vec::new(),
        }
    }

    /// `count` back-to-back sections of equal `height`.
    #[must_use]
    pub fn uniform(viewport_height: f64, height: f64, count: usize) -> Self {
        let regions = (0..count)
            .map(|index| RegionMetrics::new(index as f64 * height, height))
            .collect();
        Self::new(viewport_height, regions)
    }

    #[must_use]
    pub fn section_count(&self) -> usize {
        self.regions.len()
    }

    #[must_use]
    pub fn viewport_metrics(&self) -> ViewportMetrics {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: ViewportMetrics) {
        self.viewport = viewport;
    }

    pub fn set_scroll_offset(&mut self, scroll_offset: f64) {
        self.viewport.scroll_offset = scroll_offset;
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.viewport.scroll_offset += delta;
    }

    pub fn set_region(&mut self, section: usize, region: RegionMetrics) {
        if let Some(slot) = self.regions.get_mut(section) {
            *slot = region;
        }
    }

    /// Bullets currently shown as current.
    #[must_use]
    pub fn current_bullets(&self) -> Vec<usize> {
        self.bullets_current
            .iter()
            .enumerate()
            .filter_map(|(index, current)| current.then_some(index))
            .collect()
    }

    #[must_use]
    pub fn is_scroll_next_visible(&self) -> bool {
        self.scroll_next_visible
    }

    #[must_use]
    pub fn is_navigation_disabled(&self) -> bool {
        self.navigation_disabled
    }

    /// Effects recorded since the last drain.
    #[must_use]
    pub fn effects(&self) -> &[HostEffect] {
        &self.effects
    }

    pub fn drain_effects(&mut self) -> Vec<HostEffect> {
        std::mem::take(&mut self.effects)
    }

    /// Most recent requested scroll target, if any.
    #[must_use]
    pub fn last_scroll_target(&self) -> Option<f64> {
        self.effects.iter().rev().find_map(|effect| match effect {
            HostEffect::ScrollTo(top) => Some(*top),
            _ => None,
        })
    }
}

impl ScrollHost for StaticPage {
    fn viewport(&self) -> ViewportMetrics {
        self.viewport
    }

    fn region(&self, section: usize) -> RegionMetrics {
        self.regions.get(section).copied().unwrap_or_default()
    }

    fn set_bullet_current(&mut self, bullet: usize, current: bool) {
        if bullet >= self.bullets_current.len() {
            self.bullets_current.resize(bullet + 1, false);
        }
        self.bullets_current[bullet] = current;
        self.effects.push(HostEffect::BulletCurrent { bullet, current });
    }

    fn set_scroll_next_visible(&mut self, visible: bool) {
        self.scroll_next_visible = visible;
        self.effects.push(HostEffect::ScrollNextVisible(visible));
    }

    fn set_navigation_disabled(&mut self, disabled: bool) {
        self.navigation_disabled = disabled;
        self.effects.push(HostEffect::NavigationDisabled(disabled));
    }

    fn scroll_to(&mut self, top: f64) {
        self.effects.push(HostEffect::ScrollTo(top));
    }
}
