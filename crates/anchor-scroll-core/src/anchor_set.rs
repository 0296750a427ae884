#![forbid(unsafe_code)]

//! Current-section selection and next/prev navigation.
//!
//! An [`AnchorSet`] owns two arenas built once at construction: the sections in
//! document order and the bullets in their own order. Each side stores the
//! other's index, so the section/bullet relation needs no shared references.
//!
//! # Evaluation
//!
//! [`AnchorSet::find_current`] is a full re-scan: every section is re-measured
//! against the host's viewport and a winner is picked according to the
//! configured [`SelectionPolicy`]:
//!
//! - [`Nearest`](SelectionPolicy::Nearest): smallest distance wins. Some section
//!   is current whenever the set is non-empty.
//! - [`EdgeAware`](SelectionPolicy::EdgeAware): the section whose screen
//!   position at the viewport center is closest to `0.5` wins. The first section
//!   only becomes current within half a viewport of the center; the last section
//!   stops being current a quarter viewport past it. Scroll-next is shown at the
//!   first section and hidden elsewhere.
//!
//! Ties always go to the earliest section. Evaluating twice against the same
//! geometry leaves the same state.

use crate::config::{AnchorSetConfig, BulletSource, SelectionPolicy};
use crate::error::{ElementKind, Result};
use crate::geometry::{self, DistanceDirection, SectionDistance};
use crate::host::ScrollHost;
use crate::pairing::{self, AnchorId};

#[cfg(feature = "tracing")]
use crate::logging::{debug, trace};
#[cfg(not(feature = "tracing"))]
use crate::{debug, trace};

/// Callback run after each edge-aware evaluation.
pub type OnScroll<H> = Box<dyn FnMut(&AnchorSet<H>)>;

// ---------------------------------------------------------------------------
// Arena entries
// ---------------------------------------------------------------------------

/// A tracked page region.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    id: AnchorId,
    bullet: usize,
    /// Last measurement; `None` until the first evaluation.
    measured: Option<SectionDistance>,
}

impl Section {
    #[must_use]
    pub fn id(&self) -> &AnchorId {
        &self.id
    }

    /// Index of the paired bullet.
    #[must_use]
    pub fn bullet(&self) -> usize {
        self.bullet
    }

    /// Distance from the last evaluation.
    #[must_use]
    pub fn distance(&self) -> Option<SectionDistance> {
        self.measured
    }

    fn lies(&self, direction: DistanceDirection) -> bool {
        self.measured.is_some_and(|m| m.direction == direction)
    }
}

/// A navigation indicator bound to one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bullet {
    id: AnchorId,
    section: usize,
    current: bool,
}

impl Bullet {
    #[must_use]
    pub fn id(&self) -> &AnchorId {
        &self.id
    }

    /// Index of the paired section.
    #[must_use]
    pub fn section(&self) -> usize {
        self.section
    }

    #[must_use]
    pub fn is_current(&self) -> bool {
        self.current
    }
}

// ---------------------------------------------------------------------------
// AnchorSet
// ---------------------------------------------------------------------------

/// Sections and bullets of one navigation, with the current selection.
pub struct AnchorSet<H> {
    host: H,
    sections: Vec<Section>,
    bullets: Vec<Bullet>,
    current: Option<usize>,
    policy: SelectionPolicy,
    has_scroll_next: bool,
    scroll_next_visible: bool,
    navigation_disabled: bool,
    on_scroll: Option<OnScroll<H>>,
}

impl<H: core::fmt::Debug> core::fmt::Debug for AnchorSet<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AnchorSet")
            .field("host", &self.host)
            .field("sections", &self.sections)
            .field("bullets", &self.bullets)
            .field("current", &self.current)
            .field("policy", &self.policy)
            .field("scroll_next_visible", &self.scroll_next_visible)
            .field("navigation_disabled", &self.navigation_disabled)
            .finish_non_exhaustive()
    }
}

impl<H: ScrollHost> AnchorSet<H> {
    /// Build a set from the page shape in `config`, pairing sections with
    /// bullets by anchor id.
    ///
    /// # Errors
    ///
    /// Duplicate ids, differing counts, or a section without a bullet reject
    /// the whole configuration.
    pub fn create(config: AnchorSetConfig, host: H) -> Result<Self> {
        let section_ids = pairing::resolve_ids(&config.sections, ElementKind::Section)?;
        let bullet_ids = match &config.bullets {
            BulletSource::Elements(explicit) => {
                pairing::resolve_ids(explicit, ElementKind::Bullet)?
            }
            BulletSource::Synthesized => section_ids.clone(),
        };
        let section_to_bullet = pairing::pair(&section_ids, &bullet_ids)?;

        // Pairing is a bijection here: equal counts, unique ids on both sides.
        let mut bullet_to_section = vec![0; bullet_ids.len()];
        for (section, &bullet) in section_to_bullet.iter().enumerate() {
            bullet_to_section[bullet] = section;
        }

        let sections = section_ids
            .into_iter()
            .zip(section_to_bullet)
            .map(|(id, bullet)| Section {
                id,
                bullet,
                measured: None,
            })
            .collect::<Vec<_>>();
        let bullets = bullet_ids
            .into_iter()
            .zip(bullet_to_section)
            .map(|(id, section)| Bullet {
                id,
                section,
                current: false,
            })
            .collect::<Vec<_>>();

        debug!(
            sections = sections.len(),
            policy = ?config.policy,
            scroll_next = config.scroll_next,
            "anchor set created"
        );

        Ok(Self {
            host,
            sections,
            bullets,
            current: None,
            policy: config.policy,
            has_scroll_next: config.scroll_next,
            scroll_next_visible: true,
            navigation_disabled: false,
            on_scroll: None,
        })
    }

    /// Install the callback run after each edge-aware evaluation.
    ///
    /// Under [`SelectionPolicy::Nearest`] the callback is kept but never run.
    pub fn set_on_scroll(&mut self, callback: impl FnMut(&AnchorSet<H>) + 'static) {
        self.on_scroll = Some(Box::new(callback));
    }

    /// Re-measure every section and select the current one.
    pub fn find_current(&mut self) {
        if self.sections.is_empty() {
            return;
        }
        let viewport = self.host.viewport();
        let mut nearest = (0, f64::INFINITY);
        let mut centered = (0, f64::INFINITY);
        for index in 0..self.sections.len() {
            let region = self.host.region(index);
            let measured = geometry::measure(&region, &viewport);
            let screen_gap = (region.screen_pos(&viewport, 0.5) - 0.5).abs();
            trace!(
                section = %self.sections[index].id,
                distance = measured.distance,
                screen_gap,
                "section measured"
            );
            if index == 0 || measured.distance < nearest.1 {
                nearest = (index, measured.distance);
            }
            if index == 0 || screen_gap < centered.1 {
                centered = (index, screen_gap);
            }
            self.sections[index].measured = Some(measured);
        }

        match self.policy {
            SelectionPolicy::Nearest => self.mark_current(nearest.0),
            SelectionPolicy::EdgeAware => {
                self.resolve_edges(centered.0, viewport.viewport_height);
                self.fire_on_scroll();
            }
        }
    }

    fn resolve_edges(&mut self, best: usize, viewport_height: f64) {
        let last = self.sections.len() - 1;
        let distance = self.sections[best]
            .measured
            .map_or(f64::INFINITY, |m| m.distance);
        if best == 0 {
            self.toggle_scroll_next(false);
            if distance < viewport_height / 2.0 {
                self.mark_current(best);
            } else {
                self.clear_current();
            }
        } else if best == last {
            self.toggle_scroll_next(true);
            if distance >= viewport_height / 4.0 {
                self.clear_current();
            } else {
                self.mark_current(best);
            }
        } else {
            self.mark_current(best);
            self.toggle_scroll_next(true);
        }
    }

    fn fire_on_scroll(&mut self) {
        if let Some(mut callback) = self.on_scroll.take() {
            callback(self);
            self.on_scroll = Some(callback);
        }
    }

    /// Mark `section`'s bullet current and clear every bullet of another section.
    fn mark_current(&mut self, section: usize) {
        let bullet = self.sections[section].bullet;
        if self.current != Some(section) {
            debug!(section = %self.sections[section].id, "current section changed");
        }
        self.current = Some(section);
        self.bullets[bullet].current = true;
        self.host.set_bullet_current(bullet, true);
        for other in 0..self.bullets.len() {
            let other_section = self.bullets[other].section;
            if self.sections[other_section].id != self.sections[section].id {
                self.remove_current(other);
            }
        }
    }

    fn remove_current(&mut self, bullet: usize) {
        self.bullets[bullet].current = false;
        self.host.set_bullet_current(bullet, false);
    }

    fn clear_current(&mut self) {
        if self.current.is_some() {
            debug!("current section cleared");
        }
        self.current = None;
        for bullet in 0..self.bullets.len() {
            self.remove_current(bullet);
        }
    }

    /// Show (`hide == false`) or hide the scroll-next control.
    ///
    /// Only a change of state reaches the host.
    pub fn toggle_scroll_next(&mut self, hide: bool) {
        let visible = !hide;
        if visible == self.scroll_next_visible {
            return;
        }
        self.scroll_next_visible = visible;
        if self.has_scroll_next {
            self.host.set_scroll_next_visible(visible);
        }
    }

    /// Flag the navigation disabled when every section fits on one screen.
    ///
    /// Compares the span from the first section's top to the middle of the last
    /// section with the viewport height. Only a change of state reaches the host.
    pub fn check_all_on_screen(&mut self) {
        if self.sections.is_empty() {
            return;
        }
        let viewport = self.host.viewport();
        let first = self.host.region(0);
        let last = self.host.region(self.sections.len() - 1);
        let span = (first.offset - last.offset - last.height / 2.0).abs();
        let fits = span < viewport.viewport_height;
        if fits != self.navigation_disabled {
            debug!(disabled = fits, span, "navigation availability changed");
            self.navigation_disabled = fits;
            self.host.set_navigation_disabled(fits);
        }
    }

    /// Scroll so that `section` comes into view. Returns the requested target.
    pub fn go_to(&mut self, section: usize) -> Option<f64> {
        if section >= self.sections.len() {
            return None;
        }
        let region = self.host.region(section);
        let viewport = self.host.viewport();
        let top = geometry::scroll_target(&region, &viewport);
        debug!(section = %self.sections[section].id, top, "scrolling to section");
        self.host.scroll_to(top);
        Some(top)
    }

    /// Handle activation of the bullet at `bullet`.
    pub fn activate_bullet(&mut self, bullet: usize) -> Option<f64> {
        let section = self.bullets.get(bullet)?.section;
        self.go_to(section)
    }

    /// Scroll to the section after the current one.
    ///
    /// With no current section, scrolls to the first section only if the last
    /// evaluation found it below the viewport center. Never wraps around.
    pub fn scroll_to_next(&mut self) -> Option<f64> {
        match self.current {
            Some(current) if current + 1 < self.sections.len() => self.go_to(current + 1),
            Some(_) => None,
            None => {
                let first = self.sections.first()?;
                if first.lies(DistanceDirection::Below) {
                    self.go_to(0)
                } else {
                    None
                }
            }
        }
    }

    /// Scroll to the section before the current one.
    ///
    /// With no current section, scrolls to the last section only if the last
    /// evaluation found it above the viewport center. Never wraps around.
    pub fn scroll_to_prev(&mut self) -> Option<f64> {
        match self.current {
            Some(current) if current > 0 => self.go_to(current - 1),
            Some(_) => None,
            None => {
                let last = self.sections.len().checked_sub(1)?;
                if self.sections[last].lies(DistanceDirection::Above) {
                    self.go_to(last)
                } else {
                    None
                }
            }
        }
    }
}

impl<H> AnchorSet<H> {
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Index of the current section.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    #[must_use]
    pub fn current(&self) -> Option<&Section> {
        self.current.map(|index| &self.sections[index])
    }

    #[must_use]
    pub fn current_id(&self) -> Option<&AnchorId> {
        self.current().map(Section::id)
    }

    #[must_use]
    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    #[must_use]
    pub fn is_scroll_next_visible(&self) -> bool {
        self.scroll_next_visible
    }

    #[must_use]
    pub fn is_navigation_disabled(&self) -> bool {
        self.navigation_disabled
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
