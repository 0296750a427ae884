#![forbid(unsafe_code)]

//! Geometric primitives and the pure decision functions built on them.
//!
//! All values are CSS pixels measured from the top of the document. Nothing in
//! this module holds state: the selection code stores the returned values, and
//! tests can exercise every rule without a host.

/// Scroll state of the page as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportMetrics {
    /// Current vertical scroll position (top edge of the viewport).
    pub scroll_offset: f64,
    /// Height of the visible viewport.
    pub viewport_height: f64,
    /// Total scrollable height of the document.
    pub document_height: f64,
}

impl ViewportMetrics {
    /// Create new viewport metrics.
    #[inline]
    pub const fn new(scroll_offset: f64, viewport_height: f64, document_height: f64) -> Self {
        Self {
            scroll_offset,
            viewport_height,
            document_height,
        }
    }

    /// Document coordinate of the viewport's vertical center.
    #[inline]
    pub fn center(&self) -> f64 {
        self.scroll_offset + self.viewport_height / 2.0
    }

    /// Largest legal scroll position. Never negative.
    #[inline]
    pub fn max_scroll(&self) -> f64 {
        (self.document_height - self.viewport_height).max(0.0)
    }
}

/// Vertical extent of one tracked section.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RegionMetrics {
    /// Top edge in document coordinates.
    pub offset: f64,
    /// Height of the region.
    pub height: f64,
}

impl RegionMetrics {
    /// Create new region metrics.
    #[inline]
    pub const fn new(offset: f64, height: f64) -> Self {
        Self { offset, height }
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn end(&self) -> f64 {
        self.offset + self.height
    }

    /// Normalized position of a viewport point inside this region.
    ///
    /// `fraction` selects the viewport point (0.0 = top edge, 0.5 = center).
    /// The result is 0.0 when that point sits on the region's top edge and 1.0
    /// on its bottom edge. A region with no height yields `+inf`, so it loses
    /// every "closest to" comparison against a measurable region.
    pub fn screen_pos(&self, viewport: &ViewportMetrics, fraction: f64) -> f64 {
        if self.height <= 0.0 || !self.height.is_finite() {
            return f64::INFINITY;
        }
        (viewport.scroll_offset + viewport.viewport_height * fraction - self.offset) / self.height
    }
}

/// Which side of the viewport center a section lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceDirection {
    /// The section starts below the viewport center.
    Below,
    /// The section overlaps or ends above the viewport center.
    #[default]
    Above,
}

impl DistanceDirection {
    /// `+1` for [`Below`](Self::Below), `-1` for [`Above`](Self::Above).
    #[inline]
    pub const fn signum(self) -> i8 {
        match self {
            Self::Below => 1,
            Self::Above => -1,
        }
    }
}

/// Gap between the viewport center and a section's nearer edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SectionDistance {
    /// Always `>= 0`; zero when the center lies within the section.
    pub distance: f64,
    /// Side of the center the section lies on.
    pub direction: DistanceDirection,
}

/// Measure how far `region` is from the viewport center.
///
/// `after` is positive when the section starts below the center, `before` is
/// positive when it ends above it. The distance is the larger of the two,
/// floored at zero.
pub fn measure(region: &RegionMetrics, viewport: &ViewportMetrics) -> SectionDistance {
    let center = viewport.center();
    let after = region.offset - center;
    let before = center - region.offset - region.height;
    let distance = 0.0_f64.max(after).max(before);
    let direction = if after > 0.0 {
        DistanceDirection::Below
    } else {
        DistanceDirection::Above
    };
    SectionDistance {
        distance,
        direction,
    }
}

/// Scroll position that brings `region` into view.
///
/// Regions shorter than the viewport are centered. The result is always inside
/// `[0, viewport.max_scroll()]`, whatever the host reported.
pub fn scroll_target(region: &RegionMetrics, viewport: &ViewportMetrics) -> f64 {
    let mut top = region.offset;
    if region.height < viewport.viewport_height {
        top += (region.height - viewport.viewport_height) / 2.0;
    }
    if !top.is_finite() {
        top = 0.0;
    }
    top.clamp(0.0, viewport.max_scroll())
}
