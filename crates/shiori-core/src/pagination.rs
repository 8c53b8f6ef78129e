//! Scroll-driven "load more" trigger.

/// Scroll position reported by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub viewport_height: f32,
    pub offset: f32,
    pub total_height: f32,
}

impl ScrollMetrics {
    pub fn new(viewport_height: f32, offset: f32, total_height: f32) -> Self {
        Self {
            viewport_height,
            offset,
            total_height,
        }
    }

    /// Whether the bottom of the viewport is within `threshold` of the end.
    pub fn near_end(&self, threshold: f32) -> bool {
        self.offset + self.viewport_height >= self.total_height - threshold
    }
}

/// Edge-triggered end-of-list detector.
///
/// Fires once when the viewport crosses into the threshold zone. It re-arms
/// when the viewport leaves the zone, or when the content height changes
/// because a new page arrived.
#[derive(Debug)]
pub struct PaginationTrigger {
    threshold: f32,
    fired_at: Option<f32>,
}

impl PaginationTrigger {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            fired_at: None,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Feed a scroll event. Returns `true` when the next page should load.
    pub fn observe(&mut self, metrics: ScrollMetrics) -> bool {
        if !metrics.near_end(self.threshold) {
            self.fired_at = None;
            return false;
        }
        if self.fired_at == Some(metrics.total_height) {
            return false;
        }
        self.fired_at = Some(metrics.total_height);
        true
    }

    /// Forget the last crossing, e.g. after the list was replaced.
    pub fn reset(&mut self) {
        self.fired_at = None;
    }
}
