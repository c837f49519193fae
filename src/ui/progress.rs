//! Progress indicator: a bounded percentage bar.

/// A progress value relative to a maximum, clamped to `[0, 100]` percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    value: f64,
    max: f64,
}

impl Progress {
    pub fn new(value: f64, max: f64) -> Self {
        Self { value, max }
    }

    /// A progress value already expressed as a percentage.
    pub fn percent_of_100(value: f64) -> Self {
        Self::new(value, 100.0)
    }

    /// Percentage in `[0, 100]`. A non-positive or non-finite max yields 0.
    pub fn percent(&self) -> f64 {
        if !self.value.is_finite() || !self.max.is_finite() || self.max <= 0.0 {
            return 0.0;
        }
        (self.value / self.max * 100.0).clamp(0.0, 100.0)
    }

    /// Text bar of `width` cells, e.g. `[######----] 60%`.
    pub fn bar(&self, width: usize) -> String {
        let percent = self.percent();
        let filled = ((percent / 100.0) * width as f64).round() as usize;
        let filled = filled.min(width);
        format!(
            "[{}{}] {:.0}%",
            "#".repeat(filled),
            "-".repeat(width - filled),
            percent
        )
    }
}
