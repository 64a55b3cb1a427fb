//! Pipeline tuning knobs.

/// Thresholds and limits for the check battery.
///
/// The defaults reproduce the service's production behavior; override
/// individual fields with the `with_*` builders.
///
/// # Example
///
/// ```
/// use modelguard_core::ValidatorConfig;
///
/// let config = ValidatorConfig::default().with_thin_wall_threshold_mm(0.8);
/// assert!((config.thin_wall_threshold_mm - 0.8).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorConfig {
    /// Minimum acceptable wall thickness in millimeters.
    pub thin_wall_threshold_mm: f64,
    /// How many surface points to sample for thickness probing.
    pub surface_sample_budget: usize,
    /// How many of the sampled points are actually probed. Deliberately
    /// far below the budget; the probe is a coarse spot check.
    pub thickness_probe_limit: usize,
    /// Distance below which two vertices count as duplicates, mm.
    pub duplicate_tolerance: f64,
    /// Area below which a triangle counts as degenerate, mm².
    pub degenerate_area_epsilon: f64,
    /// Bounding-box extent below which the mesh counts as flat, mm.
    pub flat_extent_epsilon: f64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            thin_wall_threshold_mm: 0.5,
            surface_sample_budget: 1000,
            thickness_probe_limit: 10,
            duplicate_tolerance: 1e-6,
            degenerate_area_epsilon: 1e-10,
            flat_extent_epsilon: 1e-6,
        }
    }
}

impl ValidatorConfig {
    /// Set the minimum wall thickness in millimeters.
    #[must_use]
    pub const fn with_thin_wall_threshold_mm(mut self, threshold: f64) -> Self {
        self.thin_wall_threshold_mm = threshold;
        self
    }

    /// Set the surface sampling budget.
    #[must_use]
    pub const fn with_surface_sample_budget(mut self, budget: usize) -> Self {
        self.surface_sample_budget = budget;
        self
    }

    /// Set how many sampled points are probed for thickness.
    #[must_use]
    pub const fn with_thickness_probe_limit(mut self, limit: usize) -> Self {
        self.thickness_probe_limit = limit;
        self
    }

    /// Set the duplicate-vertex distance tolerance.
    #[must_use]
    pub const fn with_duplicate_tolerance(mut self, tolerance: f64) -> Self {
        self.duplicate_tolerance = tolerance;
        self
    }

    /// Set the degenerate-face area epsilon.
    #[must_use]
    pub const fn with_degenerate_area_epsilon(mut self, epsilon: f64) -> Self {
        self.degenerate_area_epsilon = epsilon;
        self
    }

    /// Set the flat-mesh extent epsilon.
    #[must_use]
    pub const fn with_flat_extent_epsilon(mut self, epsilon: f64) -> Self {
        self.flat_extent_epsilon = epsilon;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_production_behavior() {
        let config = ValidatorConfig::default();
        assert!((config.thin_wall_threshold_mm - 0.5).abs() < 1e-12);
        assert_eq!(config.surface_sample_budget, 1000);
        assert_eq!(config.thickness_probe_limit, 10);
        assert!((config.duplicate_tolerance - 1e-6).abs() < 1e-18);
        assert!((config.degenerate_area_epsilon - 1e-10).abs() < 1e-22);
        assert!((config.flat_extent_epsilon - 1e-6).abs() < 1e-18);
    }

    #[test]
    fn builders_override_single_fields() {
        let config = ValidatorConfig::default()
            .with_thickness_probe_limit(50)
            .with_surface_sample_budget(200);
        assert_eq!(config.thickness_probe_limit, 50);
        assert_eq!(config.surface_sample_budget, 200);
        // Untouched fields keep their defaults
        assert!((config.thin_wall_threshold_mm - 0.5).abs() < 1e-12);
    }
}
