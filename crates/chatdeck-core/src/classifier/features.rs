use crate::constants::classifier::{NUM_FEATURES, SLIDER_STEP};

/// One slider on the prediction form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureSpec {
    pub label: &'static str,
    pub min: f32,
    pub max: f32,
}

impl FeatureSpec {
    pub const IRIS: [FeatureSpec; NUM_FEATURES] = [
        FeatureSpec { label: "Sepal Length", min: 4.0, max: 8.0 },
        FeatureSpec { label: "Sepal Width", min: 2.0, max: 5.0 },
        FeatureSpec { label: "Petal Length", min: 1.0, max: 7.0 },
        FeatureSpec { label: "Petal Width", min: 0.1, max: 3.0 },
    ];

    /// Sliders start at their minimum.
    pub fn initial_values() -> [f32; NUM_FEATURES] {
        Self::IRIS.map(|spec| spec.min)
    }

    pub fn clamp(&self, value: f32) -> f32 {
        round_step(value.clamp(self.min, self.max))
    }

    pub fn step_up(&self, value: f32) -> f32 {
        self.clamp(value + SLIDER_STEP)
    }

    pub fn step_down(&self, value: f32) -> f32 {
        self.clamp(value - SLIDER_STEP)
    }
}

/// Snap to one decimal so repeated stepping does not drift.
fn round_step(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_values_are_minimums() {
        assert_eq!(FeatureSpec::initial_values(), [4.0, 2.0, 1.0, 0.1]);
    }

    #[test]
    fn test_stepping_stays_in_range() {
        let spec = FeatureSpec::IRIS[3];
        assert_eq!(spec.step_down(spec.min), 0.1);
        let mut v = spec.min;
        for _ in 0..100 {
            v = spec.step_up(v);
        }
        assert_eq!(v, 3.0);
    }

    #[test]
    fn test_stepping_does_not_drift() {
        let spec = FeatureSpec::IRIS[0];
        let mut v = spec.min;
        for _ in 0..7 {
            v = spec.step_up(v);
        }
        assert_eq!(v, 4.7);
    }
}
