//! Piecewise-constant floor height along the depth (z) axis.

/// Upper bound on authored height changes per scene.
pub const MAX_GROUND_CHANGES: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundStep {
    pub start_z: f32,
    pub height: f32,
}

impl GroundStep {
    pub const fn new(start_z: f32, height: f32) -> Self {
        Self { start_z, height }
    }
}

/// Ordered breakpoints; immutable once the scene is loaded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroundProfile {
    steps: Vec<GroundStep>,
}

impl GroundProfile {
    pub fn flat() -> Self {
        Self { steps: Vec::new() }
    }

    /// Steps must be sorted by `start_z` and number at most
    /// [`MAX_GROUND_CHANGES`].
    pub fn new(steps: &[GroundStep]) -> Self {
        debug_assert!(steps.len() <= MAX_GROUND_CHANGES);
        debug_assert!(steps.windows(2).all(|w| w[0].start_z <= w[1].start_z));
        Self {
            steps: steps.to_vec(),
        }
    }

    pub fn steps(&self) -> &[GroundStep] {
        &self.steps
    }

    /// Height of the last breakpoint whose start is at or before `z`, 0 if none.
    pub fn height_at(&self, z: f32) -> f32 {
        let mut height = 0.0;
        for step in &self.steps {
            if step.start_z > z {
                break;
            }
            height = step.height;
        }
        height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sauna_floor() -> GroundProfile {
        GroundProfile::new(&[
            GroundStep::new(0.0, 0.0),
            GroundStep::new(10.0, 5.0),
            GroundStep::new(20.0, 2.0),
        ])
    }

    #[test]
    fn height_between_breakpoints() {
        let ground = sauna_floor();
        assert_eq!(ground.height_at(5.0), 0.0);
        assert_eq!(ground.height_at(15.0), 5.0);
        assert_eq!(ground.height_at(25.0), 2.0);
    }

    #[test]
    fn breakpoint_start_is_inclusive() {
        assert_eq!(sauna_floor().height_at(10.0), 5.0);
        assert_eq!(sauna_floor().height_at(20.0), 2.0);
    }

    #[test]
    fn before_first_breakpoint_is_zero() {
        let ground = GroundProfile::new(&[GroundStep::new(3.0, 7.0)]);
        assert_eq!(ground.height_at(-50.0), 0.0);
        assert_eq!(GroundProfile::flat().height_at(12.0), 0.0);
    }
}
