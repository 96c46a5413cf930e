//! Forward use-scan: finds a usable target in front of the player.

use glam::Vec3;

use crate::host::RayCaster;

/// Default reach of the use ray.
pub const USE_DISTANCE: f32 = 3.0;

/// Outcome of one scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanResult {
    /// A usable target is within reach; the host shows its use hint.
    pub hint_visible: bool,
    /// The target's use action was triggered this tick.
    pub used: bool,
}

/// Casts a fixed-length ray each tick and triggers usable targets.
#[derive(Clone, Copy, Debug)]
pub struct InteractionScanner {
    max_distance: f32,
}

impl Default for InteractionScanner {
    fn default() -> Self {
        Self::new(USE_DISTANCE)
    }
}

impl InteractionScanner {
    /// Create a scanner with the given reach.
    #[must_use]
    pub fn new(max_distance: f32) -> Self {
        Self { max_distance }
    }

    /// Reach of the use ray.
    #[must_use]
    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    /// Cast from `origin` along `direction` and use the hit target if
    /// `use_pressed` and it has the usable capability.
    pub fn scan(
        &self,
        ray_caster: &mut dyn RayCaster,
        origin: Vec3,
        direction: Vec3,
        use_pressed: bool,
    ) -> ScanResult {
        let Some(hit) = ray_caster.cast(origin, direction, self.max_distance) else {
            return ScanResult::default();
        };
        let distance = hit.distance;
        let Some(usable) = hit.target.as_usable() else {
            return ScanResult::default();
        };

        if use_pressed {
            tracing::debug!(distance, "using target");
            usable.try_use();
        }
        ScanResult {
            hint_visible: true,
            used: use_pressed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Interactable, RayHit, Usable};

    #[derive(Default)]
    struct Switch {
        uses: u32,
    }

    impl Usable for Switch {
        fn try_use(&mut self) {
            self.uses += 1;
        }
    }

    impl Interactable for Switch {
        fn as_usable(&mut self) -> Option<&mut dyn Usable> {
            Some(self)
        }
    }

    struct Wall;

    impl Interactable for Wall {}

    /// Ray caster with a single target at a fixed distance along any ray.
    struct SingleTarget<T> {
        target: T,
        distance: f32,
        last_max_distance: Option<f32>,
    }

    impl<T: Interactable> RayCaster for SingleTarget<T> {
        fn cast(&mut self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit<'_>> {
            self.last_max_distance = Some(max_distance);
            if self.distance > max_distance {
                return None;
            }
            Some(RayHit {
                distance: self.distance,
                point: origin + direction * self.distance,
                target: &mut self.target,
            })
        }
    }

    fn caster<T>(target: T, distance: f32) -> SingleTarget<T> {
        SingleTarget {
            target,
            distance,
            last_max_distance: None,
        }
    }

    #[test]
    fn test_ray_length_is_use_distance() {
        let mut world = caster(Wall, 1.0);
        InteractionScanner::default().scan(&mut world, Vec3::ZERO, Vec3::NEG_Z, false);
        assert_eq!(world.last_max_distance, Some(3.0));
    }

    #[test]
    fn test_usable_in_reach_shows_hint_without_using() {
        let mut world = caster(Switch::default(), 2.0);
        let result = InteractionScanner::default().scan(&mut world, Vec3::ZERO, Vec3::NEG_Z, false);
        assert!(result.hint_visible);
        assert!(!result.used);
        assert_eq!(world.target.uses, 0);
    }

    #[test]
    fn test_use_pressed_triggers_target() {
        let mut world = caster(Switch::default(), 2.0);
        let result = InteractionScanner::default().scan(&mut world, Vec3::ZERO, Vec3::NEG_Z, true);
        assert!(result.hint_visible);
        assert!(result.used);
        assert_eq!(world.target.uses, 1);
    }

    #[test]
    fn test_target_out_of_reach() {
        let mut world = caster(Switch::default(), 3.5);
        let result = InteractionScanner::default().scan(&mut world, Vec3::ZERO, Vec3::NEG_Z, true);
        assert_eq!(result, ScanResult::default());
        assert_eq!(world.target.uses, 0);
    }

    #[test]
    fn test_target_without_capability_hides_hint() {
        let mut world = caster(Wall, 1.0);
        let result = InteractionScanner::default().scan(&mut world, Vec3::ZERO, Vec3::NEG_Z, true);
        assert!(!result.hint_visible);
        assert!(!result.used);
    }
}
