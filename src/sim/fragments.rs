//! Falling overhang fragments
//!
//! Purely cosmetic: fragments never touch scoring or the tower. Each one
//! drops at a fixed rate and tumbles until it passes the retirement depth.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::geometry::Axis;
use super::tower::BlockId;

/// Slack on the retirement check so float drift cannot cost an extra tick
const RETIRE_TOLERANCE: f32 = 1e-4;

/// A clipped-off overhang on its way down
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub id: BlockId,
    /// Position when spawned
    pub origin: Vec3,
    pub position: Vec3,
    pub size: Vec3,
    /// Euler angles (radians)
    pub rotation: Vec3,
    /// Radians per tick on each axis
    pub spin: Vec3,
    /// Ticks since spawn
    pub age: f32,
}

/// Fall parameters shared by every fragment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FallTuning {
    pub fall_per_tick: f32,
    pub retire_y: f32,
    pub spin_primary: f32,
    pub spin_secondary: f32,
}

/// Set of live fragments. Iteration order carries no meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragmentField {
    pub tuning: FallTuning,
    fragments: Vec<Fragment>,
}

impl FragmentField {
    pub fn new(tuning: FallTuning) -> Self {
        Self {
            tuning,
            fragments: Vec::new(),
        }
    }

    /// Start a fragment falling from `position`.
    ///
    /// Tumble is asymmetric: an overhang cut along X mostly rolls about Z
    /// and vice versa.
    pub fn spawn(&mut self, id: BlockId, position: Vec3, size: Vec3, cut_axis: Axis) -> &Fragment {
        let FallTuning {
            spin_primary,
            spin_secondary,
            ..
        } = self.tuning;
        let spin = match cut_axis {
            Axis::X => Vec3::new(spin_secondary, 0.0, spin_primary),
            Axis::Z => Vec3::new(spin_primary, 0.0, spin_secondary),
        };
        self.fragments.push(Fragment {
            id,
            origin: position,
            position,
            size,
            rotation: Vec3::ZERO,
            spin,
            age: 0.0,
        });
        let last = self.fragments.len() - 1;
        &self.fragments[last]
    }

    /// Advance every fragment by `dt` ticks. Returns the ids that were retired.
    pub fn advance(&mut self, dt: f32) -> Vec<BlockId> {
        let FallTuning {
            fall_per_tick,
            retire_y,
            ..
        } = self.tuning;

        for fragment in &mut self.fragments {
            fragment.age += dt;
            // Recomputed from origin so the drop does not accumulate error
            fragment.position.y = fragment.origin.y - fall_per_tick * fragment.age;
            fragment.rotation += fragment.spin * dt;
        }

        let mut retired = Vec::new();
        self.fragments.retain(|f| {
            let alive = f.position.y > retire_y + RETIRE_TOLERANCE;
            if !alive {
                retired.push(f.id);
            }
            alive
        });
        if !retired.is_empty() {
            log::debug!("Retired {} fragment(s)", retired.len());
        }
        retired
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fragment> {
        self.fragments.iter()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Drop every fragment without letting it finish falling
    pub fn clear(&mut self) -> Vec<BlockId> {
        self.fragments.drain(..).map(|f| f.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TowerConfig;

    fn field() -> FragmentField {
        let config = TowerConfig::default();
        FragmentField::new(FallTuning {
            fall_per_tick: config.fragment_fall_per_tick,
            retire_y: config.fragment_retire_y,
            spin_primary: config.fragment_spin_primary,
            spin_secondary: config.fragment_spin_secondary,
        })
    }

    #[test]
    fn test_retires_after_exactly_75_ticks() {
        let mut field = field();
        field.spawn(7, Vec3::new(1.0, 5.0, 0.0), Vec3::new(2.0, 0.5, 3.0), Axis::X);

        for tick in 1..75 {
            assert!(field.advance(1.0).is_empty(), "retired early at tick {tick}");
            assert_eq!(field.len(), 1);
        }
        assert_eq!(field.advance(1.0), vec![7]);
        assert!(field.is_empty());
    }

    #[test]
    fn test_rotation_changes_every_tick() {
        let mut field = field();
        field.spawn(1, Vec3::new(0.0, 2.0, 0.0), Vec3::ONE, Axis::Z);
        let mut last = field.iter().next().unwrap().rotation;
        for _ in 0..5 {
            field.advance(1.0);
            let now = field.iter().next().unwrap().rotation;
            assert_ne!(now, last);
            last = now;
        }
    }

    #[test]
    fn test_spin_depends_on_cut_axis() {
        let mut field = field();
        let x_spin = field.spawn(1, Vec3::ZERO, Vec3::ONE, Axis::X).spin;
        let z_spin = field.spawn(2, Vec3::ZERO, Vec3::ONE, Axis::Z).spin;
        assert_ne!(x_spin, z_spin);
        assert!(x_spin.z > x_spin.x);
        assert!(z_spin.x > z_spin.z);
    }

    #[test]
    fn test_independent_lifetimes() {
        let mut field = field();
        field.spawn(1, Vec3::new(0.0, 0.0, 0.0), Vec3::ONE, Axis::X);
        field.spawn(2, Vec3::new(0.0, 4.0, 0.0), Vec3::ONE, Axis::Z);

        let mut retired = Vec::new();
        for _ in 0..50 {
            retired.extend(field.advance(1.0));
        }
        assert_eq!(retired, vec![1]);
        assert_eq!(field.len(), 1);
        assert_eq!(field.iter().next().unwrap().id, 2);
    }

    #[test]
    fn test_clear_returns_ids() {
        let mut field = field();
        field.spawn(3, Vec3::ZERO, Vec3::ONE, Axis::X);
        field.spawn(4, Vec3::ZERO, Vec3::ONE, Axis::X);
        let mut ids = field.clear();
        ids.sort();
        assert_eq!(ids, vec![3, 4]);
        assert!(field.is_empty());
    }
}
