//! Test arena: a flat floor with a few boxes the use ray can hit.
//!
//! Doors toggle every time they are used, switches latch on the first use,
//! and walls have no usable capability at all.

use std::cell::Cell;
use std::rc::Rc;

use fps_player::{Interactable, Level, Mover, RayCaster, RayHit, Usable};
use glam::Vec3;
use tracing::info;

/// Eye height above the floor the player spawns at.
pub const EYE_HEIGHT: f32 = 1.7;

/// Counters shared between the arena props and the run summary.
#[derive(Debug, Default)]
pub struct ArenaStats {
    /// Number of door toggles.
    pub door_toggles: Cell<u32>,
    /// Number of switch presses that latched.
    pub switch_presses: Cell<u32>,
    /// Number of level reloads.
    pub reloads: Cell<u32>,
}

/// Axis-aligned box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Box centered at `center` with the given half extents.
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Slab test: distance along `direction` to the first point inside the box.
    /// Origins inside the box hit at distance zero.
    pub fn ray_distance(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;

        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);
            if d.abs() < f32::EPSILON {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let t1 = (lo - o) / d;
            let t2 = (hi - o) / d;
            t_near = t_near.max(t1.min(t2));
            t_far = t_far.min(t1.max(t2));
        }

        if t_far < t_near.max(0.0) {
            return None;
        }
        Some(t_near.max(0.0))
    }
}

/// A door that opens and closes on use.
pub struct Door {
    name: &'static str,
    open: bool,
    stats: Rc<ArenaStats>,
}

impl Door {
    /// Closed door.
    pub fn new(name: &'static str, stats: Rc<ArenaStats>) -> Self {
        Self {
            name,
            open: false,
            stats,
        }
    }
}

impl Usable for Door {
    fn try_use(&mut self) {
        self.open = !self.open;
        self.stats.door_toggles.set(self.stats.door_toggles.get() + 1);
        info!(door = self.name, open = self.open, "door used");
    }
}

impl Interactable for Door {
    fn as_usable(&mut self) -> Option<&mut dyn Usable> {
        Some(self)
    }
}

/// A switch that latches on the first use and ignores later ones.
pub struct Switch {
    name: &'static str,
    pressed: bool,
    stats: Rc<ArenaStats>,
}

impl Switch {
    /// Unpressed switch.
    pub fn new(name: &'static str, stats: Rc<ArenaStats>) -> Self {
        Self {
            name,
            pressed: false,
            stats,
        }
    }
}

impl Usable for Switch {
    fn try_use(&mut self) {
        if self.pressed {
            return;
        }
        self.pressed = true;
        self.stats
            .switch_presses
            .set(self.stats.switch_presses.get() + 1);
        info!(switch = self.name, "switch pressed");
    }
}

impl Interactable for Switch {
    fn as_usable(&mut self) -> Option<&mut dyn Usable> {
        Some(self)
    }
}

/// Plain geometry.
pub struct Wall;

impl Interactable for Wall {}

struct Prop {
    bounds: Aabb,
    object: Box<dyn Interactable>,
}

/// Ray caster over the arena props.
#[derive(Default)]
pub struct ArenaRays {
    props: Vec<Prop>,
}

impl ArenaRays {
    /// Place an object in the arena.
    pub fn add(&mut self, bounds: Aabb, object: impl Interactable + 'static) {
        self.props.push(Prop {
            bounds,
            object: Box::new(object),
        });
    }
}

impl RayCaster for ArenaRays {
    fn cast(&mut self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit<'_>> {
        let (index, distance) = self
            .props
            .iter()
            .enumerate()
            .filter_map(|(i, prop)| {
                prop.bounds
                    .ray_distance(origin, direction)
                    .filter(|&t| t <= max_distance)
                    .map(|t| (i, t))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))?;

        Some(RayHit {
            distance,
            point: origin + direction * distance,
            target: self.props[index].object.as_mut(),
        })
    }
}

/// Build the default arena: a door 2.5 m ahead of spawn, a switch to the
/// right, and walls behind both.
pub fn build_arena(stats: &Rc<ArenaStats>) -> ArenaRays {
    let mut rays = ArenaRays::default();
    rays.add(
        Aabb::from_center(Vec3::new(0.0, 1.0, -2.5 - 0.1), Vec3::new(0.6, 1.0, 0.1)),
        Door::new("north door", stats.clone()),
    );
    rays.add(
        Aabb::from_center(Vec3::new(2.5, 1.7, 0.0), Vec3::new(0.1, 0.2, 0.2)),
        Switch::new("east switch", stats.clone()),
    );
    rays.add(
        Aabb::from_center(Vec3::new(0.0, 2.0, -10.0), Vec3::new(10.0, 2.0, 0.2)),
        Wall,
    );
    rays.add(
        Aabb::from_center(Vec3::new(10.0, 2.0, 0.0), Vec3::new(0.2, 2.0, 10.0)),
        Wall,
    );
    rays
}

/// Moves the player over a flat floor; the body position is the eye point.
#[derive(Debug)]
pub struct ArenaMover {
    position: Vec3,
    floor_y: f32,
}

impl ArenaMover {
    /// Spawn on the floor at `floor_y`.
    pub fn new(spawn_xz: Vec3, floor_y: f32) -> Self {
        Self {
            position: Vec3::new(spawn_xz.x, floor_y + EYE_HEIGHT, spawn_xz.z),
            floor_y,
        }
    }
}

impl Mover for ArenaMover {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn move_by(&mut self, displacement: Vec3) -> bool {
        self.position += displacement;
        let ground = self.floor_y + EYE_HEIGHT;
        if self.position.y <= ground {
            self.position.y = ground;
            true
        } else {
            false
        }
    }
}

/// Level handle that counts reloads.
pub struct SimLevel {
    stats: Rc<ArenaStats>,
}

impl SimLevel {
    /// Level sharing the run counters.
    pub fn new(stats: Rc<ArenaStats>) -> Self {
        Self { stats }
    }
}

impl Level for SimLevel {
    fn reload_current_level(&mut self) {
        self.stats.reloads.set(self.stats.reloads.get() + 1);
        info!(reloads = self.stats.reloads.get(), "reloading level");
    }
}
