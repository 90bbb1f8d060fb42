//! Universe simulation module
//!
//! All motion and lifecycle rules live here:
//! - Seeded RNG only (owned by the state)
//! - Rules are per tick, the frame loop supplies a fixed timestep
//! - No rendering or platform dependencies

pub mod ambient;
pub mod collision;
pub mod gravity;
pub mod reset;
pub mod state;
pub mod tick;

pub use ambient::{center_star_radius, star_brightness};
pub use collision::{MergeOutcome, resolve_one_collision};
pub use gravity::apply_center_gravity;
pub use reset::begin_reset;
pub use state::{
    BlackHole, BurstColor, Meteor, Particle, Planet, ResetPhase, Satellite, Snapshot, Star, Ufo,
    UniverseEvent, UniverseState,
};
pub use tick::{TickInput, tick};
