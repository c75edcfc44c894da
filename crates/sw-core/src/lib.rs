//! `sw-core`: foundational types for the `rust_swarm` agent simulation.
//!
//! This crate is a dependency of every other `sw-*` crate.  It intentionally
//! has no `sw-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                             |
//! | [`point`]       | `Point2`, heading helpers                             |
//! | [`color`]       | `Rgb`, hue conversion                                 |
//! | [`world`]       | `Size`, `World` (immutable bounds for a run)          |
//! | [`boundary`]    | `BoundaryPolicy` (wrap / clamp), `normalize_angle`    |
//! | [`time`]        | `Tick`, `StepClock`                                   |
//! | [`config`]      | `SimConfig`, `ColorPolicy`                            |
//! | [`rng`]         | `AgentRng` (spawn- and state-seeded, deterministic)  |
//! | [`error`]       | `SwarmError`, `SwarmResult`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required to load `SimConfig` from a file.                  |

pub mod boundary;
pub mod color;
pub mod config;
pub mod error;
pub mod ids;
pub mod point;
pub mod rng;
pub mod time;
pub mod world;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use boundary::{BoundaryPolicy, normalize_angle};
pub use color::Rgb;
pub use config::{ColorPolicy, DEFAULT_POPULATION, SimConfig, validate_dt};
pub use error::{SwarmError, SwarmResult};
pub use ids::AgentId;
pub use point::Point2;
pub use rng::AgentRng;
pub use time::{StepClock, Tick};
pub use world::{Size, World};
