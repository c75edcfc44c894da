//! `sw-steer`: heading rules for the step core.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                       |
//! |-------------|----------------------------------------------------------------|
//! | [`context`] | `StepContext<'a>`, `MotionParams`: read-only per-step inputs  |
//! | [`model`]   | `Steering` trait                                               |
//! | [`straight`]| `Straight`: never turns                                       |
//! | [`rules`]   | `RandomTurn`, `Spin`                                           |
//!
//! # Design notes
//!
//! A steering rule decides how far one agent turns this step.  It receives
//! that agent's committed record, the shared [`StepContext`] and an RNG
//! seeded from those two, and nothing else: the context carries no reference to the store,
//! so a rule has no way to read another agent.  That is what lets sw-sim run
//! the rule for every agent at once.

pub mod context;
pub mod model;
pub mod rules;
pub mod straight;


pub use context::{MotionParams, StepContext};
pub use model::Steering;
pub use rules::{RandomTurn, Spin};
pub use straight::Straight;
