//! Fluent builder for spawning an `AgentStore`.
//!
//! # Usage
//!
//! ```rust
//! use sw_agent::{AgentStoreBuilder, InitialHeading, SpawnShape};
//! use sw_core::World;
//!
//! let world = World::configure(800, 600).unwrap();
//! let store = AgentStoreBuilder::new(10_000, /*seed=*/ 42)
//!     .shape(SpawnShape::Ring)
//!     .heading(InitialHeading::Inward)
//!     .build(&world)
//!     .unwrap();
//!
//! assert_eq!(store.len(), 10_000);
//! ```
//!
//! Every random draw for agent `i` comes from an [`AgentRng`] seeded from the
//! global seed and `i`, in a fixed order (position, heading, color), so the same seed and options
//! always give the same population.

use std::f32::consts::{PI, TAU};

use sw_core::{AgentId, AgentRng, Point2, Rgb, SwarmError, SwarmResult, World, normalize_angle};

use crate::store::check_count;
use crate::{Agent, AgentStore};

/// Outer radius of the `Disc` and `Ring` shapes, as a fraction of the
/// smaller world extent.
const OUTER_RADIUS: f32 = 0.3;
/// Inner radius of the `Ring` shape, as a fraction of the smaller extent.
const RING_INNER_RADIUS: f32 = 0.1;

/// Region agents are placed in at creation.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SpawnShape {
    /// Anywhere in the world.
    Uniform,
    /// Area-uniform over a disc around the world center.
    #[default]
    Disc,
    /// Area-uniform over an annulus around the world center.
    Ring,
}

/// Initial heading rule.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InitialHeading {
    /// Uniform in `[0, 2π)`.
    Random,
    /// Pointing at the world center.
    Inward,
    /// Pointing away from the world center.
    #[default]
    Outward,
}

/// All spawn-time choices, in one serializable struct.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpawnOptions {
    pub shape:   SpawnShape,
    pub heading: InitialHeading,
    /// Colors picked uniformly per agent.  `None` builds a plain store.
    pub palette: Option<Vec<Rgb>>,
}

impl Default for SpawnOptions {
    fn default() -> Self {
        Self {
            shape:   SpawnShape::Disc,
            heading: InitialHeading::Outward,
            palette: Some(vec![Rgb::RED, Rgb::GREEN]),
        }
    }
}

/// Fluent builder for a spawned [`AgentStore`].
pub struct AgentStoreBuilder {
    count:   usize,
    seed:    u64,
    options: SpawnOptions,
}

impl AgentStoreBuilder {
    /// Create a builder for `count` agents using `seed` as the global RNG seed.
    pub fn new(count: usize, seed: u64) -> Self {
        Self {
            count,
            seed,
            options: SpawnOptions::default(),
        }
    }

    pub fn shape(mut self, shape: SpawnShape) -> Self {
        self.options.shape = shape;
        self
    }

    pub fn heading(mut self, heading: InitialHeading) -> Self {
        self.options.heading = heading;
        self
    }

    /// Give every agent a color drawn from `palette`.
    pub fn palette(mut self, palette: Vec<Rgb>) -> Self {
        self.options.palette = Some(palette);
        self
    }

    /// Build uncolored agents.
    pub fn plain(mut self) -> Self {
        self.options.palette = None;
        self
    }

    /// Replace all spawn options at once (e.g. from a config file).
    pub fn options(mut self, options: SpawnOptions) -> Self {
        self.options = options;
        self
    }

    /// Spawn the population.
    ///
    /// # Errors
    /// [`SwarmError::InvalidConfig`] if `count == 0` or the palette is empty.
    pub fn build(self, world: &World) -> SwarmResult<AgentStore> {
        check_count(self.count)?;
        if self.options.palette.as_ref().is_some_and(Vec::is_empty) {
            return Err(SwarmError::config("spawn palette must not be empty"));
        }

        let options = &self.options;
        AgentStore::create(self.count, |id: AgentId| {
            spawn_agent(options, world, &mut AgentRng::new(self.seed, id))
        })
    }
}

fn spawn_agent(options: &SpawnOptions, world: &World, rng: &mut AgentRng) -> Agent {
    let position = spawn_position(options.shape, world, rng);
    let center = world.center();
    let angle = match options.heading {
        InitialHeading::Random  => rng.angle(),
        InitialHeading::Inward  => normalize_angle(position.heading_to(center)),
        InitialHeading::Outward => normalize_angle(position.heading_to(center) + PI),
    };
    let color = options.palette.as_deref().and_then(|p| rng.choose(p).copied());
    Agent { position, angle, color }
}

fn spawn_position(shape: SpawnShape, world: &World, rng: &mut AgentRng) -> Point2 {
    let outer = OUTER_RADIUS * world.min_extent();
    match shape {
        SpawnShape::Uniform => Point2::new(
            rng.gen_range(0.0..world.width()),
            rng.gen_range(0.0..world.height()),
        ),
        SpawnShape::Disc => offset_in_annulus(world.center(), 0.0, outer, rng),
        SpawnShape::Ring => {
            let inner = RING_INNER_RADIUS * world.min_extent();
            offset_in_annulus(world.center(), inner, outer, rng)
        }
    }
}

/// Area-uniform sample from the annulus `min_r <= r <= max_r` around `center`.
fn offset_in_annulus(center: Point2, min_r: f32, max_r: f32, rng: &mut AgentRng) -> Point2 {
    let (r2_min, r2_max) = (min_r * min_r, max_r * max_r);
    let r = (rng.unit() * (r2_max - r2_min) + r2_min).sqrt();
    let t = rng.unit() * TAU;
    center.advanced(t, r)
}
