//! `sw-agent`: the Agent State Store for the `rust_swarm` simulation.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`agent`]     | `Agent` record, `ColorLayout`                                |
//! | [`store`]     | `AgentStore` (double-buffered)                               |
//! | [`snapshot`]  | `Snapshot`: immutable, ordered copy of a committed step     |
//! | [`builder`]   | `AgentStoreBuilder`, `SpawnShape`, `InitialHeading`          |
//! | [`loader`]    | CSV population loader                                        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Agent` and spawn types.|

pub mod agent;
pub mod builder;
pub mod loader;
pub mod snapshot;
pub mod store;


pub use agent::{Agent, ColorLayout};
pub use builder::{AgentStoreBuilder, InitialHeading, SpawnOptions, SpawnShape};
pub use loader::{load_agents, load_agents_reader};
pub use snapshot::Snapshot;
pub use store::AgentStore;
