//! Pooled particle emitters. Simulation runs on the fixed tick; drawing is a
//! separate read-only pass through the render bridge.

mod pool;
mod source;

pub use avanto_render_bridge::ParticlePair;
pub use pool::{DEFAULT_MAX_SOURCES, ParticlePool};
pub use source::{EffectKind, ParticleMeta, ParticleSource, SteamParams};
