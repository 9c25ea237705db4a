//! # originals-lifecycle — The `Original` Aggregate and Its State Machine
//!
//! Implements spec §3 (`Original`/`Resource`) and §4.11 (`LifecycleEngine`):
//! the composition root wiring `originals-did`'s resolver traits to their
//! concrete `originals-webvh`/`originals-ordinals` implementations, and the
//! guarded transitions moving an original through `peer -> webvh -> btco`.

pub mod engine;
pub mod error;
pub mod original;
pub mod resource;

pub use engine::{InscriptionRequest, LifecycleEngine, LifecycleEngineConfig};
pub use error::LifecycleError;
pub use original::{Original, PREVIOUS_ENTRY_HASH_FIELD};
pub use resource::{Resource, ResourceLocation};
