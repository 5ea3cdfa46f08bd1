//! Image generation: aspect-ratio vocabulary, the provider client, and the
//! batching orchestrator that drives it.

pub mod batch;
pub mod client;
pub mod ratio;

pub use batch::{run_batches, BatchSink, GenerationTask, BATCH_WIDTH};
pub use client::{ImageBackend, ImageClient};
pub use ratio::AspectRatio;
