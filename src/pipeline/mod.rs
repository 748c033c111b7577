//! Assembly and execution of the two-pass pipeline.

mod builder;
mod config;
mod orchestrator;
mod sources;

pub use builder::PipelineBuilder;
pub use config::{PipelineConfig, RenderOptions, RenderOutput};
pub use orchestrator::DocumentPipeline;
