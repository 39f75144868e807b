//! Review-loop pipeline domain.

mod review;

pub use review::{PipelineState, ReviewVerdict};
