mod pipeline;

pub use pipeline::{Pipeline, PipelineCreationError, SupplierError};
