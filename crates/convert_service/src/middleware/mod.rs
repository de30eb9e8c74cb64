pub mod tracing_middleware;

pub use tracing_middleware::{RequestTracing, TRACE_ID_HEADER};
