/*!
 * Monitoring Module
 * Structured logging for the bridge
 */

pub mod tracer;

pub use tracer::{generate_trace_id, init_tracing, SyscallSpan};
