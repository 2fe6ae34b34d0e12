/*!
 * Monitoring
 * Structured logging for every universe process
 */

mod tracer;

pub use tracer::init_tracing;
