// ============================================================================
// Audit Trail
// ============================================================================
//
// The only logging the core does: registry mutations and rejections, wrapped
// in envelopes and passed to an injected sink.
//
// ============================================================================

mod envelope;
mod sink;

pub use envelope::AuditEnvelope;
pub use sink::{AuditSink, MemoryAuditSink, TracingAuditSink};
