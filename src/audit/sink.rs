use std::sync::{Mutex, PoisonError};

use super::envelope::AuditEnvelope;

// ============================================================================
// Audit Sinks
// ============================================================================
//
// The registry is handed a sink at construction. The binary opens a single
// tracing-backed sink for the process; tests use the in-memory one.
//
// ============================================================================

pub trait AuditSink: Send + Sync {
    fn record(&self, envelope: &AuditEnvelope);
}

/// Emits every envelope on the `audit` tracing target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, envelope: &AuditEnvelope) {
        let payload = envelope
            .to_json()
            .unwrap_or_else(|e| format!("{{\"serialization_error\":\"{e}\"}}"));
        let customer_id = envelope.event.customer_id();

        if envelope.event.is_rejection() {
            tracing::warn!(
                target: "audit",
                event_id = %envelope.event_id,
                event_type = %envelope.event_type,
                customer_id,
                payload = %payload,
                "Customer operation rejected"
            );
        } else {
            tracing::info!(
                target: "audit",
                event_id = %envelope.event_id,
                event_type = %envelope.event_type,
                customer_id,
                payload = %payload,
                "Customer operation recorded"
            );
        }
    }
}

/// Keeps every envelope in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    entries: Mutex<Vec<AuditEnvelope>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<AuditEnvelope> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn event_types(&self) -> Vec<String> {
        self.entries().into_iter().map(|e| e.event_type).collect()
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, envelope: &AuditEnvelope) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(envelope.clone());
    }
}
