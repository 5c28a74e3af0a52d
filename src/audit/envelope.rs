use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::customer::CustomerEvent;

// ============================================================================
// Audit Envelope
// ============================================================================
//
// Wraps a customer event with identity and timing metadata before it is
// handed to a sink.
//
// ============================================================================

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AuditEnvelope {
    pub event_id: Uuid,
    pub event_type: String,
    pub timestamp: DateTime<Utc>,
    pub event: CustomerEvent,
}

impl AuditEnvelope {
    pub fn new(event: CustomerEvent) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            event_type: event.event_type().to_string(),
            timestamp: Utc::now(),
            event,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
