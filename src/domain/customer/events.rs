use serde::{Deserialize, Serialize};

use super::value_objects::CustomerKind;

// ============================================================================
// Customer Audit Events
// ============================================================================

/// Facts the registry reports to its audit sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CustomerEvent {
    Added(CustomerAdded),
    DuplicateIdRejected(DuplicateIdRejected),
    DuplicateEmailRejected(DuplicateEmailRejected),
    Updated(CustomerUpdated),
    Removed(CustomerRemoved),
}

impl CustomerEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            CustomerEvent::Added(_) => "CustomerAdded",
            CustomerEvent::DuplicateIdRejected(_) => "DuplicateIdRejected",
            CustomerEvent::DuplicateEmailRejected(_) => "DuplicateEmailRejected",
            CustomerEvent::Updated(_) => "CustomerUpdated",
            CustomerEvent::Removed(_) => "CustomerRemoved",
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            CustomerEvent::DuplicateIdRejected(_) | CustomerEvent::DuplicateEmailRejected(_)
        )
    }

    pub fn customer_id(&self) -> u64 {
        match self {
            CustomerEvent::Added(e) => e.id,
            CustomerEvent::DuplicateIdRejected(e) => e.id,
            CustomerEvent::DuplicateEmailRejected(e) => e.id,
            CustomerEvent::Updated(e) => e.id,
            CustomerEvent::Removed(e) => e.id,
        }
    }
}

// Individual event types

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerAdded {
    pub id: u64,
    pub kind: CustomerKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateIdRejected {
    pub id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateEmailRejected {
    pub id: u64,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerUpdated {
    pub id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRemoved {
    pub id: u64,
    pub kind: CustomerKind,
}
