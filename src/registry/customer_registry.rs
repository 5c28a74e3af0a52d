use std::sync::Arc;

use crate::audit::{AuditEnvelope, AuditSink};
use crate::domain::customer::{
    normalize_email, Customer, CustomerAdded, CustomerError, CustomerEvent, CustomerKind,
    CustomerRemoved, CustomerUpdate, CustomerUpdated, DuplicateEmailRejected,
    DuplicateIdRejected, TypeSummary,
};
use crate::metrics::RegistryMetrics;

// ============================================================================
// Customer Registry - In-memory Authoritative Collection
// ============================================================================
//
// Responsibilities:
// 1. Keep customers in insertion order
// 2. Enforce unique IDs and unique normalized emails
// 3. Report every mutation and rejection to the audit sink
//
// Mutation takes `&mut self`, so each check-then-act sequence runs without
// interleaving.
//
// ============================================================================

pub struct CustomerRegistry {
    customers: Vec<Customer>,
    audit: Arc<dyn AuditSink>,
    metrics: Option<Arc<RegistryMetrics>>,
}

impl CustomerRegistry {
    pub fn new(audit: Arc<dyn AuditSink>) -> Self {
        Self {
            customers: Vec::new(),
            audit,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<RegistryMetrics>) -> Self {
        metrics.update_membership(&self.summary_by_type());
        self.metrics = Some(metrics);
        self
    }

    pub fn list(&self) -> &[Customer] {
        &self.customers
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Case-insensitive. `exclude_id` skips the record being updated.
    pub fn email_exists(&self, email: &str, exclude_id: Option<u64>) -> bool {
        let email = normalize_email(email);
        self.customers
            .iter()
            .any(|c| c.email() == email && Some(c.id()) != exclude_id)
    }

    pub fn add(&mut self, customer: Customer) -> Result<&Customer, CustomerError> {
        let id = customer.id();

        if self.position(id).is_some() {
            self.emit(CustomerEvent::DuplicateIdRejected(DuplicateIdRejected { id }));
            self.observe("add", "duplicate_id");
            return Err(CustomerError::DuplicateId(id));
        }

        if self.email_exists(customer.email(), None) {
            let email = customer.email().to_string();
            self.emit(CustomerEvent::DuplicateEmailRejected(DuplicateEmailRejected {
                id,
                email: email.clone(),
            }));
            self.observe("add", "duplicate_email");
            return Err(CustomerError::DuplicateEmail(email));
        }

        let kind = customer.kind();
        self.customers.push(customer);
        self.emit(CustomerEvent::Added(CustomerAdded { id, kind }));
        self.observe("add", "ok");

        let index = self.customers.len() - 1;
        Ok(&self.customers[index])
    }

    pub fn find_by_id(&self, id: u64) -> Result<&Customer, CustomerError> {
        self.customers
            .iter()
            .find(|c| c.id() == id)
            .ok_or(CustomerError::NotFound(id))
    }

    /// Apply a partial update. The fields are applied to a copy and the copy
    /// replaces the stored customer only when every field passed validation;
    /// on any error the stored customer is unchanged.
    pub fn update(&mut self, id: u64, update: &CustomerUpdate) -> Result<&Customer, CustomerError> {
        let index = match self.position(id) {
            Some(index) => index,
            None => {
                self.observe("update", "not_found");
                return Err(CustomerError::NotFound(id));
            }
        };

        if let Some(ref email) = update.email {
            if self.email_exists(email, Some(id)) {
                let email = normalize_email(email);
                self.emit(CustomerEvent::DuplicateEmailRejected(DuplicateEmailRejected {
                    id,
                    email: email.clone(),
                }));
                self.observe("update", "duplicate_email");
                return Err(CustomerError::DuplicateEmail(email));
            }
        }

        let mut staged = self.customers[index].clone();
        if let Err(e) = staged.apply(update) {
            self.observe("update", "invalid");
            return Err(e.into());
        }

        self.customers[index] = staged;
        self.emit(CustomerEvent::Updated(CustomerUpdated { id }));
        self.observe("update", "ok");

        Ok(&self.customers[index])
    }

    pub fn remove(&mut self, id: u64) -> Result<Customer, CustomerError> {
        let index = match self.position(id) {
            Some(index) => index,
            None => {
                self.observe("remove", "not_found");
                return Err(CustomerError::NotFound(id));
            }
        };

        let removed = self.customers.remove(index);
        self.emit(CustomerEvent::Removed(CustomerRemoved {
            id,
            kind: removed.kind(),
        }));
        self.observe("remove", "ok");

        Ok(removed)
    }

    pub fn summary_by_type(&self) -> TypeSummary {
        let mut summary = TypeSummary::default();
        for customer in &self.customers {
            match customer.kind() {
                CustomerKind::Regular => summary.regular += 1,
                CustomerKind::Premium => summary.premium += 1,
                CustomerKind::Corporate => summary.corporate += 1,
            }
        }
        summary.total = self.customers.len();
        summary
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.customers.iter().position(|c| c.id() == id)
    }

    fn emit(&self, event: CustomerEvent) {
        self.audit.record(&AuditEnvelope::new(event));
    }

    fn observe(&self, operation: &str, outcome: &str) {
        if let Some(ref metrics) = self.metrics {
            metrics.record_operation(operation, outcome);
            metrics.update_membership(&self.summary_by_type());
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
