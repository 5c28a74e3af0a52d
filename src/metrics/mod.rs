use prometheus::{Encoder, IntCounterVec, IntGaugeVec, Opts, Registry, TextEncoder};

use crate::domain::customer::{CustomerKind, TypeSummary};

// ============================================================================
// Metrics Module - Prometheus metrics for the customer registry
// ============================================================================
//
// Provides:
// - Registry operation outcomes (add/update/remove/find by result)
// - Current membership by customer kind
//
// There is no scrape endpoint; the menu renders the text exposition format
// on demand.
// ============================================================================

pub struct RegistryMetrics {
    registry: Registry,

    pub operations: IntCounterVec,
    pub customers: IntGaugeVec,
}

impl RegistryMetrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let operations = IntCounterVec::new(
            Opts::new("customer_registry_operations_total", "Registry operations by outcome"),
            &["operation", "outcome"],
        )?;
        registry.register(Box::new(operations.clone()))?;

        let customers = IntGaugeVec::new(
            Opts::new("customer_registry_customers", "Customers currently registered by kind"),
            &["kind"],
        )?;
        registry.register(Box::new(customers.clone()))?;

        Ok(Self {
            registry,
            operations,
            customers,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Helper to record an operation outcome ("ok", "duplicate_id", ...)
    pub fn record_operation(&self, operation: &str, outcome: &str) {
        self.operations.with_label_values(&[operation, outcome]).inc();
    }

    /// Helper to refresh the membership gauges from a summary
    pub fn update_membership(&self, summary: &TypeSummary) {
        for kind in CustomerKind::ALL {
            self.customers
                .with_label_values(&[kind.record_tag()])
                .set(summary.count(kind) as i64);
        }
    }

    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
