use std::fmt;
use std::fs;
use std::path::Path;

use super::errors::FileError;
use crate::domain::customer::{CorporateCustomer, Customer, PremiumCustomer, PremiumTier, REGULAR_BENEFIT};
use crate::registry::CustomerRegistry;

// ============================================================================
// Text Summary Report
// ============================================================================
//
// Totals by type, then one section per kind with aggregate benefit figures
// and a table of customers sorted by ascending ID.
//
// ============================================================================

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TierDistribution {
    pub silver: usize,
    pub gold: usize,
    pub platinum: usize,
    pub other: usize,
}

fn average(values: &[u32]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().map(|v| f64::from(*v)).sum::<f64>() / values.len() as f64)
}

pub fn tier_distribution(customers: &[Customer]) -> TierDistribution {
    let mut dist = TierDistribution::default();
    for customer in customers {
        if let Customer::Premium(p) = customer {
            match PremiumTier::parse(p.tier()) {
                Some(PremiumTier::Silver) => dist.silver += 1,
                Some(PremiumTier::Gold) => dist.gold += 1,
                Some(PremiumTier::Platinum) => dist.platinum += 1,
                None => dist.other += 1,
            }
        }
    }
    dist
}

pub fn render_report(registry: &CustomerRegistry) -> String {
    SummaryReport { registry }.to_string()
}

struct SummaryReport<'a> {
    registry: &'a CustomerRegistry,
}

impl fmt::Display for SummaryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.registry.summary_by_type();

        let mut sorted: Vec<&Customer> = self.registry.list().iter().collect();
        sorted.sort_by_key(|c| c.id());

        let premium: Vec<_> = sorted
            .iter()
            .filter_map(|c| match c {
                Customer::Premium(p) => Some((*c, p)),
                _ => None,
            })
            .collect();
        let corporate: Vec<_> = sorted
            .iter()
            .filter_map(|c| match c {
                Customer::Corporate(corp) => Some((*c, corp)),
                _ => None,
            })
            .collect();
        let regular: Vec<&Customer> = sorted
            .iter()
            .copied()
            .filter(|c| matches!(c, Customer::Regular(_)))
            .collect();

        writeln!(f, "Customer summary report")?;
        writeln!(f, "=======================\n")?;
        writeln!(f, "Total customers: {}", summary.total)?;
        writeln!(f, "Regular: {}", summary.regular)?;
        writeln!(f, "Premium: {}", summary.premium)?;
        writeln!(f, "Corporate: {}", summary.corporate)?;

        writeln!(f, "\n--- Details and benefits ---")?;
        write_premium(f, &premium, tier_distribution(self.registry.list()))?;
        write_corporate(f, &corporate)?;
        write_regular(f, &regular)?;

        writeln!(f, "\n\nEnd of report.")
    }
}

fn write_premium(
    f: &mut fmt::Formatter<'_>,
    premium: &[(&Customer, &PremiumCustomer)],
    dist: TierDistribution,
) -> fmt::Result {
    let discounts: Vec<u32> = premium.iter().map(|(_, p)| p.benefit().discount).collect();

    writeln!(f, "\n[Premium]")?;
    writeln!(f, "Tier distribution:")?;
    writeln!(f, "  - Silver: {}", dist.silver)?;
    writeln!(f, "  - Gold: {}", dist.gold)?;
    writeln!(f, "  - Platinum: {}", dist.platinum)?;
    if dist.other > 0 {
        writeln!(f, "  - Other: {}", dist.other)?;
    }
    writeln!(
        f,
        "Average premium discount: {:.2}%\n",
        average(&discounts).unwrap_or(0.0)
    )?;

    if premium.is_empty() {
        return writeln!(f, "No premium customers.");
    }
    writeln!(f, "ID | Name | Tier | Desc% | SLA(h) | Free Shipping | Email")?;
    writeln!(f, "{}", "-".repeat(78))?;
    for (c, p) in premium {
        let b = p.benefit();
        writeln!(
            f,
            "{} | {} | {} | {} | {} | {} | {}",
            c.id(),
            c.name(),
            p.tier(),
            b.discount,
            b.sla_hours,
            if b.free_shipping { "Yes" } else { "No" },
            c.email()
        )?;
    }
    Ok(())
}

fn write_corporate(f: &mut fmt::Formatter<'_>, corporate: &[(&Customer, &CorporateCustomer)]) -> fmt::Result {
    let discounts: Vec<u32> = corporate.iter().map(|(_, c)| c.benefit().volume_discount).collect();
    let billing: Vec<u32> = corporate.iter().map(|(_, c)| c.benefit().billing_days).collect();

    writeln!(f, "\n\n[Corporate]")?;
    match average(&discounts) {
        Some(avg) => writeln!(f, "Average volume discount: {avg:.2}%")?,
        None => writeln!(f, "Average volume discount: N/A")?,
    }
    match average(&billing) {
        Some(avg) => writeln!(f, "Average billing terms: {avg:.2} days\n")?,
        None => writeln!(f, "Average billing terms: N/A\n")?,
    }

    if corporate.is_empty() {
        return writeln!(f, "No corporate customers.");
    }
    writeln!(f, "ID | Name | Company | Executive | VolDesc% | Billing(d) | Email")?;
    writeln!(f, "{}", "-".repeat(82))?;
    for (c, corp) in corporate {
        let b = corp.benefit();
        writeln!(
            f,
            "{} | {} | {} | {} | {} | {} | {}",
            c.id(),
            c.name(),
            corp.company(),
            b.executive,
            b.volume_discount,
            b.billing_days,
            c.email()
        )?;
    }
    Ok(())
}

fn write_regular(f: &mut fmt::Formatter<'_>, regular: &[&Customer]) -> fmt::Result {
    writeln!(f, "\n\n[Regular]")?;
    writeln!(f, "Benefit: {REGULAR_BENEFIT}\n")?;
    if regular.is_empty() {
        return writeln!(f, "No regular customers.");
    }
    writeln!(f, "ID | Name | Email")?;
    writeln!(f, "{}", "-".repeat(50))?;
    for c in regular {
        writeln!(f, "{} | {} | {}", c.id(), c.name(), c.email())?;
    }
    Ok(())
}

pub fn write_report(path: impl AsRef<Path>, registry: &CustomerRegistry) -> Result<(), FileError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| FileError::io(parent, e))?;
    }
    fs::write(path, render_report(registry)).map_err(|e| FileError::io(path, e))?;
    tracing::debug!(path = %path.display(), "Report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::audit::MemoryAuditSink;

    fn populated() -> CustomerRegistry {
        let mut registry = CustomerRegistry::new(Arc::new(MemoryAuditSink::new()));
        registry
            .add(Customer::premium(5, "Zoe", "zoe@x.com", "12345678", "Calle 123", "gold").unwrap())
            .unwrap();
        registry
            .add(Customer::premium(2, "Luis", "luis@x.com", "12345678", "Calle 123", "platinum").unwrap())
            .unwrap();
        registry
            .add(Customer::premium(7, "Eva", "eva@x.com", "12345678", "Calle 123", "bronze").unwrap())
            .unwrap();
        registry
            .add(Customer::corporate(3, "Marta", "m@acme.com", "12345678", "Parque 9", "ACME", "Jorge").unwrap())
            .unwrap();
        registry
            .add(Customer::regular(1, "Ana", "ana@x.com", "12345678", "Calle 123").unwrap())
            .unwrap();
        registry
    }

    #[test]
    fn test_tier_distribution_counts_other() {
        let registry = populated();
        assert_eq!(
            tier_distribution(registry.list()),
            TierDistribution { silver: 0, gold: 1, platinum: 1, other: 1 }
        );
    }

    #[test]
    fn test_report_totals_and_averages() {
        let report = render_report(&populated());

        assert!(report.contains("Total customers: 5\n"));
        assert!(report.contains("Premium: 3\n"));
        assert!(report.contains("  - Other: 1\n"));
        // (10 + 15 + 5) / 3
        assert!(report.contains("Average premium discount: 10.00%"));
        assert!(report.contains("Average volume discount: 12.00%"));
        assert!(report.contains("Average billing terms: 30.00 days"));
        assert!(report.contains("3 | Marta | ACME | Jorge | 12 | 30 | m@acme.com"));
    }

    #[test]
    fn test_premium_rows_sorted_by_id() {
        let report = render_report(&populated());
        let luis = report.find("2 | Luis").unwrap();
        let zoe = report.find("5 | Zoe").unwrap();
        let eva = report.find("7 | Eva").unwrap();
        assert!(luis < zoe && zoe < eva);
    }

    #[test]
    fn test_empty_registry_report() {
        let registry = CustomerRegistry::new(Arc::new(MemoryAuditSink::new()));
        let report = render_report(&registry);

        assert!(report.contains("Total customers: 0"));
        assert!(report.contains("Average premium discount: 0.00%"));
        assert!(report.contains("Average volume discount: N/A"));
        assert!(report.contains("No premium customers."));
        assert!(report.contains("No corporate customers."));
        assert!(report.contains("No regular customers."));
        assert!(!report.contains("Other:"));
    }

    #[test]
    fn test_write_report_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("summary.txt");
        write_report(&path, &populated()).unwrap();
        assert!(fs::read_to_string(&path).unwrap().ends_with("End of report.\n"));
    }
}
