use std::io::{BufRead, Write};
use std::sync::Arc;

use super::prompt::{Prompter, ShellError};
use crate::config::AppConfig;
use crate::domain::customer::{
    Customer, CustomerKind, CustomerUpdate, RegisterCustomer, REGULAR_BENEFIT,
};
use crate::files::{export_csv, import_csv, register_batch, write_report};
use crate::metrics::RegistryMetrics;
use crate::registry::CustomerRegistry;

const MENU: &str = "\n=== Customer Registry ===\n\
1) Add customer\n\
2) List customers\n\
3) Find customer by ID\n\
4) Update customer\n\
5) Remove customer\n\
6) Import from CSV\n\
7) Export to CSV\n\
8) Generate text report\n\
9) Show metrics\n\
0) Exit";

/// Interactive session over a registry.
pub struct Shell<R, W> {
    prompter: Prompter<R, W>,
    registry: CustomerRegistry,
    config: AppConfig,
    metrics: Option<Arc<RegistryMetrics>>,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W, registry: CustomerRegistry, config: AppConfig) -> Self {
        Self {
            prompter: Prompter::new(input, output),
            registry,
            config,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<RegistryMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn into_parts(self) -> (CustomerRegistry, W) {
        (self.registry, self.prompter.into_output())
    }

    /// Run until the operator chooses exit or input ends.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            self.prompter.say(MENU)?;
            let choice = match self.prompter.text("Option: ") {
                Ok(choice) => choice,
                Err(ShellError::Eof) => break,
                Err(e) => return Err(e.into()),
            };

            if choice == "0" {
                self.prompter.say("Goodbye.")?;
                break;
            }

            match self.dispatch(&choice) {
                Ok(()) => {}
                Err(ShellError::Eof) => break,
                Err(e) if e.is_fatal() => return Err(e.into()),
                Err(e) => {
                    tracing::debug!(option = %choice, error = %e, "Menu operation failed");
                    self.prompter.say(format!("Error: {e}"))?;
                }
            }
        }

        Ok(())
    }

    fn dispatch(&mut self, choice: &str) -> Result<(), ShellError> {
        match choice {
            "1" => self.add_customer(),
            "2" => self.list_customers(),
            "3" => self.find_customer(),
            "4" => self.update_customer(),
            "5" => self.remove_customer(),
            "6" => self.import(),
            "7" => self.export(),
            "8" => self.report(),
            "9" => self.show_metrics(),
            _ => self.prompter.say("Invalid option."),
        }
    }

    fn add_customer(&mut self) -> Result<(), ShellError> {
        let tag = self.prompter.text("Type (regular/premium/corporativo): ")?;
        let kind = CustomerKind::from_tag(&tag);
        let mut command = RegisterCustomer {
            kind,
            id: self.prompter.number("ID: ")?,
            name: self.prompter.text("Name: ")?,
            email: self.prompter.text("Email: ")?,
            phone: self.prompter.text("Phone: ")?,
            address: self.prompter.text("Address: ")?,
            ..Default::default()
        };

        match kind {
            Some(CustomerKind::Premium) => {
                command.tier = self.prompter.optional("Tier (silver/gold/platinum) [gold]: ")?;
            }
            Some(CustomerKind::Corporate) => {
                command.company = self.prompter.text("Company: ")?;
                command.contact = self.prompter.text("Contact/Executive: ")?;
            }
            _ => {}
        }

        let customer = command.build()?;
        let added = self.registry.add(customer)?;
        let line = benefit_line(added);
        self.prompter.say("Customer added.")?;
        self.prompter.say(line)
    }

    fn list_customers(&mut self) -> Result<(), ShellError> {
        if self.registry.is_empty() {
            return self.prompter.say("No customers loaded.");
        }
        let lines: Vec<String> = self.registry.list().iter().map(Customer::display_info).collect();
        for line in lines {
            self.prompter.say(line)?;
        }
        Ok(())
    }

    fn find_customer(&mut self) -> Result<(), ShellError> {
        let id = self.prompter.number("ID to find: ")?;
        let customer = self.registry.find_by_id(id)?;
        let (info, benefit) = (customer.display_info(), benefit_line(customer));
        self.prompter.say("Found:")?;
        self.prompter.say(info)?;
        self.prompter.say(benefit)
    }

    fn update_customer(&mut self) -> Result<(), ShellError> {
        let id = self.prompter.number("ID to update: ")?;
        let kind = self.registry.find_by_id(id)?.kind();

        self.prompter.say("Leave a field blank to keep it.")?;
        let mut update = CustomerUpdate {
            name: self.prompter.optional("New name: ")?,
            email: self.prompter.optional("New email: ")?,
            phone: self.prompter.optional("New phone: ")?,
            address: self.prompter.optional("New address: ")?,
            ..Default::default()
        };

        match kind {
            CustomerKind::Premium => {
                update.tier = self.prompter.optional("New tier (silver/gold/platinum): ")?;
            }
            CustomerKind::Corporate => {
                update.company = self.prompter.optional("New company: ")?;
                update.contact = self.prompter.optional("New contact/executive: ")?;
            }
            CustomerKind::Regular => {}
        }

        if update.is_empty() {
            return self.prompter.say("Nothing to update.");
        }

        let updated = self.registry.update(id, &update)?;
        let (info, benefit) = (updated.display_info(), benefit_line(updated));
        self.prompter.say("Customer updated:")?;
        self.prompter.say(info)?;
        self.prompter.say(benefit)
    }

    fn remove_customer(&mut self) -> Result<(), ShellError> {
        let id = self.prompter.number("ID to remove: ")?;
        self.registry.remove(id)?;
        self.prompter.say("Customer removed.")
    }

    fn import(&mut self) -> Result<(), ShellError> {
        let batch = import_csv(&self.config.input)?;
        for rejected in &batch.rejected {
            let line = format!("  line {}: {}", rejected.line, rejected.error);
            self.prompter.say(line)?;
        }
        let report = register_batch(&mut self.registry, batch);
        self.prompter.say(format!(
            "Import finished. Added: {} | Duplicates skipped: {} | Invalid rows: {}",
            report.added, report.duplicates, report.invalid
        ))
    }

    fn export(&mut self) -> Result<(), ShellError> {
        let rows = export_csv(&self.config.output, self.registry.list())?;
        let path = self.config.output.display().to_string();
        self.prompter.say(format!("Exported {rows} customers to {path}"))
    }

    fn report(&mut self) -> Result<(), ShellError> {
        write_report(&self.config.report, &self.registry)?;
        let path = self.config.report.display().to_string();
        self.prompter.say(format!("Report written to {path}"))
    }

    fn show_metrics(&mut self) -> Result<(), ShellError> {
        let text = match self.metrics {
            Some(ref metrics) => metrics.render()?,
            None => "Metrics are disabled.".to_string(),
        };
        self.prompter.say(text.trim_end())
    }
}

/// One-line benefit summary shown after add/find/update.
pub fn benefit_line(customer: &Customer) -> String {
    match customer {
        Customer::Premium(p) => {
            let b = p.benefit();
            format!(
                "Premium benefits ({}): {}% off | SLA {}h | Free shipping: {}",
                p.tier(),
                b.discount,
                b.sla_hours,
                if b.free_shipping { "Yes" } else { "No" }
            )
        }
        Customer::Corporate(c) => {
            let b = c.benefit();
            format!(
                "Corporate benefits: {}% volume discount | Billing {} days | Executive: {}",
                b.volume_discount, b.billing_days, b.executive
            )
        }
        Customer::Regular(_) => format!("Regular benefit: {REGULAR_BENEFIT}"),
    }
}
