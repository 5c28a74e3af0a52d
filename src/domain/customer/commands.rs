use super::aggregate::Customer;
use super::errors::ValidationError;
use super::value_objects::{CustomerKind, PremiumTier};

// ============================================================================
// Customer Domain Commands
// ============================================================================

/// Factory input: a type tag plus raw field values, as typed by an operator
/// or read from an imported row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterCustomer {
    pub kind: Option<CustomerKind>,
    pub id: u64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub tier: Option<String>,
    pub company: String,
    pub contact: String,
}

impl RegisterCustomer {
    /// Build the variant named by `kind`. A missing kind builds a regular
    /// customer; a premium registration without a tier gets gold.
    pub fn build(&self) -> Result<Customer, ValidationError> {
        match self.kind.unwrap_or(CustomerKind::Regular) {
            CustomerKind::Regular => {
                Customer::regular(self.id, &self.name, &self.email, &self.phone, &self.address)
            }
            CustomerKind::Premium => {
                let tier = self
                    .tier
                    .as_deref()
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or(PremiumTier::DEFAULT_TAG);
                Customer::premium(self.id, &self.name, &self.email, &self.phone, &self.address, tier)
            }
            CustomerKind::Corporate => Customer::corporate(
                self.id,
                &self.name,
                &self.email,
                &self.phone,
                &self.address,
                &self.company,
                &self.contact,
            ),
        }
    }
}

/// Partial update. `None` leaves the field untouched; fields that the target
/// variant does not have are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub tier: Option<String>,
    pub company: Option<String>,
    pub contact: Option<String>,
}

impl CustomerUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.tier.is_none()
            && self.company.is_none()
            && self.contact.is_none()
    }
}
