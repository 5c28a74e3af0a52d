use serde::{Deserialize, Serialize};

use super::aggregate::Customer;
use super::commands::RegisterCustomer;
use super::errors::ValidationError;
use super::value_objects::CustomerKind;

// ============================================================================
// Flat Customer Record - Import/Export Boundary
// ============================================================================
//
// Column order is fixed: type,id,name,email,phone,address,tier,company,contact.
// Fields a variant does not have are written as empty strings, and absent
// columns read back as empty strings. Spanish column names are accepted on
// read; writes always use the English ones.
//
// ============================================================================

pub const RECORD_FIELDS: [&str; 9] = [
    "type", "id", "name", "email", "phone", "address", "tier", "company", "contact",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerRecord {
    #[serde(rename = "type", alias = "tipo")]
    pub kind: String,
    pub id: String,
    #[serde(alias = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(alias = "telefono", alias = "teléfono")]
    pub phone: String,
    #[serde(alias = "direccion", alias = "dirección")]
    pub address: String,
    #[serde(alias = "nivel")]
    pub tier: String,
    #[serde(alias = "empresa")]
    pub company: String,
    #[serde(alias = "contacto")]
    pub contact: String,
}

/// Why a single record could not become a customer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("Invalid or missing customer ID: {0:?}")]
    InvalidId(String),

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The row could not be decoded at all.
    #[error("Malformed row: {0}")]
    Malformed(String),
}

impl CustomerRecord {
    pub fn is_blank(&self) -> bool {
        self.values().iter().all(|v| v.trim().is_empty())
    }

    /// `None` when the type column holds a tag no variant claims.
    pub fn recognized_kind(&self) -> Option<CustomerKind> {
        CustomerKind::from_tag(&self.kind)
    }

    pub fn values(&self) -> [&str; 9] {
        [
            &self.kind,
            &self.id,
            &self.name,
            &self.email,
            &self.phone,
            &self.address,
            &self.tier,
            &self.company,
            &self.contact,
        ]
    }

    /// Reconstruct the customer this record describes. Unrecognized or missing
    /// type tags build a regular customer.
    pub fn to_customer(&self) -> Result<Customer, RecordError> {
        let command = RegisterCustomer::try_from(self)?;
        Ok(command.build()?)
    }
}

impl TryFrom<&CustomerRecord> for RegisterCustomer {
    type Error = RecordError;

    fn try_from(record: &CustomerRecord) -> Result<Self, Self::Error> {
        let raw_id = record.id.trim();
        let id: u64 = raw_id
            .parse()
            .map_err(|_| RecordError::InvalidId(raw_id.to_string()))?;

        Ok(Self {
            kind: record.recognized_kind(),
            id,
            name: record.name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            address: record.address.clone(),
            tier: Some(record.tier.clone()),
            company: record.company.clone(),
            contact: record.contact.clone(),
        })
    }
}

impl Customer {
    pub fn to_record(&self) -> CustomerRecord {
        let mut record = CustomerRecord {
            kind: self.kind().record_tag().to_string(),
            id: self.id().to_string(),
            name: self.name().to_string(),
            email: self.email().to_string(),
            phone: self.phone().to_string(),
            address: self.address().to_string(),
            ..Default::default()
        };

        match self {
            Customer::Regular(_) => {}
            Customer::Premium(p) => record.tier = p.tier().to_string(),
            Customer::Corporate(c) => {
                record.company = c.company().to_string();
                record.contact = c.contact().to_string();
            }
        }

        record
    }
}
