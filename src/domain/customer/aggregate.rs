use std::fmt;

use serde::Serialize;

use super::commands::CustomerUpdate;
use super::errors::ValidationError;
use super::validation::{require_non_empty, validate_address, validate_email, validate_phone};
use super::value_objects::{
    Benefit, CorporateBenefit, CustomerKind, PremiumBenefit, PremiumTier,
    CORPORATE_BILLING_DAYS, CORPORATE_VOLUME_DISCOUNT, REGULAR_BENEFIT,
};

// ============================================================================
// Customer Aggregate - Variants over a Shared Profile
// ============================================================================
//
// Every field is private and only reachable through setters that validate
// before storing, so a customer can never hold an invalid value. Constructors
// validate every field first and build the value last (all-or-nothing).
//
// ============================================================================

/// Identity and contact fields shared by every variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    id: u64,
    name: String,
    email: String,
    phone: String,
    address: String,
}

impl Profile {
    pub fn new(
        id: u64,
        name: &str,
        email: &str,
        phone: &str,
        address: &str,
    ) -> Result<Self, ValidationError> {
        if id == 0 {
            return Err(ValidationError::InvalidId(id));
        }
        require_non_empty(name, "name")?;
        validate_email(email)?;
        validate_phone(phone)?;
        validate_address(address)?;

        Ok(Self {
            id,
            name: name.trim().to_string(),
            email: normalize_email(email),
            phone: phone.trim().to_string(),
            address: address.trim().to_string(),
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), ValidationError> {
        require_non_empty(name, "name")?;
        self.name = name.trim().to_string();
        Ok(())
    }

    pub fn set_email(&mut self, email: &str) -> Result<(), ValidationError> {
        validate_email(email)?;
        self.email = normalize_email(email);
        Ok(())
    }

    pub fn set_phone(&mut self, phone: &str) -> Result<(), ValidationError> {
        validate_phone(phone)?;
        self.phone = phone.trim().to_string();
        Ok(())
    }

    pub fn set_address(&mut self, address: &str) -> Result<(), ValidationError> {
        validate_address(address)?;
        self.address = address.trim().to_string();
        Ok(())
    }

    fn summary(&self) -> String {
        format!(
            "ID: {} | {} | {} | {} | {}",
            self.id, self.name, self.email, self.phone, self.address
        )
    }
}

/// Trimmed and lower-cased; the form used for storage and uniqueness checks.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegularCustomer {
    profile: Profile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PremiumCustomer {
    profile: Profile,
    tier: String,
}

impl PremiumCustomer {
    pub fn tier(&self) -> &str {
        &self.tier
    }

    pub fn set_tier(&mut self, tier: &str) -> Result<(), ValidationError> {
        require_non_empty(tier, "tier")?;
        self.tier = tier.trim().to_lowercase();
        Ok(())
    }

    /// Unknown tiers get the silver numbers; the stored tier is left as is.
    pub fn benefit(&self) -> PremiumBenefit {
        PremiumTier::parse(&self.tier)
            .unwrap_or(PremiumTier::Silver)
            .benefit()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorporateCustomer {
    profile: Profile,
    company: String,
    contact: String,
}

impl CorporateCustomer {
    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }

    pub fn set_company(&mut self, company: &str) -> Result<(), ValidationError> {
        require_non_empty(company, "company")?;
        self.company = company.trim().to_string();
        Ok(())
    }

    pub fn set_contact(&mut self, contact: &str) -> Result<(), ValidationError> {
        require_non_empty(contact, "contact")?;
        self.contact = contact.trim().to_string();
        Ok(())
    }

    pub fn benefit(&self) -> CorporateBenefit {
        CorporateBenefit {
            volume_discount: CORPORATE_VOLUME_DISCOUNT,
            billing_days: CORPORATE_BILLING_DAYS,
            executive: self.contact.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Customer {
    Regular(RegularCustomer),
    Premium(PremiumCustomer),
    Corporate(CorporateCustomer),
}

impl Customer {
    pub fn regular(
        id: u64,
        name: &str,
        email: &str,
        phone: &str,
        address: &str,
    ) -> Result<Self, ValidationError> {
        let profile = Profile::new(id, name, email, phone, address)?;
        Ok(Self::Regular(RegularCustomer { profile }))
    }

    pub fn premium(
        id: u64,
        name: &str,
        email: &str,
        phone: &str,
        address: &str,
        tier: &str,
    ) -> Result<Self, ValidationError> {
        let profile = Profile::new(id, name, email, phone, address)?;
        require_non_empty(tier, "tier")?;
        Ok(Self::Premium(PremiumCustomer {
            profile,
            tier: tier.trim().to_lowercase(),
        }))
    }

    pub fn corporate(
        id: u64,
        name: &str,
        email: &str,
        phone: &str,
        address: &str,
        company: &str,
        contact: &str,
    ) -> Result<Self, ValidationError> {
        let profile = Profile::new(id, name, email, phone, address)?;
        require_non_empty(company, "company")?;
        require_non_empty(contact, "contact")?;
        Ok(Self::Corporate(CorporateCustomer {
            profile,
            company: company.trim().to_string(),
            contact: contact.trim().to_string(),
        }))
    }

    pub fn kind(&self) -> CustomerKind {
        match self {
            Self::Regular(_) => CustomerKind::Regular,
            Self::Premium(_) => CustomerKind::Premium,
            Self::Corporate(_) => CustomerKind::Corporate,
        }
    }

    pub fn profile(&self) -> &Profile {
        match self {
            Self::Regular(c) => &c.profile,
            Self::Premium(c) => &c.profile,
            Self::Corporate(c) => &c.profile,
        }
    }

    fn profile_mut(&mut self) -> &mut Profile {
        match self {
            Self::Regular(c) => &mut c.profile,
            Self::Premium(c) => &mut c.profile,
            Self::Corporate(c) => &mut c.profile,
        }
    }

    pub fn id(&self) -> u64 {
        self.profile().id()
    }

    pub fn name(&self) -> &str {
        self.profile().name()
    }

    pub fn email(&self) -> &str {
        self.profile().email()
    }

    pub fn phone(&self) -> &str {
        self.profile().phone()
    }

    pub fn address(&self) -> &str {
        self.profile().address()
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), ValidationError> {
        self.profile_mut().set_name(name)
    }

    pub fn set_email(&mut self, email: &str) -> Result<(), ValidationError> {
        self.profile_mut().set_email(email)
    }

    pub fn set_phone(&mut self, phone: &str) -> Result<(), ValidationError> {
        self.profile_mut().set_phone(phone)
    }

    pub fn set_address(&mut self, address: &str) -> Result<(), ValidationError> {
        self.profile_mut().set_address(address)
    }

    pub fn benefit(&self) -> Benefit {
        match self {
            Self::Regular(_) => Benefit::Regular(REGULAR_BENEFIT.to_string()),
            Self::Premium(c) => Benefit::Premium(c.benefit()),
            Self::Corporate(c) => Benefit::Corporate(c.benefit()),
        }
    }

    pub fn display_info(&self) -> String {
        match self {
            Self::Regular(c) => format!("[Regular] {}", c.profile.summary()),
            Self::Premium(c) => {
                let b = c.benefit();
                format!(
                    "[Premium-{}] {} | Desc: {}% | SLA: {}h | Shipping: {}",
                    c.tier,
                    c.profile.summary(),
                    b.discount,
                    b.sla_hours,
                    if b.free_shipping { "Yes" } else { "No" }
                )
            }
            Self::Corporate(c) => {
                let b = c.benefit();
                format!(
                    "[Corporate] {} | Company: {} | Executive: {} | Vol Desc: {}% | Billing: {}d",
                    c.profile.summary(),
                    c.company,
                    b.executive,
                    b.volume_discount,
                    b.billing_days
                )
            }
        }
    }

    /// Apply every supplied field in order. Fields that do not exist on this
    /// variant are ignored. Stops at the first failing setter, so callers that
    /// need all-or-nothing semantics apply this to a copy.
    pub fn apply(&mut self, update: &CustomerUpdate) -> Result<(), ValidationError> {
        if let Some(ref name) = update.name {
            self.set_name(name)?;
        }
        if let Some(ref email) = update.email {
            self.set_email(email)?;
        }
        if let Some(ref phone) = update.phone {
            self.set_phone(phone)?;
        }
        if let Some(ref address) = update.address {
            self.set_address(address)?;
        }

        match self {
            Self::Regular(_) => {}
            Self::Premium(c) => {
                if let Some(ref tier) = update.tier {
                    c.set_tier(tier)?;
                }
            }
            Self::Corporate(c) => {
                if let Some(ref company) = update.company {
                    c.set_company(company)?;
                }
                if let Some(ref contact) = update.contact {
                    c.set_contact(contact)?;
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_info())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> Customer {
        Customer::regular(1, " Ana Pérez ", "ANA@X.com ", " +1 23456789", "Av. Siempre Viva 123 ")
            .unwrap()
    }

    fn premium(tier: &str) -> Customer {
        Customer::premium(2, "Luis", "luis@x.com", "12345678", "Calle Falsa 1", tier).unwrap()
    }

    fn corporate() -> Customer {
        Customer::corporate(
            3,
            "Marta",
            "marta@acme.com",
            "+5691234567",
            "Parque Industrial 9",
            " ACME ",
            " Jorge Ruiz ",
        )
        .unwrap()
    }

    #[test]
    fn test_construction_normalizes_fields() {
        let c = ana();
        assert_eq!(c.id(), 1);
        assert_eq!(c.name(), "Ana Pérez");
        assert_eq!(c.email(), "ana@x.com");
        assert_eq!(c.phone(), "+1 23456789");
        assert_eq!(c.address(), "Av. Siempre Viva 123");
        assert_eq!(c.kind(), CustomerKind::Regular);
    }

    #[test]
    fn test_zero_id_rejected() {
        let result = Customer::regular(0, "Ana", "ana@x.com", "12345678", "Calle 123");
        assert_eq!(result.unwrap_err(), ValidationError::InvalidId(0));
    }

    #[test]
    fn test_corporate_with_empty_company_fails() {
        let result = Customer::corporate(3, "Marta", "marta@acme.com", "12345678", "Calle 123", "", "Jorge");
        assert_eq!(result.unwrap_err(), ValidationError::Empty { field: "company" });
    }

    #[test]
    fn test_first_invalid_field_is_reported() {
        let result = Customer::regular(1, "Ana", "bad", "1", "x");
        assert!(matches!(result, Err(ValidationError::InvalidEmail(_))));
    }

    #[test]
    fn test_premium_platinum_benefit() {
        let c = premium("platinum");
        assert_eq!(
            c.benefit(),
            Benefit::Premium(PremiumBenefit { discount: 15, sla_hours: 2, free_shipping: true })
        );
    }

    #[test]
    fn test_unknown_tier_falls_back_to_silver_numbers() {
        let c = premium("  Diamond ");
        let Customer::Premium(ref p) = c else { panic!("expected premium") };
        assert_eq!(p.tier(), "diamond");
        assert_eq!(p.benefit(), PremiumTier::Silver.benefit());
    }

    #[test]
    fn test_tier_is_normalized() {
        let c = premium("GOLD ");
        let Customer::Premium(ref p) = c else { panic!("expected premium") };
        assert_eq!(p.tier(), "gold");
        assert_eq!(p.benefit(), PremiumTier::Gold.benefit());
    }

    #[test]
    fn test_corporate_benefit_uses_contact() {
        let c = corporate();
        assert_eq!(
            c.benefit(),
            Benefit::Corporate(CorporateBenefit {
                volume_discount: 12,
                billing_days: 30,
                executive: "Jorge Ruiz".to_string(),
            })
        );
    }

    #[test]
    fn test_setters_validate_and_keep_old_value_on_failure() {
        let mut c = ana();
        assert!(matches!(c.set_email("not-an-email"), Err(ValidationError::InvalidEmail(_))));
        assert_eq!(c.email(), "ana@x.com");

        c.set_email("  Ana.Perez@Mail.COM ").unwrap();
        assert_eq!(c.email(), "ana.perez@mail.com");

        assert!(matches!(c.set_address("abc"), Err(ValidationError::InvalidAddress(_))));
        assert_eq!(c.address(), "Av. Siempre Viva 123");
    }

    #[test]
    fn test_profile_setters_reject_and_keep_name_and_phone() {
        let mut c = ana();
        assert_eq!(c.set_name("   "), Err(ValidationError::Empty { field: "name" }));
        assert_eq!(c.name(), "Ana Pérez");

        assert!(matches!(c.set_phone("12"), Err(ValidationError::InvalidPhone(_))));
        assert_eq!(c.phone(), "+1 23456789");
    }

    #[test]
    fn test_set_tier_rejects_blank_and_keeps_tier() {
        let Customer::Premium(mut p) = premium("platinum") else {
            panic!("expected premium customer");
        };
        assert_eq!(p.set_tier("  "), Err(ValidationError::Empty { field: "tier" }));
        assert_eq!(p.tier(), "platinum");
        assert_eq!(p.benefit().discount, PremiumTier::Platinum.benefit().discount);
    }

    #[test]
    fn test_corporate_setters_reject_blank_and_keep_values() {
        let Customer::Corporate(mut corp) = corporate() else {
            panic!("expected corporate customer");
        };
        assert_eq!(corp.set_company(" "), Err(ValidationError::Empty { field: "company" }));
        assert_eq!(corp.company(), "ACME");

        assert_eq!(corp.set_contact(""), Err(ValidationError::Empty { field: "contact" }));
        assert_eq!(corp.contact(), "Jorge Ruiz");
        assert_eq!(corp.benefit().executive, "Jorge Ruiz");
    }

    #[test]
    fn test_display_info_per_variant() {
        assert_eq!(
            ana().display_info(),
            "[Regular] ID: 1 | Ana Pérez | ana@x.com | +1 23456789 | Av. Siempre Viva 123"
        );
        assert_eq!(
            premium("gold").display_info(),
            "[Premium-gold] ID: 2 | Luis | luis@x.com | 12345678 | Calle Falsa 1 | Desc: 10% | SLA: 8h | Shipping: Yes"
        );
        assert_eq!(
            corporate().to_string(),
            "[Corporate] ID: 3 | Marta | marta@acme.com | +5691234567 | Parque Industrial 9 | Company: ACME | Executive: Jorge Ruiz | Vol Desc: 12% | Billing: 30d"
        );
    }

    #[test]
    fn test_apply_ignores_fields_of_other_variants() {
        let mut c = ana();
        let update = CustomerUpdate {
            name: Some("Ana María".to_string()),
            tier: Some("platinum".to_string()),
            company: Some("Ignored".to_string()),
            ..Default::default()
        };
        c.apply(&update).unwrap();
        assert_eq!(c.name(), "Ana María");
        assert_eq!(c.kind(), CustomerKind::Regular);
    }

    #[test]
    fn test_apply_variant_fields() {
        let mut c = corporate();
        let update = CustomerUpdate {
            company: Some("Globex".to_string()),
            contact: Some("Hank".to_string()),
            ..Default::default()
        };
        c.apply(&update).unwrap();
        let Customer::Corporate(ref corp) = c else { panic!("expected corporate") };
        assert_eq!(corp.company(), "Globex");
        assert_eq!(corp.benefit().executive, "Hank");
    }
}
