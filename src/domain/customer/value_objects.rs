use serde::{Deserialize, Serialize};

// ============================================================================
// Customer Value Objects
// ============================================================================

/// The closed set of customer variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerKind {
    Regular,
    Premium,
    Corporate,
}

impl CustomerKind {
    pub const ALL: [CustomerKind; 3] = [Self::Regular, Self::Premium, Self::Corporate];

    /// Tag used in the flat record / CSV `type` column.
    pub fn record_tag(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Premium => "premium",
            Self::Corporate => "corporativo",
        }
    }

    /// Resolve a type tag. Accepts the record tag and the English name for
    /// corporate; anything else is `None` and left to the caller's policy.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "regular" => Some(Self::Regular),
            "premium" => Some(Self::Premium),
            "corporativo" | "corporate" => Some(Self::Corporate),
            _ => None,
        }
    }
}

/// Well-known premium tiers. The stored tier is free text; this is only the
/// lookup key for the benefit table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PremiumTier {
    Silver,
    Gold,
    Platinum,
}

impl PremiumTier {
    pub const DEFAULT_TAG: &'static str = "gold";

    pub fn parse(tier: &str) -> Option<Self> {
        match tier.trim().to_lowercase().as_str() {
            "silver" => Some(Self::Silver),
            "gold" => Some(Self::Gold),
            "platinum" => Some(Self::Platinum),
            _ => None,
        }
    }

    pub fn benefit(&self) -> PremiumBenefit {
        match self {
            Self::Silver => PremiumBenefit { discount: 5, sla_hours: 24, free_shipping: false },
            Self::Gold => PremiumBenefit { discount: 10, sla_hours: 8, free_shipping: true },
            Self::Platinum => PremiumBenefit { discount: 15, sla_hours: 2, free_shipping: true },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumBenefit {
    /// Percentage.
    pub discount: u32,
    pub sla_hours: u32,
    pub free_shipping: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorporateBenefit {
    /// Percentage.
    pub volume_discount: u32,
    pub billing_days: u32,
    pub executive: String,
}

pub const REGULAR_BENEFIT: &str = "Access to standard promotions (no fixed discount).";
pub const CORPORATE_VOLUME_DISCOUNT: u32 = 12;
pub const CORPORATE_BILLING_DAYS: u32 = 30;

/// Benefit payload computed by each variant from its own state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Benefit {
    Regular(String),
    Premium(PremiumBenefit),
    Corporate(CorporateBenefit),
}

/// Registry membership counts by variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSummary {
    pub regular: usize,
    pub premium: usize,
    pub corporate: usize,
    pub total: usize,
}

impl TypeSummary {
    pub fn count(&self, kind: CustomerKind) -> usize {
        match kind {
            CustomerKind::Regular => self.regular,
            CustomerKind::Premium => self.premium,
            CustomerKind::Corporate => self.corporate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags() {
        assert_eq!(CustomerKind::Corporate.record_tag(), "corporativo");
        assert_eq!(CustomerKind::from_tag(" Premium "), Some(CustomerKind::Premium));
        assert_eq!(CustomerKind::from_tag("CORPORATIVO"), Some(CustomerKind::Corporate));
        assert_eq!(CustomerKind::from_tag("vip"), None);
        assert_eq!(CustomerKind::from_tag(""), None);
    }

    #[test]
    fn test_tier_table() {
        assert_eq!(
            PremiumTier::Platinum.benefit(),
            PremiumBenefit { discount: 15, sla_hours: 2, free_shipping: true }
        );
        assert_eq!(PremiumTier::parse("GOLD "), Some(PremiumTier::Gold));
        assert_eq!(PremiumTier::parse("diamond"), None);
    }
}
