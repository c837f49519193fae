//! User and profile data models.
//!
//! Buyers and sellers share the [`User`] identity record and are combined in
//! the [`Profile`] tagged union so consumers handle both roles exhaustively.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

labelled_enum! {
    /// Which side of the marketplace a user is on.
    pub enum Role {
        Buyer => ("buyer", "Buyer"),
        Seller => ("seller", "Seller"),
    }
}

labelled_enum! {
    pub enum AcquisitionType {
        Strategic => ("strategic", "Strategic (Industry expertise/synergies)"),
        Financial => ("financial", "Financial (Investment returns)"),
        Both => ("both", "Both strategic and financial"),
    }
}

labelled_enum! {
    pub enum ExperienceLevel {
        FirstTime => ("first-time", "First-time buyer"),
        Experienced => ("experienced", "Experienced buyer"),
        Serial => ("serial", "Serial acquirer"),
    }
}

labelled_enum! {
    #[derive(Default)]
    pub enum RevenueFocus {
        Growing => ("growing", "Growing revenue businesses"),
        Stable => ("stable", "Stable revenue businesses"),
        #[default]
        Either => ("either", "Either growing or stable"),
    }
}

labelled_enum! {
    #[derive(Default)]
    pub enum TeamSize {
        Solo => ("solo", "Solo founder (1 person)"),
        Small => ("small", "Small team (2-10 people)"),
        Medium => ("medium", "Medium team (11-50 people)"),
        Large => ("large", "Large team (50+ people)"),
        #[default]
        Any => ("any", "Any team size"),
    }
}

labelled_enum! {
    /// How involved a buyer wants to be after the acquisition.
    #[derive(Default)]
    pub enum InvolvementLevel {
        Passive => ("passive", "Passive investor (minimal involvement)"),
        #[default]
        Active => ("active", "Active investor (strategic guidance)"),
        HandsOn => ("hands-on", "Hands-on operator (daily involvement)"),
    }
}

labelled_enum! {
    /// How much time the current owner spends running the business.
    #[derive(Default)]
    pub enum OwnerInvolvement {
        #[default]
        FullTime => ("full-time", "Full-time (40+ hours/week)"),
        PartTime => ("part-time", "Part-time (10-40 hours/week)"),
        Passive => ("passive", "Passive (< 10 hours/week)"),
    }
}

/// Identity fields shared by every marketplace user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            avatar: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder: set creation timestamp.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// "First Last", trimmed when either part is empty.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Up to two uppercase initials for avatar placeholders.
    pub fn initials(&self) -> String {
        [&self.first_name, &self.last_name]
            .iter()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Buyer budget range. Always `0 <= min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBudget")]
pub struct Budget {
    min: Decimal,
    max: Decimal,
}

#[derive(Deserialize)]
struct RawBudget {
    min: Decimal,
    max: Decimal,
}

impl TryFrom<RawBudget> for Budget {
    type Error = ProfileError;
    fn try_from(raw: RawBudget) -> Result<Self, Self::Error> {
        Budget::new(raw.min, raw.max)
    }
}

impl Budget {
    pub fn new(min: Decimal, max: Decimal) -> Result<Self, ProfileError> {
        for value in [min, max] {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(ProfileError::NegativeBudget { value });
            }
        }
        if min > max {
            return Err(ProfileError::BudgetInverted { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Decimal {
        self.min
    }

    pub fn max(&self) -> Decimal {
        self.max
    }
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            min: Decimal::ZERO,
            max: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Background {
    pub current_role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub years_of_experience: u32,
    pub previous_acquisitions: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvestmentFocus {
    pub revenue_focus: RevenueFocus,
    pub profitability_required: bool,
    pub team_size: TeamSize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuyerPreferences {
    /// Desired timeline, e.g. `6-12-months`.
    pub timeframe: String,
    pub involvement_level: InvolvementLevel,
    pub growth_strategy: Vec<String>,
}

/// A buyer's acquisition criteria and background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyerProfile {
    #[serde(flatten)]
    pub user: User,
    pub budget: Budget,
    pub industries: Vec<String>,
    pub preferred_regions: Vec<String>,
    pub acquisition_type: AcquisitionType,
    pub experience_level: ExperienceLevel,
    pub background: Background,
    pub investment_focus: InvestmentFocus,
    pub preferences: BuyerPreferences,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub name: String,
    pub industry: String,
    pub founded: i32,
    pub location: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// Year-over-year growth, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Growth {
    pub revenue_growth: Decimal,
    pub customer_growth: Decimal,
}

/// Seller financials. Monthly and annual revenue are supplied independently;
/// no relation between them is enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Financials {
    pub asking_price: Decimal,
    pub annual_revenue: Decimal,
    pub monthly_revenue: Decimal,
    pub profit: Decimal,
    pub profit_margin: Decimal,
    pub growth: Growth,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Operations {
    pub employee_count: u32,
    pub owner_involvement: OwnerInvolvement,
    pub reason: String,
    pub timeframe: String,
    pub assets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub customers: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_share: Option<Decimal>,
    pub competitive_advantages: Vec<String>,
    pub challenges: Vec<String>,
}

/// A seller's business listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerProfile {
    #[serde(flatten)]
    pub user: User,
    pub business: Business,
    pub financials: Financials,
    pub operations: Operations,
    pub metrics: Metrics,
}

/// A marketplace profile, discriminated by role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Profile {
    Buyer(BuyerProfile),
    Seller(SellerProfile),
}

impl Profile {
    pub fn role(&self) -> Role {
        match self {
            Self::Buyer(_) => Role::Buyer,
            Self::Seller(_) => Role::Seller,
        }
    }

    pub fn user(&self) -> &User {
        match self {
            Self::Buyer(p) => &p.user,
            Self::Seller(p) => &p.user,
        }
    }

    pub fn id(&self) -> &str {
        &self.user().id
    }
}
