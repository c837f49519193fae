//! Onboarding draft records: partial buyer / seller profiles accumulated
//! step by step.
//!
//! Every field is optional. [`Draft::merge`] overlays a patch onto the draft
//! field by field (last write wins), and [`Draft::set_field`] applies a single
//! parsed form value addressed by its dotted key.

use std::str::FromStr;

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{FieldError, ProfileError};
use crate::profiles::{
    AcquisitionType, Background, Budget, BuyerPreferences, BuyerProfile, Business,
    ExperienceLevel, Financials, Growth, InvestmentFocus, InvolvementLevel, Metrics, Operations,
    OwnerInvolvement, RevenueFocus, SellerProfile, TeamSize, User,
};
use crate::ui::{FieldValue, SelectOption};

use super::steps::PROFITABILITY;

/// A partial record accumulated by a wizard.
pub trait Draft: Default + Clone + Serialize + Send + 'static {
    /// Overlay every field present in `patch`.
    fn merge(&mut self, patch: Self);

    /// Set one field by dotted key.
    fn set_field(&mut self, key: &str, value: FieldValue) -> Result<(), FieldError>;

    /// Current value of a field as display text, `None` when unset.
    fn field(&self, key: &str) -> Option<String>;
}

fn overlay<T>(dst: &mut Option<T>, src: Option<T>) {
    if src.is_some() {
        *dst = src;
    }
}

fn text(value: FieldValue) -> Option<String> {
    Some(value.as_text())
}

fn list(value: FieldValue) -> Option<Vec<String>> {
    let text = value.as_text();
    if text.is_empty() {
        Some(Vec::new())
    } else {
        Some(vec![text])
    }
}

fn number(key: &str, value: &FieldValue) -> Result<Decimal, FieldError> {
    value.as_number().ok_or_else(|| FieldError::InvalidNumber {
        key: key.to_string(),
        label: key.to_string(),
        value: value.as_text(),
    })
}

fn whole<T: TryFrom<i64>>(key: &str, value: &FieldValue) -> Result<T, FieldError> {
    let n = number(key, value)?;
    let invalid = || FieldError::InvalidNumber {
        key: key.to_string(),
        label: key.to_string(),
        value: value.as_text(),
    };
    if !n.fract().is_zero() {
        return Err(invalid());
    }
    n.to_i64()
        .and_then(|i| T::try_from(i).ok())
        .ok_or_else(invalid)
}

fn choice<T: FromStr>(key: &str, value: &FieldValue, options: &[SelectOption]) -> Result<T, FieldError> {
    value.as_text().parse().map_err(|_| FieldError::InvalidOption {
        key: key.to_string(),
        label: key.to_string(),
        options: options.iter().map(|o| o.value).collect::<Vec<_>>().join(", "),
    })
}

fn yes_no(key: &str, value: &FieldValue) -> Result<bool, FieldError> {
    match value.as_text().as_str() {
        "yes" => Ok(true),
        "no" => Ok(false),
        _ => Err(FieldError::InvalidOption {
            key: key.to_string(),
            label: key.to_string(),
            options: PROFITABILITY.iter().map(|o| o.value).collect::<Vec<_>>().join(", "),
        }),
    }
}

fn unknown(key: &str) -> FieldError {
    FieldError::UnknownField {
        key: key.to_string(),
    }
}

fn show<T: ToString>(value: &Option<T>) -> Option<String> {
    value.as_ref().map(ToString::to_string)
}

fn show_list(value: &Option<Vec<String>>) -> Option<String> {
    value.as_ref().map(|v| v.join(", ")).filter(|s| !s.is_empty())
}

// ── Buyer ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_acquisitions: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentFocusDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue_focus: Option<RevenueFocus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profitability_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_size: Option<TeamSize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferencesDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub involvement_level: Option<InvolvementLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth_strategy: Option<Vec<String>>,
}

/// Partial buyer profile collected by buyer onboarding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyerDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub budget: BudgetDraft,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industries: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_regions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acquisition_type: Option<AcquisitionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(default)]
    pub background: BackgroundDraft,
    #[serde(default)]
    pub investment_focus: InvestmentFocusDraft,
    #[serde(default)]
    pub preferences: PreferencesDraft,
}

impl Draft for BuyerDraft {
    fn merge(&mut self, patch: Self) {
        overlay(&mut self.first_name, patch.first_name);
        overlay(&mut self.last_name, patch.last_name);
        overlay(&mut self.email, patch.email);
        overlay(&mut self.budget.min, patch.budget.min);
        overlay(&mut self.budget.max, patch.budget.max);
        overlay(&mut self.industries, patch.industries);
        overlay(&mut self.preferred_regions, patch.preferred_regions);
        overlay(&mut self.acquisition_type, patch.acquisition_type);
        overlay(&mut self.experience_level, patch.experience_level);
        overlay(&mut self.background.current_role, patch.background.current_role);
        overlay(&mut self.background.company, patch.background.company);
        overlay(
            &mut self.background.years_of_experience,
            patch.background.years_of_experience,
        );
        overlay(
            &mut self.background.previous_acquisitions,
            patch.background.previous_acquisitions,
        );
        overlay(
            &mut self.investment_focus.revenue_focus,
            patch.investment_focus.revenue_focus,
        );
        overlay(
            &mut self.investment_focus.profitability_required,
            patch.investment_focus.profitability_required,
        );
        overlay(&mut self.investment_focus.team_size, patch.investment_focus.team_size);
        overlay(&mut self.preferences.timeframe, patch.preferences.timeframe);
        overlay(
            &mut self.preferences.involvement_level,
            patch.preferences.involvement_level,
        );
        overlay(
            &mut self.preferences.growth_strategy,
            patch.preferences.growth_strategy,
        );
    }

    fn set_field(&mut self, key: &str, value: FieldValue) -> Result<(), FieldError> {
        match key {
            "first_name" => self.first_name = text(value),
            "last_name" => self.last_name = text(value),
            "email" => self.email = text(value),
            "budget.min" => self.budget.min = Some(number(key, &value)?),
            "budget.max" => self.budget.max = Some(number(key, &value)?),
            "industries" => self.industries = list(value),
            "preferred_regions" => self.preferred_regions = list(value),
            "acquisition_type" => {
                self.acquisition_type = Some(choice(key, &value, AcquisitionType::OPTIONS)?)
            }
            "experience_level" => {
                self.experience_level = Some(choice(key, &value, ExperienceLevel::OPTIONS)?)
            }
            "background.current_role" => self.background.current_role = text(value),
            "background.company" => self.background.company = text(value),
            "background.years_of_experience" => {
                self.background.years_of_experience = Some(whole(key, &value)?)
            }
            "background.previous_acquisitions" => {
                self.background.previous_acquisitions = Some(whole(key, &value)?)
            }
            "investment_focus.revenue_focus" => {
                self.investment_focus.revenue_focus =
                    Some(choice(key, &value, RevenueFocus::OPTIONS)?)
            }
            "investment_focus.profitability_required" => {
                self.investment_focus.profitability_required = Some(yes_no(key, &value)?)
            }
            "investment_focus.team_size" => {
                self.investment_focus.team_size = Some(choice(key, &value, TeamSize::OPTIONS)?)
            }
            "preferences.timeframe" => self.preferences.timeframe = text(value),
            "preferences.involvement_level" => {
                self.preferences.involvement_level =
                    Some(choice(key, &value, InvolvementLevel::OPTIONS)?)
            }
            "preferences.growth_strategy" => self.preferences.growth_strategy = list(value),
            _ => return Err(unknown(key)),
        }
        Ok(())
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "first_name" => self.first_name.clone(),
            "last_name" => self.last_name.clone(),
            "email" => self.email.clone(),
            "budget.min" => show(&self.budget.min),
            "budget.max" => show(&self.budget.max),
            "industries" => show_list(&self.industries),
            "preferred_regions" => show_list(&self.preferred_regions),
            "acquisition_type" => show(&self.acquisition_type),
            "experience_level" => show(&self.experience_level),
            "background.current_role" => self.background.current_role.clone(),
            "background.company" => self.background.company.clone(),
            "background.years_of_experience" => show(&self.background.years_of_experience),
            "background.previous_acquisitions" => show(&self.background.previous_acquisitions),
            "investment_focus.revenue_focus" => show(&self.investment_focus.revenue_focus),
            "investment_focus.profitability_required" => self
                .investment_focus
                .profitability_required
                .map(|b| if b { "yes" } else { "no" }.to_string()),
            "investment_focus.team_size" => show(&self.investment_focus.team_size),
            "preferences.timeframe" => self.preferences.timeframe.clone(),
            "preferences.involvement_level" => show(&self.preferences.involvement_level),
            "preferences.growth_strategy" => show_list(&self.preferences.growth_strategy),
            _ => None,
        }
    }
}

impl BuyerDraft {
    /// Build a full profile, filling unset fields with onboarding defaults.
    pub fn into_profile(self, user_id: impl Into<String>) -> Result<BuyerProfile, ProfileError> {
        let budget = Budget::new(
            self.budget.min.unwrap_or_default(),
            self.budget.max.unwrap_or_default(),
        )?;
        let company = self.background.company.filter(|c| !c.trim().is_empty());

        Ok(BuyerProfile {
            user: User::new(
                user_id,
                self.email.unwrap_or_default(),
                self.first_name.unwrap_or_default(),
                self.last_name.unwrap_or_default(),
            ),
            budget,
            industries: self.industries.unwrap_or_default(),
            preferred_regions: self.preferred_regions.unwrap_or_default(),
            acquisition_type: self.acquisition_type.unwrap_or(AcquisitionType::Both),
            experience_level: self.experience_level.unwrap_or(ExperienceLevel::FirstTime),
            background: Background {
                current_role: self.background.current_role.unwrap_or_default(),
                company,
                years_of_experience: self.background.years_of_experience.unwrap_or_default(),
                previous_acquisitions: self.background.previous_acquisitions.unwrap_or_default(),
            },
            investment_focus: InvestmentFocus {
                revenue_focus: self.investment_focus.revenue_focus.unwrap_or_default(),
                profitability_required: self
                    .investment_focus
                    .profitability_required
                    .unwrap_or_default(),
                team_size: self.investment_focus.team_size.unwrap_or_default(),
            },
            preferences: BuyerPreferences {
                timeframe: self.preferences.timeframe.unwrap_or_default(),
                involvement_level: self.preferences.involvement_level.unwrap_or_default(),
                growth_strategy: self.preferences.growth_strategy.unwrap_or_default(),
            },
        })
    }
}

// ── Seller ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub founded: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue_growth: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_growth: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialsDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asking_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_revenue: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_revenue: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit_margin: Option<Decimal>,
    #[serde(default)]
    pub growth: GrowthDraft,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationsDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_involvement: Option<OwnerInvolvement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customers: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_share: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competitive_advantages: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenges: Option<Vec<String>>,
}

/// Partial seller profile collected by seller onboarding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub business: BusinessDraft,
    #[serde(default)]
    pub financials: FinancialsDraft,
    #[serde(default)]
    pub operations: OperationsDraft,
    #[serde(default)]
    pub metrics: MetricsDraft,
}

impl Draft for SellerDraft {
    fn merge(&mut self, patch: Self) {
        overlay(&mut self.first_name, patch.first_name);
        overlay(&mut self.last_name, patch.last_name);
        overlay(&mut self.email, patch.email);

        let (b, pb) = (&mut self.business, patch.business);
        overlay(&mut b.name, pb.name);
        overlay(&mut b.industry, pb.industry);
        overlay(&mut b.founded, pb.founded);
        overlay(&mut b.location, pb.location);
        overlay(&mut b.description, pb.description);
        overlay(&mut b.website, pb.website);

        let (f, pf) = (&mut self.financials, patch.financials);
        overlay(&mut f.asking_price, pf.asking_price);
        overlay(&mut f.annual_revenue, pf.annual_revenue);
        overlay(&mut f.monthly_revenue, pf.monthly_revenue);
        overlay(&mut f.profit, pf.profit);
        overlay(&mut f.profit_margin, pf.profit_margin);
        overlay(&mut f.growth.revenue_growth, pf.growth.revenue_growth);
        overlay(&mut f.growth.customer_growth, pf.growth.customer_growth);

        let (o, po) = (&mut self.operations, patch.operations);
        overlay(&mut o.employee_count, po.employee_count);
        overlay(&mut o.owner_involvement, po.owner_involvement);
        overlay(&mut o.reason, po.reason);
        overlay(&mut o.timeframe, po.timeframe);
        overlay(&mut o.assets, po.assets);

        let (m, pm) = (&mut self.metrics, patch.metrics);
        overlay(&mut m.customers, pm.customers);
        overlay(&mut m.market_share, pm.market_share);
        overlay(&mut m.competitive_advantages, pm.competitive_advantages);
        overlay(&mut m.challenges, pm.challenges);
    }

    fn set_field(&mut self, key: &str, value: FieldValue) -> Result<(), FieldError> {
        match key {
            "first_name" => self.first_name = text(value),
            "last_name" => self.last_name = text(value),
            "email" => self.email = text(value),
            "business.name" => self.business.name = text(value),
            "business.industry" => self.business.industry = text(value),
            "business.founded" => self.business.founded = Some(whole(key, &value)?),
            "business.location" => self.business.location = text(value),
            "business.description" => self.business.description = text(value),
            "business.website" => self.business.website = text(value),
            "financials.asking_price" => self.financials.asking_price = Some(number(key, &value)?),
            "financials.annual_revenue" => {
                self.financials.annual_revenue = Some(number(key, &value)?)
            }
            "financials.monthly_revenue" => {
                self.financials.monthly_revenue = Some(number(key, &value)?)
            }
            "financials.profit" => self.financials.profit = Some(number(key, &value)?),
            "financials.profit_margin" => {
                self.financials.profit_margin = Some(number(key, &value)?)
            }
            "financials.growth.revenue_growth" => {
                self.financials.growth.revenue_growth = Some(number(key, &value)?)
            }
            "financials.growth.customer_growth" => {
                self.financials.growth.customer_growth = Some(number(key, &value)?)
            }
            "operations.employee_count" => {
                self.operations.employee_count = Some(whole(key, &value)?)
            }
            "operations.owner_involvement" => {
                self.operations.owner_involvement =
                    Some(choice(key, &value, OwnerInvolvement::OPTIONS)?)
            }
            "operations.reason" => self.operations.reason = text(value),
            "operations.timeframe" => self.operations.timeframe = text(value),
            "operations.assets" => self.operations.assets = list(value),
            "metrics.customers" => self.metrics.customers = Some(whole(key, &value)?),
            "metrics.market_share" => self.metrics.market_share = Some(number(key, &value)?),
            "metrics.competitive_advantages" => self.metrics.competitive_advantages = list(value),
            "metrics.challenges" => self.metrics.challenges = list(value),
            _ => return Err(unknown(key)),
        }
        Ok(())
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "first_name" => self.first_name.clone(),
            "last_name" => self.last_name.clone(),
            "email" => self.email.clone(),
            "business.name" => self.business.name.clone(),
            "business.industry" => self.business.industry.clone(),
            "business.founded" => show(&self.business.founded),
            "business.location" => self.business.location.clone(),
            "business.description" => self.business.description.clone(),
            "business.website" => self.business.website.clone(),
            "financials.asking_price" => show(&self.financials.asking_price),
            "financials.annual_revenue" => show(&self.financials.annual_revenue),
            "financials.monthly_revenue" => show(&self.financials.monthly_revenue),
            "financials.profit" => show(&self.financials.profit),
            "financials.profit_margin" => show(&self.financials.profit_margin),
            "financials.growth.revenue_growth" => show(&self.financials.growth.revenue_growth),
            "financials.growth.customer_growth" => show(&self.financials.growth.customer_growth),
            "operations.employee_count" => show(&self.operations.employee_count),
            "operations.owner_involvement" => show(&self.operations.owner_involvement),
            "operations.reason" => self.operations.reason.clone(),
            "operations.timeframe" => self.operations.timeframe.clone(),
            "operations.assets" => show_list(&self.operations.assets),
            "metrics.customers" => show(&self.metrics.customers),
            "metrics.market_share" => show(&self.metrics.market_share),
            "metrics.competitive_advantages" => show_list(&self.metrics.competitive_advantages),
            "metrics.challenges" => show_list(&self.metrics.challenges),
            _ => None,
        }
    }
}

impl SellerDraft {
    /// Build a full profile, filling unset fields with onboarding defaults.
    ///
    /// When no profit margin was supplied it is derived from profit and
    /// annual revenue (percent, two decimals), or zero without revenue.
    pub fn into_profile(self, user_id: impl Into<String>) -> SellerProfile {
        let f = self.financials;
        let annual_revenue = f.annual_revenue.unwrap_or_default();
        let profit = f.profit.unwrap_or_default();
        let profit_margin = f.profit_margin.unwrap_or_else(|| {
            if annual_revenue.is_zero() {
                Decimal::ZERO
            } else {
                (profit / annual_revenue * Decimal::ONE_HUNDRED).round_dp(2)
            }
        });
        let website = self.business.website.filter(|w| !w.trim().is_empty());

        SellerProfile {
            user: User::new(
                user_id,
                self.email.unwrap_or_default(),
                self.first_name.unwrap_or_default(),
                self.last_name.unwrap_or_default(),
            ),
            business: Business {
                name: self.business.name.unwrap_or_default(),
                industry: self.business.industry.unwrap_or_default(),
                founded: self.business.founded.unwrap_or_else(|| Utc::now().year()),
                location: self.business.location.unwrap_or_default(),
                description: self.business.description.unwrap_or_default(),
                website,
            },
            financials: Financials {
                asking_price: f.asking_price.unwrap_or_default(),
                annual_revenue,
                monthly_revenue: f.monthly_revenue.unwrap_or_default(),
                profit,
                profit_margin,
                growth: Growth {
                    revenue_growth: f.growth.revenue_growth.unwrap_or_default(),
                    customer_growth: f.growth.customer_growth.unwrap_or_default(),
                },
            },
            operations: Operations {
                employee_count: self.operations.employee_count.unwrap_or_default(),
                owner_involvement: self.operations.owner_involvement.unwrap_or_default(),
                reason: self.operations.reason.unwrap_or_default(),
                timeframe: self.operations.timeframe.unwrap_or_default(),
                assets: self.operations.assets.unwrap_or_default(),
            },
            metrics: Metrics {
                customers: self.metrics.customers.unwrap_or_default(),
                market_share: self.metrics.market_share,
                competitive_advantages: self.metrics.competitive_advantages.unwrap_or_default(),
                challenges: self.metrics.challenges.unwrap_or_default(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn merge_is_last_write_wins_per_field() {
        let mut draft = SellerDraft::default();
        draft.merge(SellerDraft {
            first_name: Some("A".into()),
            ..Default::default()
        });
        draft.merge(SellerDraft {
            first_name: Some("B".into()),
            last_name: Some("C".into()),
            ..Default::default()
        });
        assert_eq!(draft.first_name.as_deref(), Some("B"));
        assert_eq!(draft.last_name.as_deref(), Some("C"));
    }

    #[test]
    fn merge_keeps_nested_siblings() {
        let mut draft = SellerDraft::default();
        draft
            .set_field("business.name", FieldValue::Text("Acme".into()))
            .unwrap();
        draft.merge(SellerDraft {
            business: BusinessDraft {
                industry: Some("saas".into()),
                ..Default::default()
            },
            ..Default::default()
        });
        assert_eq!(draft.business.name.as_deref(), Some("Acme"));
        assert_eq!(draft.business.industry.as_deref(), Some("saas"));
    }

    #[test]
    fn set_field_rejects_unknown_key() {
        let mut draft = BuyerDraft::default();
        let err = draft
            .set_field("budget.median", FieldValue::Number(dec!(1)))
            .unwrap_err();
        assert_eq!(err, FieldError::UnknownField { key: "budget.median".into() });
    }

    #[test]
    fn whole_number_fields_reject_fractions_and_negatives() {
        let mut draft = BuyerDraft::default();
        assert!(draft
            .set_field("background.previous_acquisitions", FieldValue::Number(dec!(2.5)))
            .is_err());
        assert!(draft
            .set_field("background.previous_acquisitions", FieldValue::Number(dec!(-1)))
            .is_err());
        draft
            .set_field("background.previous_acquisitions", FieldValue::Number(dec!(3)))
            .unwrap();
        assert_eq!(draft.background.previous_acquisitions, Some(3));
    }

    #[test]
    fn select_fields_parse_enums() {
        let mut draft = BuyerDraft::default();
        draft
            .set_field("experience_level", FieldValue::Text("serial".into()))
            .unwrap();
        draft
            .set_field(
                "investment_focus.profitability_required",
                FieldValue::Text("yes".into()),
            )
            .unwrap();
        assert_eq!(draft.experience_level, Some(ExperienceLevel::Serial));
        assert_eq!(draft.investment_focus.profitability_required, Some(true));
        assert_eq!(
            draft.field("investment_focus.profitability_required").as_deref(),
            Some("yes")
        );
        assert!(draft
            .set_field("experience_level", FieldValue::Text("novice".into()))
            .is_err());
    }

    #[test]
    fn list_fields_hold_single_entry() {
        let mut draft = BuyerDraft::default();
        draft
            .set_field("industries", FieldValue::Text("technology".into()))
            .unwrap();
        assert_eq!(draft.industries, Some(vec!["technology".to_string()]));
        draft.set_field("industries", FieldValue::Text(String::new())).unwrap();
        assert_eq!(draft.industries, Some(vec![]));
        assert_eq!(draft.field("industries"), None);
    }

    #[test]
    fn buyer_into_profile_validates_budget() {
        let mut draft = BuyerDraft::default();
        draft.set_field("budget.min", FieldValue::Number(dec!(900))).unwrap();
        draft.set_field("budget.max", FieldValue::Number(dec!(100))).unwrap();
        assert!(matches!(
            draft.into_profile("buyer-9"),
            Err(ProfileError::BudgetInverted { .. })
        ));
    }

    #[test]
    fn buyer_into_profile_fills_defaults() {
        let profile = BuyerDraft::default().into_profile("buyer-9").unwrap();
        assert_eq!(profile.user.id, "buyer-9");
        assert_eq!(profile.budget, Budget::default());
        assert_eq!(profile.investment_focus.team_size, TeamSize::Any);
        assert_eq!(profile.preferences.involvement_level, InvolvementLevel::Active);
        assert!(profile.background.company.is_none());
    }

    #[test]
    fn seller_into_profile_derives_margin() {
        let mut draft = SellerDraft::default();
        draft
            .set_field("financials.annual_revenue", FieldValue::Number(dec!(500000)))
            .unwrap();
        draft
            .set_field("financials.profit", FieldValue::Number(dec!(150000)))
            .unwrap();
        let profile = draft.into_profile("seller-9");
        assert_eq!(profile.financials.profit_margin, dec!(30));
        assert_eq!(profile.operations.owner_involvement, OwnerInvolvement::FullTime);
        assert_eq!(profile.business.founded, Utc::now().year());
    }

    #[test]
    fn serialized_draft_uses_nested_keys() {
        let mut draft = SellerDraft::default();
        draft
            .set_field("business.name", FieldValue::Text("Acme".into()))
            .unwrap();
        draft
            .set_field("financials.asking_price", FieldValue::Number(dec!(1000000)))
            .unwrap();
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["business"]["name"], "Acme");
        assert_eq!(json["financials"]["asking_price"], "1000000");
        assert!(json.get("first_name").is_none());
    }
}
