//! Buyer cards and the full buyer profile view shown to sellers.

use serde::{Deserialize, Serialize};

use super::model::{
    AcquisitionType, BuyerProfile, ExperienceLevel, InvolvementLevel, RevenueFocus, TeamSize,
};
use crate::ui::{format_compact_range, format_currency};

/// Number of industries shown on a card before collapsing into "+N more".
const CARD_INDUSTRY_LIMIT: usize = 3;

/// A seller's response to a buyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchDecision {
    Accept,
    Reject,
}

impl std::fmt::Display for MatchDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Accept => write!(f, "accept"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// Compact summary of a buyer for the browse list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyerCardView {
    pub buyer_id: String,
    pub name: String,
    pub initials: String,
    pub current_role: String,
    pub company: Option<String>,
    pub budget: String,
    pub experience: &'static str,
    pub industries: Vec<String>,
    pub more_industries: usize,
    pub region: String,
    pub timeframe: String,
    pub involvement: String,
    pub previous_acquisitions: u32,
    pub years_of_experience: u32,
}

impl BuyerCardView {
    pub fn from_profile(buyer: &BuyerProfile) -> Self {
        let industries: Vec<String> = buyer
            .industries
            .iter()
            .take(CARD_INDUSTRY_LIMIT)
            .map(|i| capitalize_tag(i))
            .collect();

        Self {
            buyer_id: buyer.user.id.clone(),
            name: buyer.user.full_name(),
            initials: buyer.user.initials(),
            current_role: buyer.background.current_role.clone(),
            company: buyer.background.company.clone(),
            budget: format_compact_range(buyer.budget.min(), buyer.budget.max()),
            experience: card_experience_label(buyer.experience_level),
            industries,
            more_industries: buyer.industries.len().saturating_sub(CARD_INDUSTRY_LIMIT),
            region: buyer
                .preferred_regions
                .first()
                .map(|r| title_case_tag(r))
                .unwrap_or_else(|| "Any".to_string()),
            timeframe: buyer.preferences.timeframe.replace('-', " "),
            involvement: capitalize_tag(buyer.preferences.involvement_level.as_str()),
            previous_acquisitions: buyer.background.previous_acquisitions,
            years_of_experience: buyer.background.years_of_experience,
        }
    }
}

/// Full buyer profile, grouped the way sellers review it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyerProfileDetail {
    pub buyer_id: String,
    pub name: String,
    pub first_name: String,
    pub headline: String,
    pub experience: &'static str,
    pub member_since: i32,
    pub budget: String,
    pub industries: Vec<String>,
    pub regions: Vec<String>,
    pub acquisition_type: &'static str,
    pub revenue_focus: &'static str,
    pub profitability: &'static str,
    pub team_size: &'static str,
    pub growth_strategy: String,
    pub years_of_experience: u32,
    pub previous_acquisitions: u32,
    pub timeframe: String,
    pub involvement: &'static str,
}

impl BuyerProfileDetail {
    pub fn from_profile(buyer: &BuyerProfile) -> Self {
        use chrono::Datelike;

        let headline = match &buyer.background.company {
            Some(company) => format!("{} at {}", buyer.background.current_role, company),
            None => buyer.background.current_role.clone(),
        };

        Self {
            buyer_id: buyer.user.id.clone(),
            name: buyer.user.full_name(),
            first_name: buyer.user.first_name.clone(),
            headline,
            experience: detail_experience_label(buyer.experience_level),
            member_since: buyer.user.created_at.year(),
            budget: budget_range(buyer),
            industries: buyer.industries.iter().map(|i| capitalize_tag(i)).collect(),
            regions: buyer
                .preferred_regions
                .iter()
                .map(|r| title_case_tag(r))
                .collect(),
            acquisition_type: match buyer.acquisition_type {
                AcquisitionType::Strategic => "Strategic Acquisition",
                AcquisitionType::Financial => "Financial Investment",
                AcquisitionType::Both => "Strategic & Financial",
            },
            revenue_focus: match buyer.investment_focus.revenue_focus {
                RevenueFocus::Growing => "Growing businesses",
                RevenueFocus::Stable => "Stable businesses",
                RevenueFocus::Either => "Growing or stable businesses",
            },
            profitability: if buyer.investment_focus.profitability_required {
                "Must be profitable"
            } else {
                "Profitability not required"
            },
            team_size: match buyer.investment_focus.team_size {
                TeamSize::Solo => "Solo founder",
                other => other.label(),
            },
            growth_strategy: buyer
                .preferences
                .growth_strategy
                .first()
                .cloned()
                .unwrap_or_else(|| "No specific growth strategy provided.".to_string()),
            years_of_experience: buyer.background.years_of_experience,
            previous_acquisitions: buyer.background.previous_acquisitions,
            timeframe: buyer.preferences.timeframe.replace('-', " "),
            involvement: match buyer.preferences.involvement_level {
                InvolvementLevel::Passive => "Passive Investor",
                InvolvementLevel::Active => "Active Investor",
                InvolvementLevel::HandsOn => "Hands-on Operator",
            },
        }
    }
}

fn budget_range(buyer: &BuyerProfile) -> String {
    format!(
        "{} - {}",
        format_currency(buyer.budget.min()),
        format_currency(buyer.budget.max())
    )
}

fn card_experience_label(level: ExperienceLevel) -> &'static str {
    match level {
        ExperienceLevel::FirstTime => "First-time",
        ExperienceLevel::Experienced => "Experienced",
        ExperienceLevel::Serial => "Serial Acquirer",
    }
}

fn detail_experience_label(level: ExperienceLevel) -> &'static str {
    match level {
        ExperienceLevel::FirstTime => "First-time Buyer",
        ExperienceLevel::Experienced => "Experienced Buyer",
        ExperienceLevel::Serial => "Serial Acquirer",
    }
}

/// `real-estate` → `Real estate`.
pub fn capitalize_tag(tag: &str) -> String {
    let spaced = tag.replace('-', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `north-america` → `North America`.
pub fn title_case_tag(tag: &str) -> String {
    tag.split('-')
        .filter(|w| !w.is_empty())
        .map(capitalize_tag)
        .collect::<Vec<_>>()
        .join(" ")
}
