//! Hard-coded demo entities: one buyer, one deal, two documents.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal_macros::dec;

use crate::analysis::{AiAnalysis, AnalysisType, Document, DocumentType};
use crate::profiles::{
    AcquisitionType, Background, Budget, BuyerPreferences, BuyerProfile, ExperienceLevel,
    InvestmentFocus, InvolvementLevel, RevenueFocus, TeamSize, User,
};
use crate::workflow::{ACQUISITION_STEPS, Deal, DealStatus, DealStep, StepStatus};

pub const DEMO_DEAL_ID: &str = "deal-1";

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

pub fn mock_buyer() -> BuyerProfile {
    let budget = Budget::new(dec!(500000), dec!(2000000)).unwrap_or_default();
    BuyerProfile {
        user: User::new("buyer-1", "john.investor@email.com", "John", "Investor")
            .with_created_at(date(2024, 1, 15)),
        budget,
        industries: vec!["technology".into(), "saas".into(), "ecommerce".into()],
        preferred_regions: vec!["north-america".into()],
        acquisition_type: AcquisitionType::Both,
        experience_level: ExperienceLevel::Experienced,
        background: Background {
            current_role: "Investment Manager".into(),
            company: Some("TechVentures Capital".into()),
            years_of_experience: 12,
            previous_acquisitions: 3,
        },
        investment_focus: InvestmentFocus {
            revenue_focus: RevenueFocus::Growing,
            profitability_required: true,
            team_size: TeamSize::Small,
        },
        preferences: BuyerPreferences {
            timeframe: "6-12-months".into(),
            involvement_level: InvolvementLevel::Active,
            growth_strategy: vec![
                "Expand into new markets".into(),
                "Build strategic partnerships".into(),
                "Develop new product lines".into(),
            ],
        },
    }
}

/// Buyers shown on the seller's browse screen.
pub fn mock_buyers() -> Vec<BuyerProfile> {
    vec![mock_buyer()]
}

/// Due-diligence summary attached to the demo deal's current step.
pub fn due_diligence_analysis() -> AiAnalysis {
    AiAnalysis::new(
        "analysis-1",
        AnalysisType::DocumentSummary,
        "Financial documents show strong revenue growth with healthy profit margins.",
    )
    .with_step("due-diligence")
    .with_findings([
        "Revenue growth of 35% year-over-year",
        "Profit margin improved from 18% to 24%",
        "Customer retention rate of 94%",
    ])
    .with_red_flags([
        "Heavy dependence on top 3 customers (65% of revenue)",
        "Limited cash reserves relative to monthly burn",
    ])
    .with_recommendations([
        "Diversify customer base before acquisition",
        "Secure additional working capital",
        "Implement customer retention programs",
    ])
    .with_confidence(0.87)
    .with_created_at(date(2024, 2, 10))
}

/// Analysis of the demo financial statements.
pub fn financial_statements_analysis() -> AiAnalysis {
    AiAnalysis::new(
        "analysis-1",
        AnalysisType::DocumentSummary,
        "Comprehensive financial analysis reveals strong business fundamentals with notable growth trends.",
    )
    .with_document("doc-1")
    .with_findings([
        "Revenue increased 35% from $1.2M to $1.62M",
        "EBITDA margin improved from 22% to 28%",
        "Monthly recurring revenue shows 8% month-over-month growth",
    ])
    .with_red_flags([
        "Accounts receivable aging shows 15% over 90 days",
        "High customer concentration risk",
    ])
    .with_recommendations([
        "Improve collections process",
        "Diversify customer base",
        "Consider factoring for cash flow",
    ])
    .with_confidence(0.92)
    .with_created_at(date(2024, 2, 5))
}

pub fn mock_documents() -> Vec<Document> {
    vec![
        Document::new("doc-1", DEMO_DEAL_ID, "Financial Statements 2024", DocumentType::Financial)
            .with_uploader("seller-1")
            .with_file(2_500_000, "application/pdf", "/mock-file-url")
            .with_uploaded_at(date(2024, 2, 5))
            .with_analysis(financial_statements_analysis()),
        Document::new("doc-2", DEMO_DEAL_ID, "Customer Contracts", DocumentType::Legal)
            .with_uploader("seller-1")
            .with_file(1_800_000, "application/pdf", "/mock-file-url-2")
            .with_uploaded_at(date(2024, 2, 6)),
    ]
}

/// The demo deal: the first three steps done, due diligence under way.
pub fn mock_deal() -> Deal {
    let completed = ACQUISITION_STEPS[..3]
        .iter()
        .map(|def| DealStep::from_def(def).with_status(StepStatus::Completed));
    let due_diligence = DealStep {
        description: "Comprehensive business review".into(),
        ..DealStep::from_def(&ACQUISITION_STEPS[3])
    }
    .with_status(StepStatus::InProgress)
    .with_assignees(["buyer-1", "seller-1"])
    .with_analysis(due_diligence_analysis());

    let deal = Deal::new(DEMO_DEAL_ID, "match-1", "buyer-1", "seller-1")
        .with_status(DealStatus::DueDiligence)
        .with_created_at(date(2024, 2, 1));

    // The overrides come from the catalog itself, so these cannot fail.
    let with_steps = deal
        .clone()
        .with_steps(completed.chain(std::iter::once(due_diligence)).collect())
        .and_then(|d| d.with_current_step("due-diligence"));
    with_steps.unwrap_or(deal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_deal_is_in_due_diligence() {
        let deal = mock_deal();
        assert_eq!(deal.current_step_id(), "due-diligence");
        assert_eq!(deal.completed_count(), 3);
        let step = deal.current_step().unwrap();
        assert_eq!(step.status, StepStatus::InProgress);
        assert_eq!(step.assigned_to, ["buyer-1", "seller-1"]);
        assert_eq!(step.ai_analysis.as_ref().unwrap().confidence(), 0.87);
    }

    #[test]
    fn mock_documents_have_one_analysis() {
        let docs = mock_documents();
        assert_eq!(docs.len(), 2);
        assert!(docs[0].is_analyzed());
        assert!(!docs[1].is_analyzed());
        assert_eq!(docs[0].size_label(), "2.4 MB");
    }

    #[test]
    fn mock_buyer_budget() {
        let buyer = mock_buyer();
        assert_eq!(buyer.budget.min(), dec!(500000));
        assert_eq!(buyer.budget.max(), dec!(2000000));
        assert_eq!(buyer.user.created_at.format("%Y-%m-%d").to_string(), "2024-01-15");
    }
}
