//! The fixed acquisition workflow: seven steps from first conversation to
//! closing, each with a day estimate.

/// One entry of the acquisition step catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowStepDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub estimated_days: u32,
}

pub const ACQUISITION_STEPS: &[WorkflowStepDef] = &[
    WorkflowStepDef {
        id: "initial-discussion",
        name: "Initial Discussion",
        description: "Preliminary conversation and interest confirmation",
        estimated_days: 3,
    },
    WorkflowStepDef {
        id: "nda-signing",
        name: "NDA & Confidentiality",
        description: "Sign mutual non-disclosure agreement",
        estimated_days: 2,
    },
    WorkflowStepDef {
        id: "financial-disclosure",
        name: "Financial Disclosure",
        description: "Share detailed financial documents",
        estimated_days: 5,
    },
    WorkflowStepDef {
        id: "due-diligence",
        name: "Due Diligence",
        description: "Comprehensive business review and analysis",
        estimated_days: 14,
    },
    WorkflowStepDef {
        id: "valuation",
        name: "Valuation & Negotiation",
        description: "Business valuation and price negotiation",
        estimated_days: 10,
    },
    WorkflowStepDef {
        id: "legal-review",
        name: "Legal Review",
        description: "Contract drafting and legal documentation",
        estimated_days: 7,
    },
    WorkflowStepDef {
        id: "closing",
        name: "Closing",
        description: "Final signatures and asset transfer",
        estimated_days: 3,
    },
];

pub const REQUIRED_FINANCIAL_DOCUMENTS: &[&str] = &[
    "Profit & Loss Statements (3 years)",
    "Balance Sheets (3 years)",
    "Cash Flow Statements",
    "Tax Returns (3 years)",
    "Management Accounts",
];

pub const OPTIONAL_FINANCIAL_DOCUMENTS: &[&str] = &[
    "Customer Contracts",
    "Supplier Agreements",
    "Insurance Policies",
    "Intellectual Property",
    "Employee Agreements",
];

/// A headline figure on the valuation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValuationCard {
    pub title: &'static str,
    pub value: &'static str,
    pub note: &'static str,
}

pub const VALUATION_CARDS: &[ValuationCard] = &[
    ValuationCard {
        title: "Revenue Multiple",
        value: "2.5x",
        note: "Industry avg: 2.1x",
    },
    ValuationCard {
        title: "EBITDA Multiple",
        value: "4.2x",
        note: "Industry avg: 3.8x",
    },
    ValuationCard {
        title: "AI Recommended",
        value: "$1.2M",
        note: "95% confidence",
    },
];

pub fn find_step(id: &str) -> Option<&'static WorkflowStepDef> {
    ACQUISITION_STEPS.iter().find(|s| s.id == id)
}

/// Sum of every catalog step's estimate.
pub fn total_estimated_days() -> u32 {
    ACQUISITION_STEPS.iter().map(|s| s.estimated_days).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_order_and_totals() {
        let ids: Vec<_> = ACQUISITION_STEPS.iter().map(|s| s.id).collect();
        assert_eq!(
            ids,
            [
                "initial-discussion",
                "nda-signing",
                "financial-disclosure",
                "due-diligence",
                "valuation",
                "legal-review",
                "closing"
            ]
        );
        assert_eq!(total_estimated_days(), 44);
    }

    #[test]
    fn find_step_by_id() {
        assert_eq!(find_step("valuation").unwrap().estimated_days, 10);
        assert!(find_step("escrow").is_none());
    }
}
