//! Static step-definition tables for buyer and seller onboarding.

use crate::profiles::{
    AcquisitionType, ExperienceLevel, InvolvementLevel, OwnerInvolvement, RevenueFocus, TeamSize,
};
use crate::ui::{FormField, SelectOption};

/// One named step of a wizard and the form fields it collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub fields: &'static [FormField],
    /// Static notes shown under the form, if any.
    pub notes: &'static [&'static str],
}

impl StepDefinition {
    /// Look up one of this step's fields by key.
    pub fn field(&self, key: &str) -> Option<&'static FormField> {
        self.fields.iter().find(|f| f.key == key)
    }
}

/// Find a field by key across every step of a table.
pub fn find_field(steps: &'static [StepDefinition], key: &str) -> Option<&'static FormField> {
    steps.iter().find_map(|s| s.field(key))
}

pub const BUYER_INDUSTRIES: &[SelectOption] = &[
    SelectOption::new("technology", "Technology"),
    SelectOption::new("healthcare", "Healthcare"),
    SelectOption::new("finance", "Finance"),
    SelectOption::new("retail", "Retail & E-commerce"),
    SelectOption::new("manufacturing", "Manufacturing"),
    SelectOption::new("real-estate", "Real Estate"),
    SelectOption::new("food-beverage", "Food & Beverage"),
    SelectOption::new("education", "Education"),
    SelectOption::new("professional-services", "Professional Services"),
    SelectOption::new("other", "Other"),
];

pub const SELLER_INDUSTRIES: &[SelectOption] = &[
    SelectOption::new("technology", "Technology & Software"),
    SelectOption::new("ecommerce", "E-commerce & Retail"),
    SelectOption::new("saas", "SaaS & Digital Services"),
    SelectOption::new("healthcare", "Healthcare & Medical"),
    SelectOption::new("finance", "Financial Services"),
    SelectOption::new("manufacturing", "Manufacturing"),
    SelectOption::new("food-beverage", "Food & Beverage"),
    SelectOption::new("professional-services", "Professional Services"),
    SelectOption::new("real-estate", "Real Estate"),
    SelectOption::new("education", "Education & Training"),
    SelectOption::new("media", "Media & Entertainment"),
    SelectOption::new("other", "Other"),
];

pub const REGIONS: &[SelectOption] = &[
    SelectOption::new("north-america", "North America"),
    SelectOption::new("europe", "Europe"),
    SelectOption::new("asia-pacific", "Asia Pacific"),
    SelectOption::new("latin-america", "Latin America"),
    SelectOption::new("africa", "Africa"),
    SelectOption::new("global", "Global/No Preference"),
];

pub const BUYER_TIMELINES: &[SelectOption] = &[
    SelectOption::new("3-6-months", "3-6 months"),
    SelectOption::new("6-12-months", "6-12 months"),
    SelectOption::new("1-2-years", "1-2 years"),
    SelectOption::new("flexible", "Flexible timeline"),
];

pub const SELLER_TIMELINES: &[SelectOption] = &[
    SelectOption::new("1-3-months", "1-3 months"),
    SelectOption::new("3-6-months", "3-6 months"),
    SelectOption::new("6-12-months", "6-12 months"),
    SelectOption::new("1-2-years", "1-2 years"),
    SelectOption::new("flexible", "Flexible timeline"),
];

pub const PROFITABILITY: &[SelectOption] = &[
    SelectOption::new("yes", "Must be profitable"),
    SelectOption::new("no", "Profitability not required"),
];

pub const BUYER_STEPS: &[StepDefinition] = &[
    StepDefinition {
        id: "personal-info",
        title: "Personal Info",
        description: "Tell us about yourself",
        fields: &[
            FormField::text("first_name", "First Name")
                .required()
                .placeholder("Enter your first name"),
            FormField::text("last_name", "Last Name")
                .required()
                .placeholder("Enter your last name"),
            FormField::email("email", "Email Address")
                .required()
                .placeholder("Enter your email address"),
            FormField::text("background.current_role", "Current Role/Position")
                .placeholder("e.g., CEO, Investor, Entrepreneur"),
            FormField::text("background.company", "Company (Optional)")
                .placeholder("Your current company"),
        ],
        notes: &[],
    },
    StepDefinition {
        id: "investment-goals",
        title: "Investment Goals",
        description: "What are you looking to acquire?",
        fields: &[
            FormField::select("industries", "Primary Industries of Interest", BUYER_INDUSTRIES)
                .required()
                .placeholder("Select primary industry"),
            FormField::select("preferred_regions", "Preferred Geographic Regions", REGIONS)
                .placeholder("Select preferred region"),
            FormField::select("acquisition_type", "Acquisition Type", AcquisitionType::OPTIONS)
                .placeholder("Select acquisition type"),
            FormField::select(
                "investment_focus.revenue_focus",
                "Revenue Focus",
                RevenueFocus::OPTIONS,
            )
            .placeholder("Select revenue focus"),
        ],
        notes: &[],
    },
    StepDefinition {
        id: "financial-capacity",
        title: "Financial Capacity",
        description: "Your budget and timeline",
        fields: &[
            FormField::number("budget.min", "Minimum Budget")
                .required()
                .placeholder("$100,000"),
            FormField::number("budget.max", "Maximum Budget")
                .required()
                .placeholder("$5,000,000"),
            FormField::select("preferences.timeframe", "Desired Timeline", BUYER_TIMELINES)
                .placeholder("Select timeline"),
            FormField::select(
                "investment_focus.profitability_required",
                "Profitability Requirement",
                PROFITABILITY,
            )
            .placeholder("Select requirement"),
            FormField::select("investment_focus.team_size", "Preferred Team Size", TeamSize::OPTIONS)
                .placeholder("Select team size"),
        ],
        notes: &[],
    },
    StepDefinition {
        id: "experience-preferences",
        title: "Experience & Preferences",
        description: "Your background and goals",
        fields: &[
            FormField::number("background.years_of_experience", "Years of Business Experience")
                .placeholder("10"),
            FormField::number("background.previous_acquisitions", "Previous Acquisitions")
                .placeholder("0"),
            FormField::select("experience_level", "Experience Level", ExperienceLevel::OPTIONS)
                .placeholder("Select experience level"),
            FormField::select(
                "preferences.involvement_level",
                "Involvement Level",
                InvolvementLevel::OPTIONS,
            )
            .placeholder("Select involvement level"),
            FormField::textarea("preferences.growth_strategy", "Growth Strategy & Goals")
                .placeholder("Describe your goals for the business post-acquisition..."),
        ],
        notes: &[],
    },
];

pub const SELLER_STEPS: &[StepDefinition] = &[
    StepDefinition {
        id: "business-overview",
        title: "Business Overview",
        description: "Tell us about your business",
        fields: &[
            FormField::text("first_name", "First Name")
                .required()
                .placeholder("Enter your first name"),
            FormField::text("last_name", "Last Name")
                .required()
                .placeholder("Enter your last name"),
            FormField::email("email", "Email Address")
                .required()
                .placeholder("Enter your email address"),
            FormField::text("business.name", "Business Name")
                .required()
                .placeholder("Enter your business name"),
            FormField::select("business.industry", "Industry", SELLER_INDUSTRIES)
                .required()
                .placeholder("Select industry"),
            FormField::number("business.founded", "Year Founded").placeholder("2020"),
            FormField::text("business.location", "Business Location")
                .placeholder("City, State/Country"),
            FormField::text("business.website", "Website (Optional)")
                .placeholder("https://yourbusiness.com"),
            FormField::textarea("business.description", "Business Description").placeholder(
                "Describe what your business does, your target market, and key value propositions...",
            ),
        ],
        notes: &[],
    },
    StepDefinition {
        id: "financial-performance",
        title: "Financial Performance",
        description: "Revenue and profitability metrics",
        fields: &[
            FormField::number("financials.asking_price", "Asking Price")
                .required()
                .placeholder("1000000")
                .helper("Your desired sale price"),
            FormField::number("financials.annual_revenue", "Annual Revenue")
                .required()
                .placeholder("500000")
                .helper("Last 12 months"),
            FormField::number("financials.monthly_revenue", "Monthly Revenue")
                .placeholder("40000")
                .helper("Average monthly revenue"),
            FormField::number("financials.profit", "Net Profit")
                .placeholder("150000")
                .helper("Annual net profit"),
            FormField::number("financials.growth.revenue_growth", "Revenue Growth (%)")
                .placeholder("25")
                .helper("Year-over-year growth"),
            FormField::number("financials.growth.customer_growth", "Customer Growth (%)")
                .placeholder("20")
                .helper("Customer base growth"),
            FormField::number("metrics.customers", "Number of Customers")
                .placeholder("1500")
                .helper("Total active customers"),
        ],
        notes: &[],
    },
    StepDefinition {
        id: "operations-team",
        title: "Operations & Team",
        description: "How your business operates",
        fields: &[
            FormField::number("operations.employee_count", "Number of Employees")
                .placeholder("8")
                .helper("Full-time equivalent employees"),
            FormField::select(
                "operations.owner_involvement",
                "Owner Involvement",
                OwnerInvolvement::OPTIONS,
            )
            .placeholder("Select involvement level"),
            FormField::textarea("operations.assets", "Key Business Assets").placeholder(
                "List key assets: equipment, intellectual property, customer lists, contracts, etc.",
            ),
            FormField::textarea("metrics.competitive_advantages", "Competitive Advantages")
                .placeholder(
                    "What makes your business unique? Patents, exclusive partnerships, market position, etc.",
                ),
            FormField::textarea("metrics.challenges", "Current Challenges").placeholder(
                "What challenges does the business face? Be honest - buyers appreciate transparency.",
            ),
        ],
        notes: &[],
    },
    StepDefinition {
        id: "sale-details",
        title: "Sale Details",
        description: "Why you're selling and expectations",
        fields: &[
            FormField::textarea("operations.reason", "Reason for Selling")
                .placeholder("Why are you selling? (retirement, new venture, health, etc.)"),
            FormField::select("operations.timeframe", "Desired Timeline", SELLER_TIMELINES)
                .placeholder("Select timeline"),
        ],
        notes: &[
            "Financial documents will be requested during due diligence",
            "All information will be kept confidential until mutual agreement",
            "Our AI will help match you with qualified buyers",
            "You can update your listing at any time",
        ],
    },
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn tables_have_four_steps() {
        assert_eq!(BUYER_STEPS.len(), 4);
        assert_eq!(SELLER_STEPS.len(), 4);
        assert_eq!(BUYER_STEPS[0].title, "Personal Info");
        assert_eq!(SELLER_STEPS[3].title, "Sale Details");
    }

    #[test]
    fn field_keys_are_unique_per_table() {
        for table in [BUYER_STEPS, SELLER_STEPS] {
            let mut seen = HashSet::new();
            for step in table {
                for field in step.fields {
                    assert!(seen.insert(field.key), "duplicate key {}", field.key);
                }
            }
        }
    }

    #[test]
    fn step_ids_are_unique() {
        for table in [BUYER_STEPS, SELLER_STEPS] {
            let ids: HashSet<_> = table.iter().map(|s| s.id).collect();
            assert_eq!(ids.len(), table.len());
        }
    }

    #[test]
    fn find_field_searches_all_steps() {
        let field = find_field(SELLER_STEPS, "financials.asking_price").unwrap();
        assert_eq!(field.label, "Asking Price");
        assert!(field.required);
        assert!(find_field(SELLER_STEPS, "budget.min").is_none());
        assert!(find_field(BUYER_STEPS, "budget.min").is_some());
    }
}
