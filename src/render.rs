//! Plain-text rendering of every screen for the terminal front-end.

use crate::analysis::{AnalysisPanel, DocumentSummary};
use crate::onboarding::{Draft, StepState, Wizard};
use crate::profiles::{BuyerCardView, BuyerProfileDetail, MatchDecision, Role};
use crate::ui::Progress;
use crate::view::{Screen, ViewKind, ViewRouter, nav_items};
use crate::workflow::{StepDetail, StepStatus, StepView, WorkflowTracker};

const BAR_WIDTH: usize = 30;

/// Render whatever screen the router is showing.
pub fn render(router: &ViewRouter) -> String {
    let mut lines = navigation(router.view());
    let body = match router.screen() {
        Screen::Landing => landing(),
        Screen::BuyerOnboarding(wizard) => onboarding("Buyer Onboarding", wizard),
        Screen::SellerOnboarding(wizard) => onboarding("Seller Onboarding", wizard),
        Screen::BuyerBrowse => buyer_browse(router),
        Screen::BuyerProfile { buyer_id } => buyer_profile(router, buyer_id),
        Screen::Acquisition(tracker) => workflow(tracker),
        Screen::AiAnalyzer(panel) => analyzer(panel),
    };
    lines.extend(body);
    lines.join("\n")
}

/// Every field of a wizard, with its key and accepted values.
pub fn field_reference<D: Draft>(wizard: &Wizard<D>) -> String {
    let mut lines = Vec::new();
    for (i, step) in wizard.steps().iter().enumerate() {
        lines.push(format!("{}. {}", i + 1, step.title));
        for field in step.fields {
            let marker = if field.required { " *" } else { "" };
            lines.push(format!("  {:<40} {}{}", field.key, field.label, marker));
            let options = field.options();
            if !options.is_empty() {
                let values: Vec<&str> = options.iter().map(|o| o.value).collect();
                lines.push(format!("  {:<40}   one of: {}", "", values.join(", ")));
            }
        }
    }
    lines.join("\n")
}

fn navigation(view: ViewKind) -> Vec<String> {
    let Some((role, notifications)) = view.navigation() else {
        return Vec::new();
    };
    let who = match role {
        Role::Buyer => "Buyer",
        Role::Seller => "Seller",
    };
    vec![
        format!(
            "DealFlow | {} | {} ({notifications} new)",
            nav_items(role).join(" . "),
            who
        ),
        String::new(),
    ]
}

fn landing() -> Vec<String> {
    vec![
        "Business Acquisitions, Reimagined".to_string(),
        "Connect qualified buyers and sellers through our seller-first matching platform."
            .to_string(),
        String::new(),
        "  buy   I'm Looking to Buy".to_string(),
        "  sell  I'm Looking to Sell".to_string(),
        String::new(),
        "Seller-First Matching: Sellers initiate contact with qualified buyers.".to_string(),
        "Streamlined Workflow: Guided acquisition process with clear milestones.".to_string(),
        "AI-Powered Insights: Automated document analysis, risk assessment and valuation."
            .to_string(),
        String::new(),
        "Explore the Platform".to_string(),
        "  browse    View Buyer Cards Demo".to_string(),
        "  workflow  See Acquisition Workflow".to_string(),
        "  analyzer  Try AI Document Analyzer".to_string(),
    ]
}

fn onboarding<D: Draft>(title: &str, wizard: &Wizard<D>) -> Vec<String> {
    let mut lines = vec![
        format!("{title}    {}", wizard.step_label()),
        Progress::percent_of_100(wizard.progress()).bar(BAR_WIDTH),
        String::new(),
    ];

    let indicators: Vec<String> = wizard
        .indicators()
        .iter()
        .map(|ind| {
            let mark = match ind.state {
                StepState::Completed => "x",
                StepState::Active => ">",
                StepState::Upcoming => " ",
            };
            format!("[{mark}] {}", ind.title)
        })
        .collect();
    lines.push(indicators.join("  "));
    lines.push(String::new());

    let Some(step) = wizard.current_step() else {
        return lines;
    };
    lines.push(step.title.to_string());
    lines.push(step.description.to_string());
    lines.push(String::new());

    let errors = wizard.validate_current_step();
    for field in step.fields {
        let current = wizard.record().field(field.key);
        let error = errors.iter().find(|e| e.key() == field.key);
        lines.push(field.render(current.as_deref(), error));
    }
    for note in step.notes {
        lines.push(format!("  - {note}"));
    }

    lines.push(String::new());
    lines.push(format!("back | next: {}", wizard.primary_action_label()));
    lines
}

fn buyer_browse(router: &ViewRouter) -> Vec<String> {
    let mut lines = vec![
        "Potential Buyers".to_string(),
        "Review and match with qualified buyers interested in businesses like yours.".to_string(),
        String::new(),
    ];
    for buyer in router.buyers() {
        let card = BuyerCardView::from_profile(buyer);
        lines.extend(buyer_card(&card, router.decision(&card.buyer_id)));
        lines.push(String::new());
    }
    lines.push("home: Back to Demo".to_string());
    lines
}

fn buyer_card(card: &BuyerCardView, decision: Option<MatchDecision>) -> Vec<String> {
    let mut industries = card.industries.join(", ");
    if card.more_industries > 0 {
        industries.push_str(&format!(" +{} more", card.more_industries));
    }
    let position = match &card.company {
        Some(company) => format!("{} at {company}", card.current_role),
        None => card.current_role.clone(),
    };
    let status = match decision {
        Some(MatchDecision::Accept) => " [accepted]",
        Some(MatchDecision::Reject) => " [passed]",
        None => "",
    };

    vec![
        format!("({}) {} [{}]{status}", card.initials, card.name, card.experience),
        format!("    {position}"),
        format!("    Budget: {}", card.budget),
        format!("    Industries: {industries}"),
        format!(
            "    Region: {} | Timeline: {} | {} involvement",
            card.region, card.timeframe, card.involvement
        ),
        format!(
            "    {} years experience, {} previous acquisitions",
            card.years_of_experience, card.previous_acquisitions
        ),
        format!(
            "    profile {id} | accept {id} | reject {id}",
            id = card.buyer_id
        ),
    ]
}

fn buyer_profile(router: &ViewRouter, buyer_id: &str) -> Vec<String> {
    let Some(buyer) = router.buyer(buyer_id) else {
        return vec![format!("Buyer {buyer_id} not found"), "back".to_string()];
    };
    let detail = BuyerProfileDetail::from_profile(buyer);
    let mut lines = vec![
        format!("{} - {}", detail.name, detail.headline),
        format!("{} | Member since {}", detail.experience, detail.member_since),
        String::new(),
        "Investment Criteria".to_string(),
        format!("  Budget Range: {}", detail.budget),
        format!("  Industries: {}", detail.industries.join(", ")),
        format!("  Regions: {}", detail.regions.join(", ")),
        format!("  Acquisition Type: {}", detail.acquisition_type),
        String::new(),
        "Business Preferences".to_string(),
        format!("  Revenue: {}", detail.revenue_focus),
        format!("  Profitability: {}", detail.profitability),
        format!("  Team Size: {}", detail.team_size),
        String::new(),
        "Experience".to_string(),
        format!("  {} years of business experience", detail.years_of_experience),
        format!("  {} previous acquisitions", detail.previous_acquisitions),
        format!("  Timeline: {}", detail.timeframe),
        format!("  Involvement: {}", detail.involvement),
        String::new(),
        format!("About {}", detail.first_name),
        format!("  {}", detail.growth_strategy),
        String::new(),
    ];
    if let Some(decision) = router.decision(buyer_id) {
        lines.push(format!("Your decision: {decision}"));
    }
    lines.push(format!("accept {buyer_id} | reject {buyer_id} | back"));
    lines
}

fn workflow(tracker: &WorkflowTracker) -> Vec<String> {
    let deal = tracker.deal();
    let mut lines = vec![
        "Acquisition Process".to_string(),
        format!("Deal ID: {}", deal.id),
        format!("~{} days remaining", tracker.estimate_remaining_days()),
        format!(
            "{:.0}% complete - {}",
            tracker.progress(),
            deal.status.as_str().replace('-', " ")
        ),
        Progress::percent_of_100(tracker.progress()).bar(BAR_WIDTH),
        String::new(),
    ];

    for (i, row) in tracker.rows().iter().enumerate() {
        let mark = match row.status {
            StepStatus::Completed => "x",
            StepStatus::InProgress => ">",
            StepStatus::Blocked => "!",
            StepStatus::Pending => " ",
        };
        let cursor = if row.selected { "*" } else { " " };
        lines.push(format!(
            "{cursor}[{mark}] {}. {:<22} {:>2} days  {}",
            i + 1,
            row.def.name,
            row.def.estimated_days,
            row.def.id
        ));
    }
    lines.push(String::new());

    match tracker.selected_view() {
        Some(view) => lines.extend(step_detail(&view)),
        None => {
            lines.push("Select a step to view details".to_string());
            lines.push(
                "Click on any step from the left to see detailed information, requirements, and actions."
                    .to_string(),
            );
        }
    }
    lines
}

fn step_detail(view: &StepView) -> Vec<String> {
    let mut lines = vec![format!("{} ({})", view.name, view.status.label())];
    match &view.detail {
        StepDetail::Documents { required, optional } => {
            lines.push("Required Documents".to_string());
            lines.extend(required.iter().map(|d| format!("  - {d}")));
            lines.push("Optional Documents".to_string());
            lines.extend(optional.iter().map(|d| format!("  - {d}")));
        }
        StepDetail::Analysis(Some(analysis)) => {
            lines.push(format!(
                "AI Analysis Results ({}% confidence)",
                analysis.confidence_percent()
            ));
            lines.push(format!("  {}", analysis.summary));
            lines.extend(section("Key Findings", &analysis.key_findings));
            lines.extend(section("Areas of Concern", &analysis.red_flags));
            lines.extend(section("Recommendations", &analysis.recommendations));
        }
        StepDetail::Analysis(None) => {
            lines.push("AI Due Diligence Assistant".to_string());
            lines.push("  Upload documents to receive an automated review.".to_string());
        }
        StepDetail::Valuation(cards) => {
            for card in cards.iter() {
                lines.push(format!("  {}: {} ({})", card.title, card.value, card.note));
            }
        }
        StepDetail::Summary {
            description,
            estimated_days,
        } => {
            lines.push(format!("  {description}"));
            lines.push(format!(
                "  This step typically takes {estimated_days} days to complete."
            ));
        }
        StepDetail::Unknown => {
            lines.push("  No details are available for this step.".to_string());
        }
    }

    if !view.documents.is_empty() {
        lines.push(format!("Documents: {}", view.documents.join(", ")));
    }
    if view.status == StepStatus::Completed {
        lines.push("Completed".to_string());
    } else if view.uploading {
        lines.push("Uploading...".to_string());
    } else if view.actionable {
        lines.push(format!(
            "Upload Documents: upload {id} <path> | Mark Complete: complete {id}",
            id = view.id
        ));
    }
    lines
}

fn section(title: &str, items: &[String]) -> Vec<String> {
    if items.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![format!("  {title}")];
    lines.extend(items.iter().map(|item| format!("    - {item}")));
    lines
}

fn analyzer(panel: &AnalysisPanel) -> Vec<String> {
    let mut lines = vec![
        "AI Document Analysis".to_string(),
        "Upload financial and business documents for automated analysis, risk assessment, and insights."
            .to_string(),
        String::new(),
    ];
    let cards: Vec<String> = panel
        .overview()
        .iter()
        .map(|c| format!("{}: {} ({})", c.title, c.value, c.caption))
        .collect();
    lines.push(cards.join(" | "));
    lines.push(String::new());

    if let Some(progress) = panel.upload_progress() {
        lines.push(format!(
            "Uploading {}",
            Progress::percent_of_100(progress).bar(BAR_WIDTH)
        ));
    }

    let summaries = panel.summaries();
    if summaries.is_empty() {
        lines.push("No documents uploaded yet".to_string());
    }
    for summary in &summaries {
        lines.extend(document(panel, summary));
        lines.push(String::new());
    }
    lines.push("add-doc <path> | analyze <doc-id> | home".to_string());
    lines
}

fn document(panel: &AnalysisPanel, summary: &DocumentSummary) -> Vec<String> {
    let mut header = format!(
        "{} [{}] {} | {} | {}",
        summary.name,
        summary.badge(),
        summary.id,
        summary.doc_type,
        summary.size
    );
    if summary.has_concerns() {
        header.push_str(" | review concerns");
    }
    let mut lines = vec![header];

    if summary.analyzed {
        if let Some(text) = &summary.summary {
            lines.push(format!("  {text}"));
        }
        lines.extend(section("Key Findings", &summary.key_findings));
        lines.extend(section("Areas of Concern", &summary.red_flags));
        if let Some(confidence) = summary.confidence_percent {
            lines.push(format!("  Confidence: {confidence}%"));
        }
    } else if summary.analyzing {
        let progress = panel.analysis_progress(&summary.id).unwrap_or_default();
        lines.push(format!(
            "  Analyzing... {}",
            Progress::percent_of_100(progress).bar(BAR_WIDTH)
        ));
    } else {
        lines.push("  Document ready for AI analysis".to_string());
        lines.push(format!("  Start Analysis: analyze {}", summary.id));
    }
    lines
}
