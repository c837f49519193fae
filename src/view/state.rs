//! Top-level view state machine: which screen is showing and which screen
//! changes are allowed.

use std::fmt;

use crate::backend::FileHandle;
use crate::profiles::Role;

labelled_enum! {
    /// The screens of the application.
    #[derive(Default)]
    pub enum ViewKind {
        #[default]
        Landing => ("landing", "Landing"),
        BuyerOnboarding => ("buyer-onboarding", "Buyer Onboarding"),
        SellerOnboarding => ("seller-onboarding", "Seller Onboarding"),
        BuyerBrowse => ("buyer-browse", "Potential Buyers"),
        BuyerProfile => ("buyer-profile", "Buyer Profile"),
        Acquisition => ("acquisition", "Acquisition Workflow"),
        AiAnalyzer => ("ai-analyzer", "AI Document Analyzer"),
    }
}

impl ViewKind {
    /// Check if a transition from `self` to `target` is valid.
    ///
    /// Every screen except the landing page can return to it.
    pub fn can_transition_to(&self, target: ViewKind) -> bool {
        use ViewKind::*;
        if *self != Landing && target == Landing {
            return true;
        }
        matches!(
            (self, target),
            (Landing, BuyerOnboarding)
                | (Landing, SellerOnboarding)
                | (Landing, BuyerBrowse)
                | (Landing, Acquisition)
                | (Landing, AiAnalyzer)
                | (BuyerOnboarding, BuyerBrowse)
                | (SellerOnboarding, BuyerBrowse)
                | (BuyerBrowse, BuyerProfile)
                | (BuyerProfile, BuyerBrowse)
        )
    }

    /// Where "back" leads from this screen. Onboarding handles back
    /// itself until its first step.
    pub fn back_target(&self) -> Option<ViewKind> {
        match self {
            Self::Landing => None,
            Self::BuyerProfile => Some(Self::BuyerBrowse),
            _ => Some(Self::Landing),
        }
    }

    /// Navigation bar shown on this screen: whose menu, and the unread
    /// notification count.
    pub fn navigation(&self) -> Option<(Role, u32)> {
        match self {
            Self::BuyerBrowse | Self::BuyerProfile => Some((Role::Seller, 3)),
            Self::Acquisition => Some((Role::Buyer, 2)),
            Self::AiAnalyzer => Some((Role::Buyer, 1)),
            _ => None,
        }
    }
}

/// Navigation menu entries per role.
pub fn nav_items(role: Role) -> &'static [&'static str] {
    match role {
        Role::Buyer => &[
            "Dashboard",
            "Browse Businesses",
            "Matches",
            "Messages",
            "Active Deals",
            "AI Tools",
        ],
        Role::Seller => &[
            "Dashboard",
            "Business Profile",
            "Potential Buyers",
            "Messages",
            "Active Deals",
            "AI Tools",
        ],
    }
}

/// A user intent, dispatched to the router.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction {
    /// Landing: start onboarding for a role.
    ChooseRole(Role),
    /// Landing: jump straight to a demo screen.
    OpenDemo(ViewKind),
    Home,
    Back,
    /// Onboarding: set a field from raw input.
    SetField { key: String, value: String },
    /// Onboarding: continue, or complete on the last step.
    Next,
    ViewBuyer(String),
    AcceptBuyer(String),
    RejectBuyer(String),
    SelectStep(String),
    CompleteStep(String),
    UploadStepDocument { step_id: String, file: FileHandle },
    RequestAnalysis(String),
    UploadDocument(FileHandle),
}

impl ViewAction {
    /// Short command-style name, for errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ChooseRole(_) => "choose-role",
            Self::OpenDemo(_) => "open-demo",
            Self::Home => "home",
            Self::Back => "back",
            Self::SetField { .. } => "set",
            Self::Next => "next",
            Self::ViewBuyer(_) => "profile",
            Self::AcceptBuyer(_) => "accept",
            Self::RejectBuyer(_) => "reject",
            Self::SelectStep(_) => "select",
            Self::CompleteStep(_) => "complete",
            Self::UploadStepDocument { .. } => "upload",
            Self::RequestAnalysis(_) => "analyze",
            Self::UploadDocument(_) => "add-doc",
        }
    }
}

impl fmt::Display for ViewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_landing() {
        assert_eq!(ViewKind::default(), ViewKind::Landing);
        assert_eq!(ViewKind::default().back_target(), None);
    }

    #[test]
    fn valid_transitions() {
        use ViewKind::*;
        let transitions = [
            (Landing, BuyerOnboarding),
            (Landing, SellerOnboarding),
            (Landing, BuyerBrowse),
            (Landing, Acquisition),
            (Landing, AiAnalyzer),
            (BuyerOnboarding, BuyerBrowse),
            (SellerOnboarding, BuyerBrowse),
            (BuyerBrowse, BuyerProfile),
            (BuyerProfile, BuyerBrowse),
            (Acquisition, Landing),
            (AiAnalyzer, Landing),
            (SellerOnboarding, Landing),
        ];
        for (from, to) in transitions {
            assert!(from.can_transition_to(to), "{from} should transition to {to}");
        }
    }

    #[test]
    fn invalid_transitions() {
        use ViewKind::*;
        assert!(!Landing.can_transition_to(BuyerProfile));
        assert!(!Landing.can_transition_to(Landing));
        assert!(!Acquisition.can_transition_to(AiAnalyzer));
        assert!(!BuyerOnboarding.can_transition_to(SellerOnboarding));
        assert!(!AiAnalyzer.can_transition_to(BuyerProfile));
    }

    #[test]
    fn back_targets() {
        assert_eq!(ViewKind::Landing.back_target(), None);
        assert_eq!(ViewKind::BuyerProfile.back_target(), Some(ViewKind::BuyerBrowse));
        assert_eq!(ViewKind::Acquisition.back_target(), Some(ViewKind::Landing));
        for kind in ViewKind::ALL {
            if let Some(target) = kind.back_target() {
                assert!(kind.can_transition_to(target));
            }
        }
    }

    #[test]
    fn navigation_per_screen() {
        assert_eq!(ViewKind::BuyerBrowse.navigation(), Some((Role::Seller, 3)));
        assert_eq!(ViewKind::AiAnalyzer.navigation(), Some((Role::Buyer, 1)));
        assert_eq!(ViewKind::Landing.navigation(), None);
        assert_eq!(nav_items(Role::Seller)[2], "Potential Buyers");
        assert_eq!(nav_items(Role::Buyer)[1], "Browse Businesses");
    }

    #[test]
    fn display_matches_serde() {
        for kind in ViewKind::ALL {
            let json = serde_json::to_string(kind).unwrap();
            assert_eq!(format!("\"{kind}\""), json);
        }
    }
}
