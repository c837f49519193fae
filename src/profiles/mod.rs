//! Marketplace participants: buyer and seller profiles and the cards
//! sellers browse.

pub mod card;
pub mod model;

pub use card::{BuyerCardView, BuyerProfileDetail, MatchDecision};
pub use model::{
    AcquisitionType, Background, Budget, BuyerPreferences, BuyerProfile, Business,
    ExperienceLevel, Financials, Growth, InvestmentFocus, InvolvementLevel, Metrics, Operations,
    OwnerInvolvement, Profile, RevenueFocus, Role, SellerProfile, TeamSize, User,
};
