//! Fixed vocabularies for factor names and descriptive record fields.

use super::domain::EntityType;

pub const LEAD_FACTORS: &[&str] = &[
    "Engagement Level",
    "Budget Alignment",
    "Purchase Timeline",
    "Response Rate",
    "Pre-Approval Status",
    "Property Views",
    "Inquiry Frequency",
    "Referral Quality",
    "Location Flexibility",
    "Communication Match",
];

pub const PROPERTY_FACTORS: &[&str] = &[
    "Location Quality",
    "Price Competitiveness",
    "Property Condition",
    "Market Demand",
    "Amenities",
    "School District",
    "Days on Market",
    "Listing Presentation",
    "Neighborhood Safety",
    "Transit Access",
];

pub const AGENT_FACTORS: &[&str] = &[
    "Closing Rate",
    "Client Satisfaction",
    "Response Time",
    "Market Knowledge",
    "Negotiation Skill",
    "Listing Volume",
    "Follow-up Consistency",
    "Referral Rate",
    "Pricing Accuracy",
    "Local Network",
];

pub const fn factor_names(entity_type: EntityType) -> &'static [&'static str] {
    match entity_type {
        EntityType::Lead => LEAD_FACTORS,
        EntityType::Property => PROPERTY_FACTORS,
        EntityType::Agent => AGENT_FACTORS,
    }
}

pub(crate) const FIRST_NAMES: &[&str] = &[
    "Avery", "Jordan", "Morgan", "Riley", "Casey", "Taylor", "Quinn", "Harper", "Rowan", "Emerson",
    "Parker", "Sawyer",
];

pub(crate) const LAST_NAMES: &[&str] = &[
    "Anderson", "Brooks", "Carter", "Diaz", "Ellis", "Foster", "Garcia", "Hughes", "Kim", "Lopez",
    "Nguyen", "Patel",
];

pub(crate) const AREAS: &[&str] = &[
    "Downtown",
    "East Village",
    "Riverfront",
    "Sherman Hill",
    "Beaverdale",
    "Ingersoll",
    "West Glen",
    "Waterbury",
];

pub(crate) const STREETS: &[&str] = &[
    "Grand Ave",
    "Ingersoll Ave",
    "University Ave",
    "Woodland Ave",
    "Cottage Grove Ave",
    "Locust St",
    "High St",
    "Park Ave",
];

pub(crate) const LEAD_SOURCES: &[&str] = &[
    "Website",
    "Referral",
    "Zillow",
    "Open House",
    "Social Media",
    "Walk-in",
];

/// Raw lead status keys as stored upstream.
pub const LEAD_STATUSES: &[&str] = &[
    "new",
    "contacted",
    "qualified",
    "negotiation",
    "closed",
    "lost",
];

/// Raw property type keys as stored upstream.
pub const PROPERTY_TYPES: &[&str] = &[
    "residential",
    "condo",
    "multi_family",
    "commercial",
    "land",
];

pub(crate) const EMAIL_DOMAINS: &[&str] = &["example.com", "mail.test", "inbox.test"];
