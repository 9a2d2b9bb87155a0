mod domain;
pub mod generator;
pub mod synthesis;
pub mod tier;
pub mod vocabulary;

pub use domain::{
    AgentDetails, EntityDetails, EntityType, Factor, FactorBreakdown, LeadDetails,
    PropertyDetails, ScoreRecord,
};
pub use generator::RecordGenerator;
pub use synthesis::{FactorSynthesizer, SynthesisError};
pub use tier::{classify, Tier};
