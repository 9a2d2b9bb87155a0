use super::domain::{
    AgentDetails, EntityDetails, EntityType, LeadDetails, PropertyDetails, ScoreRecord,
};
use super::synthesis::{FactorSynthesizer, SynthesisError};
use super::vocabulary::{
    AREAS, EMAIL_DOMAINS, FIRST_NAMES, LAST_NAMES, LEAD_SOURCES, LEAD_STATUSES, PROPERTY_TYPES,
    STREETS,
};
use chrono::{DateTime, Duration, Utc};
use fastrand::Rng;
use tracing::debug;

pub const DEFAULT_FACTOR_COUNT: usize = 4;
const HISTORY_DAYS: i64 = 180;

/// Builds synthetic scored records so downstream consumers can be exercised
/// without a persistence layer. `now` anchors every generated timestamp.
#[derive(Debug, Clone)]
pub struct RecordGenerator {
    factor_count: usize,
    now: DateTime<Utc>,
}

impl RecordGenerator {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            factor_count: DEFAULT_FACTOR_COUNT,
            now,
        }
    }

    pub fn with_factor_count(mut self, factor_count: usize) -> Self {
        self.factor_count = factor_count;
        self
    }

    pub fn generate(
        &self,
        rng: &mut Rng,
        entity_type: EntityType,
        count: usize,
    ) -> Result<Vec<ScoreRecord>, SynthesisError> {
        let synthesizer = FactorSynthesizer::for_entity(entity_type);
        let mut records = Vec::with_capacity(count);

        for index in 0..count {
            let score = f64::from(rng.u32(0..=1000)) / 10.0;
            let factors = synthesizer.synthesize(rng, self.factor_count, score)?;
            let details = match entity_type {
                EntityType::Lead => EntityDetails::Lead(lead_details(rng)),
                EntityType::Property => EntityDetails::Property(property_details(rng)),
                EntityType::Agent => EntityDetails::Agent(agent_details(rng)),
            };
            let (created_at, updated_at) = self.timestamps(rng);

            records.push(ScoreRecord {
                id: format!("{}-{:05}", entity_type.id_prefix(), index + 1),
                entity_type,
                score,
                factors,
                details,
                created_at,
                updated_at,
            });
        }

        debug!(entity = %entity_type, count, "generated synthetic score records");
        Ok(records)
    }

    fn timestamps(&self, rng: &mut Rng) -> (DateTime<Utc>, DateTime<Utc>) {
        let age_minutes = rng.i64(0..HISTORY_DAYS * 24 * 60);
        let created_at = self.now - Duration::minutes(age_minutes);
        let since_created = (self.now - created_at).num_seconds().max(0);
        let updated_at = created_at + Duration::seconds(rng.i64(0..=since_created));
        (created_at, updated_at)
    }
}

fn pick<'a>(rng: &mut Rng, options: &[&'a str]) -> &'a str {
    options[rng.usize(..options.len())]
}

fn person(rng: &mut Rng) -> (String, String) {
    let first = pick(rng, FIRST_NAMES);
    let last = pick(rng, LAST_NAMES);
    let email = format!(
        "{}.{}{}@{}",
        first.to_ascii_lowercase(),
        last.to_ascii_lowercase(),
        rng.u16(1..1000),
        pick(rng, EMAIL_DOMAINS)
    );
    (format!("{first} {last}"), email)
}

fn lead_details(rng: &mut Rng) -> LeadDetails {
    let (name, email) = person(rng);
    LeadDetails {
        name,
        email,
        source: pick(rng, LEAD_SOURCES).to_string(),
        status: pick(rng, LEAD_STATUSES).to_string(),
        budget: rng.u32(150..=900) * 1_000,
        preferred_area: pick(rng, AREAS).to_string(),
    }
}

fn property_details(rng: &mut Rng) -> PropertyDetails {
    let property_type = pick(rng, PROPERTY_TYPES);
    let bedrooms = match property_type {
        "land" | "commercial" => 0,
        _ => rng.u8(1..=5),
    };

    PropertyDetails {
        address: format!("{} {}", rng.u16(100..=4999), pick(rng, STREETS)),
        area: pick(rng, AREAS).to_string(),
        property_type: property_type.to_string(),
        list_price: rng.u32(120..=950) * 1_000,
        bedrooms,
        square_feet: rng.u32(650..=4_200),
    }
}

fn agent_details(rng: &mut Rng) -> AgentDetails {
    let (name, email) = person(rng);
    AgentDetails {
        name,
        email,
        area: pick(rng, AREAS).to_string(),
        deals_closed: rng.u32(0..=60),
        active_listings: rng.u32(0..=25),
        rating: rng.u8(30..=50) as f32 / 10.0,
    }
}
