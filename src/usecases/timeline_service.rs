//! Timeline service. Turns the user's filters into a grounded model call and the
//! reply into structured events.

use crate::adapters::ai::{parse_events, timeline_prompt};
use crate::domain::{
    BirthYear, DomainError, GroundingChunk, ParsedEvents, TimelineQuery, TimelineResponse, Topic,
};
use crate::ports::AiPort;
use chrono::Datelike;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Raw timeline form input, as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct TimelineForm {
    pub birth_year: String,
    pub country: String,
    pub topics: Vec<Topic>,
    pub search_term: String,
}

/// Result of one generation. `events` keeps the parse outcome; the view collapses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineResult {
    pub events: ParsedEvents,
    pub grounding_chunks: Option<Vec<GroundingChunk>>,
}

impl TimelineResult {
    pub fn into_response(self) -> TimelineResponse {
        TimelineResponse {
            events: self.events.into_events(),
            grounding_chunks: self.grounding_chunks,
        }
    }
}

/// Service for search-grounded timeline generation.
pub struct TimelineService {
    ai: Arc<dyn AiPort>,
    model: String,
}

impl TimelineService {
    /// Shown to the user for any transport/API failure.
    pub const FAILURE_MESSAGE: &'static str = "Failed to generate timeline. Please try again.";

    pub fn new(ai: Arc<dyn AiPort>, model: impl Into<String>) -> Self {
        Self {
            ai,
            model: model.into(),
        }
    }

    /// Validate the form against the local clock's year.
    pub fn validate(form: &TimelineForm) -> Result<TimelineQuery, DomainError> {
        Self::validate_at(form, chrono::Local::now().year())
    }

    pub fn validate_at(
        form: &TimelineForm,
        current_year: i32,
    ) -> Result<TimelineQuery, DomainError> {
        let birth_year = BirthYear::parse(&form.birth_year, current_year)?;
        Ok(TimelineQuery {
            birth_year,
            current_year,
            country: form.country.clone(),
            topics: form.topics.clone(),
            search_term: form.search_term.clone(),
        })
    }

    /// Validate and generate. Invalid input never reaches the model.
    pub async fn generate_from_form(
        &self,
        form: &TimelineForm,
    ) -> Result<TimelineResult, DomainError> {
        let query = Self::validate(form)?;
        self.generate(&query).await
    }

    /// Generate a timeline for an already validated query.
    pub async fn generate(&self, query: &TimelineQuery) -> Result<TimelineResult, DomainError> {
        info!(
            birth_year = %query.birth_year,
            country = query.country().unwrap_or("-"),
            topics = query.topics.len(),
            search_term = query.search_term().unwrap_or("-"),
            "generating timeline"
        );

        let prompt = timeline_prompt(query);
        let reply = self
            .ai
            .generate_grounded(&self.model, &prompt)
            .await
            .inspect_err(|e| error!(error = %e, "timeline generation failed"))?;

        let text = reply.text.unwrap_or_else(|| "[]".to_string());
        let events = parse_events(&text);
        match &events {
            ParsedEvents::Parsed(list) => info!(events = list.len(), "timeline generated"),
            ParsedEvents::Unparsable { reason } => {
                warn!(reason = %reason, "model reply was not a valid event list")
            }
        }

        Ok(TimelineResult {
            events,
            grounding_chunks: reply.grounding_chunks,
        })
    }
}
