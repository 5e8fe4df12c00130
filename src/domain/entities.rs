//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/terminal types here — adapters map wire shapes into these.

use super::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Earliest birth year the timeline accepts.
pub const MIN_BIRTH_YEAR: i32 = 1900;

/// Categories whose events are offered for visualization in the image editor.
const MYSTICAL_MARKERS: [&str; 4] = ["Urban Legends", "Superstition", "Myth", "Belief"];

/// One then-vs-now comparison produced by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub year: i32,
    pub category: String,
    pub original_belief: String,
    pub modern_reality: String,
    pub status: EventStatus,
    pub context: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_title: Option<String>,
}

impl TimelineEvent {
    /// True for legends, superstitions, myths and beliefs.
    pub fn is_mystical(&self) -> bool {
        MYSTICAL_MARKERS
            .iter()
            .any(|marker| self.category.contains(marker))
    }

    /// Image-editor instruction used by the "visualize" hand-off.
    pub fn visualize_prompt(&self) -> String {
        format!(
            "A mysterious and artistic representation of the urban legend: {}. Dark, atmospheric, cinematic style.",
            self.original_belief
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventStatus {
    Changed,
    Debunked,
    Confirmed,
    Evolved,
}

impl EventStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EventStatus::Changed => "Changed",
            EventStatus::Debunked => "Debunked",
            EventStatus::Confirmed => "Confirmed",
            EventStatus::Evolved => "Evolved",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of parsing the model's timeline text.
///
/// Keeps "the model legitimately returned zero items" apart from "the reply was not
/// parseable"; the UI collapses both to an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedEvents {
    Parsed(Vec<TimelineEvent>),
    Unparsable { reason: String },
}

impl ParsedEvents {
    pub fn into_events(self) -> Vec<TimelineEvent> {
        match self {
            ParsedEvents::Parsed(events) => events,
            ParsedEvents::Unparsable { .. } => Vec::new(),
        }
    }

    pub fn is_unparsable(&self) -> bool {
        matches!(self, ParsedEvents::Unparsable { .. })
    }
}

/// Citation returned by search grounding. Passed through as received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingChunk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<WebSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSource {
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub title: String,
}

/// What the timeline view renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineResponse {
    pub events: Vec<TimelineEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grounding_chunks: Option<Vec<GroundingChunk>>,
}

/// Topic filters offered by the timeline view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Education,
    Superstition,
    Belief,
    UrbanLegends,
    Records,
    Trivia,
    Religion,
    Health,
    Food,
    Science,
    Technology,
}

impl Topic {
    pub const ALL: [Topic; 11] = [
        Topic::Education,
        Topic::Superstition,
        Topic::Belief,
        Topic::UrbanLegends,
        Topic::Records,
        Topic::Trivia,
        Topic::Religion,
        Topic::Health,
        Topic::Food,
        Topic::Science,
        Topic::Technology,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Topic::Education => "Education",
            Topic::Superstition => "Superstition",
            Topic::Belief => "Belief",
            Topic::UrbanLegends => "Urban Legends",
            Topic::Records => "Records",
            Topic::Trivia => "Trivia",
            Topic::Religion => "Religion",
            Topic::Health => "Health",
            Topic::Food => "Food",
            Topic::Science => "Science",
            Topic::Technology => "Technology",
        }
    }

    /// Lookup by display name.
    pub fn from_name(name: &str) -> Option<Topic> {
        Topic::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated birth year in [MIN_BIRTH_YEAR, current year].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BirthYear(i32);

impl BirthYear {
    pub const INVALID_MESSAGE: &'static str = "Please enter a valid birth year (1900 - present).";

    /// Parse raw form input. Only a plain base-10 integer is accepted.
    pub fn parse(input: &str, current_year: i32) -> Result<Self, DomainError> {
        let year: i32 = input
            .trim()
            .parse()
            .map_err(|_| DomainError::Validation(Self::INVALID_MESSAGE.to_string()))?;
        if !(MIN_BIRTH_YEAR..=current_year).contains(&year) {
            return Err(DomainError::Validation(Self::INVALID_MESSAGE.to_string()));
        }
        Ok(Self(year))
    }

    pub fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for BirthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Filters for one timeline request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineQuery {
    pub birth_year: BirthYear,
    pub current_year: i32,
    pub country: String,
    pub topics: Vec<Topic>,
    pub search_term: String,
}

impl TimelineQuery {
    /// Country, if non-blank.
    pub fn country(&self) -> Option<&str> {
        non_blank(&self.country)
    }

    /// Search term, if non-blank. When present it overrides country and topics.
    pub fn search_term(&self) -> Option<&str> {
        non_blank(&self.search_term)
    }

    pub fn has_topic(&self, topic: Topic) -> bool {
        self.topics.contains(&topic)
    }
}

fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// `data:<mime>;base64,<payload>` split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime_type: String,
    pub data: String,
}

impl DataUrl {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let rest = input.strip_prefix("data:").ok_or_else(|| {
            DomainError::InvalidDataUrl("expected a string starting with 'data:'".to_string())
        })?;
        let (mime_type, data) = rest.split_once(";base64,").ok_or_else(|| {
            DomainError::InvalidDataUrl("expected 'data:<mimeType>;base64,<payload>'".to_string())
        })?;
        if mime_type.is_empty() || !mime_type.contains('/') {
            return Err(DomainError::InvalidDataUrl(format!(
                "malformed MIME type '{}'",
                mime_type
            )));
        }
        if data.is_empty() {
            return Err(DomainError::InvalidDataUrl("empty base64 payload".to_string()));
        }
        Ok(Self::new(mime_type, data))
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.data)
    }
}

/// Inline binary payload of a multimodal reply. `data` is base64.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: Option<String>,
    pub data: String,
}

/// One fragment of a multimodal model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    Text(String),
    InlineData(InlineImage),
}

/// Free text from a search-grounded call, plus citations if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroundedText {
    pub text: Option<String>,
    pub grounding_chunks: Option<Vec<GroundingChunk>>,
}

/// Image editor view-model. Lives only as long as the editor session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageEditState {
    pub original_image: Option<String>,
    pub generated_image: Option<String>,
    pub prompt: String,
    pub is_generating: bool,
    pub error: Option<String>,
}

impl ImageEditState {
    pub fn with_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    /// A freshly loaded image invalidates any previous result.
    pub fn load_image(&mut self, data_url: String) {
        self.original_image = Some(data_url);
        self.generated_image = None;
        self.error = None;
    }

    pub fn begin(&mut self) {
        self.is_generating = true;
        self.error = None;
    }

    pub fn finish(&mut self, outcome: Result<String, DomainError>) {
        self.is_generating = false;
        match outcome {
            Ok(image) => self.generated_image = Some(image),
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(category: &str) -> TimelineEvent {
        TimelineEvent {
            year: 1990,
            category: category.to_string(),
            original_belief: "Bulls hate red".to_string(),
            modern_reality: "Bulls are colorblind to red".to_string(),
            status: EventStatus::Debunked,
            context: "Motion triggers the charge".to_string(),
            source_url: None,
            source_title: None,
        }
    }

    #[test]
    fn test_birth_year_bounds() {
        assert_eq!(BirthYear::parse("1900", 2026).unwrap().value(), 1900);
        assert_eq!(BirthYear::parse(" 2026 ", 2026).unwrap().value(), 2026);
        assert!(BirthYear::parse("1899", 2026).is_err());
        assert!(BirthYear::parse("2027", 2026).is_err());
    }

    #[test]
    fn test_birth_year_rejects_non_numeric() {
        for input in ["", "abc", "19x5", "1985.5", "-1985"] {
            let err = BirthYear::parse(input, 2026).unwrap_err();
            assert_eq!(
                err,
                DomainError::Validation(BirthYear::INVALID_MESSAGE.to_string())
            );
        }
    }

    #[test]
    fn test_data_url_parse() {
        let url = DataUrl::parse("data:image/webp;base64,AAAA").unwrap();
        assert_eq!(url.mime_type, "image/webp");
        assert_eq!(url.data, "AAAA");
        assert_eq!(url.to_string(), "data:image/webp;base64,AAAA");
    }

    #[test]
    fn test_data_url_malformed() {
        for input in [
            "image/png;base64,AAAA",
            "data:image/png,AAAA",
            "data:;base64,AAAA",
            "data:png;base64,AAAA",
            "data:image/png;base64,",
        ] {
            assert!(
                matches!(DataUrl::parse(input), Err(DomainError::InvalidDataUrl(_))),
                "accepted {input}"
            );
        }
    }

    #[test]
    fn test_event_json_shape() {
        let json = r#"{"year":1995,"category":"Science","originalBelief":"Pluto is a planet",
            "modernReality":"Dwarf planet since 2006","status":"Changed","context":"IAU vote",
            "sourceUrl":"https://example.org/pluto"}"#;
        let e: TimelineEvent = serde_json::from_str(json).unwrap();
        assert_eq!(e.status, EventStatus::Changed);
        assert_eq!(e.source_url.as_deref(), Some("https://example.org/pluto"));
        assert_eq!(e.source_title, None);
    }

    #[test]
    fn test_mystical_categories() {
        assert!(event("Urban Legends").is_mystical());
        assert!(event("Folk Belief").is_mystical());
        assert!(!event("Science").is_mystical());
        assert!(event("Myth").visualize_prompt().contains("Bulls hate red"));
    }

    #[test]
    fn test_topic_names() {
        assert_eq!(Topic::from_name("Urban Legends"), Some(Topic::UrbanLegends));
        assert_eq!(Topic::from_name("Astrology"), None);
        assert!(Topic::ALL.iter().all(|t| Topic::from_name(t.as_str()) == Some(*t)));
    }

    #[test]
    fn test_image_edit_state_transitions() {
        let mut state = ImageEditState::with_prompt("add fireworks");
        state.load_image("data:image/png;base64,AAAA".to_string());
        state.begin();
        assert!(state.is_generating);
        state.finish(Err(DomainError::NoImage));
        assert!(!state.is_generating);
        assert_eq!(state.error.as_deref(), Some("No image data found in response."));

        state.begin();
        assert_eq!(state.error, None);
        state.finish(Ok("data:image/png;base64,BBBB".to_string()));
        assert_eq!(state.generated_image.as_deref(), Some("data:image/png;base64,BBBB"));

        state.load_image("data:image/png;base64,CCCC".to_string());
        assert_eq!(state.generated_image, None);
        assert_eq!(state.prompt, "add fireworks");

        state.reset();
        assert_eq!(state, ImageEditState::default());
    }
}
