//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod sources;

pub use entities::{
    BirthYear, ContentPart, DataUrl, EventStatus, GroundedText, GroundingChunk, ImageEditState,
    InlineImage, MIN_BIRTH_YEAR, ParsedEvents, TimelineEvent, TimelineQuery, TimelineResponse,
    Topic, WebSource,
};
pub use errors::DomainError;
pub use sources::unique_sources;
