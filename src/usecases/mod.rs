//! Application use cases. Orchestrate domain logic via ports.

pub mod image_edit_service;
pub mod timeline_service;

pub use image_edit_service::ImageEditService;
pub use timeline_service::{TimelineForm, TimelineResult, TimelineService};
