//! Best-effort extraction of the timeline JSON array from free-form model text.

use crate::domain::{ParsedEvents, TimelineEvent};
use tracing::{debug, warn};

/// Sanitize a JSON reply from the model.
///
/// Models sometimes wrap the array in Markdown fences despite being told not to,
/// or add a sentence around it. Strips fences, then narrows to the outermost `[...]`.
pub fn sanitize_json(raw_text: &str) -> String {
    let unfenced = raw_text
        .replace("```json\n", "")
        .replace("\n```", "")
        .replace("```", "");
    let trimmed = unfenced.trim();

    if let (Some(start), Some(end)) = (trimmed.find('['), trimmed.rfind(']')) {
        if start < end {
            return trimmed[start..=end].to_string();
        }
    }

    trimmed.to_string()
}

/// Parse timeline events. All-or-nothing: one malformed item makes the whole reply unparsable.
pub fn parse_events(raw_text: &str) -> ParsedEvents {
    let clean_json = sanitize_json(raw_text);
    match serde_json::from_str::<Vec<TimelineEvent>>(&clean_json) {
        Ok(events) => {
            debug!(count = events.len(), "parsed timeline events");
            ParsedEvents::Parsed(events)
        }
        Err(e) => {
            warn!(
                error = %e,
                json = %clean_json.chars().take(200).collect::<String>(),
                "failed to parse timeline JSON from model reply"
            );
            ParsedEvents::Unparsable {
                reason: e.to_string(),
            }
        }
    }
}
