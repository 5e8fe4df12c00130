//! Terminal rendering of timeline cards and the source list.

use crate::domain::{EventStatus, GroundingChunk, TimelineEvent, TimelineResponse, unique_sources};
use crossterm::style::{Color, Stylize};

fn status_color(status: EventStatus) -> Color {
    match status {
        EventStatus::Confirmed => Color::Green,
        EventStatus::Debunked => Color::Red,
        EventStatus::Changed => Color::Blue,
        EventStatus::Evolved => Color::Magenta,
    }
}

fn status_icon(status: EventStatus) -> &'static str {
    match status {
        EventStatus::Confirmed => "✔",
        EventStatus::Debunked => "✘",
        EventStatus::Changed => "↻",
        EventStatus::Evolved => "→",
    }
}

/// Plain-text body of one card (everything below the header line).
pub fn card_body(event: &TimelineEvent) -> Vec<String> {
    let mut lines = vec![
        format!("  THEN: {}", event.original_belief),
        format!("  NOW:  {}", event.modern_reality),
    ];
    if !event.context.is_empty() {
        lines.push(format!("  {}", event.context));
    }
    if let Some(url) = event.source_url.as_deref().filter(|u| !u.is_empty()) {
        let title = event
            .source_title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or("Source");
        lines.push(format!("  {}: {}", title, url));
    }
    lines
}

/// "Sources (N)" block; empty when there is nothing to cite.
pub fn source_lines(chunks: &[GroundingChunk]) -> Vec<String> {
    let sources = unique_sources(chunks);
    if sources.is_empty() {
        return Vec::new();
    }
    let mut lines = Vec::with_capacity(sources.len() + 1);
    lines.push(format!("Sources ({})", sources.len()));
    for (i, s) in sources.iter().enumerate() {
        let title = if s.title.is_empty() { &s.uri } else { &s.title };
        lines.push(format!("  {:>2}. {} <{}>", i + 1, title, s.uri));
    }
    lines
}

pub fn print_card(event: &TimelineEvent, index: usize) {
    let color = status_color(event.status);
    let badge = format!(
        "{} {}",
        status_icon(event.status),
        event.status.as_str().to_uppercase()
    );
    println!(
        "{:>2}. {}  {}  {}",
        index + 1,
        event.year.to_string().bold(),
        badge.with(color).bold(),
        event.category.as_str().dim()
    );
    for line in card_body(event) {
        println!("{}", line);
    }
    println!();
}

pub fn print_timeline(response: &TimelineResponse) {
    if response.events.is_empty() {
        println!("{}", "No events found. Try different filters.".yellow());
        return;
    }
    println!();
    for (i, event) in response.events.iter().enumerate() {
        print_card(event, i);
    }
    if let Some(chunks) = &response.grounding_chunks {
        for line in source_lines(chunks) {
            println!("{}", line.dim());
        }
    }
}

pub fn print_error(message: &str) {
    println!("{}", message.red());
}
