//! Timeline prompt builder.
//!
//! Search grounding does not allow a JSON response MIME type, so the output
//! contract is spelled out in the prompt itself.

use crate::domain::{TimelineQuery, Topic};

const GLOBAL_CONTEXT: &str = "Focus on a general global perspective.";

const DEFAULT_CATEGORIES: &str = "Include a diverse mix of categories including beliefs, science, health, food, technology, urban legends, and world records/trivia.";

const OUTPUT_CONTRACT: &str = r#"Format your response as a raw JSON array of objects. Do not use Markdown formatting for the JSON.
Each object must have these keys:
- "year" (number)
- "category" (string)
- "originalBelief" (string)
- "modernReality" (string)
- "status" (string enum: Changed, Debunked, Confirmed, Evolved)
- "context" (string)
- "sourceUrl" (string, optional: The specific URL found via Google Search that verifies this fact)
- "sourceTitle" (string, optional: The title of the source website)"#;

/// Build the grounded timeline instruction for one query.
pub fn timeline_prompt(query: &TimelineQuery) -> String {
    let birth_year = query.birth_year.value();
    let current_year = query.current_year;
    let education = query.has_topic(Topic::Education);

    let mut p = String::with_capacity(2048);
    p.push_str(&format!("I was born in {}.\n", birth_year));
    p.push_str(&format!(
        "Generate a list of 7 to 10 significant and interesting items starting from {} up to {}.\n",
        birth_year, current_year
    ));

    match query.search_term() {
        Some(term) => {
            p.push_str(&format!(
                "CRITICAL FOCUS: The user is specifically interested in \"{term}\". All generated timeline events MUST relate to the history, evolution, perception, or facts about \"{term}\" from {birth_year} to {current_year}.\n"
            ));
        }
        None => {
            match query.country() {
                Some(country) => p.push_str(&format!(
                    "Focus on cultural context, facts, and beliefs specifically relevant to {}.\n",
                    country
                )),
                None => {
                    p.push_str(GLOBAL_CONTEXT);
                    p.push('\n');
                }
            }
            p.push_str(&topic_section(query, education));
            p.push('\n');
        }
    }

    p.push_str("\nCRITICAL INSTRUCTION:\n");
    match query.search_term() {
        Some(term) => p.push_str(&format!("Track the evolution of \"{}\" specifically.\n", term)),
        None => {
            p.push_str("You MUST include a mix of:\n");
            p.push_str("1. Major beliefs or scientific facts.\n");
            p.push_str("2. \"Small facts\" or trivia often found in Almanacs, Book of Records, or Atlases (e.g., \"Tallest building then vs now\", \"Population count\", \"Geographical facts\", \"Fastest machines\").\n");
            p.push_str("3. Popular urban legends, myths, or misconceptions prevalent at the time.\n");
            if education {
                p.push_str("4. Common misconceptions taught in schools that have since been corrected.\n");
            }
        }
    }

    p.push_str("\nFor each item:\n");
    p.push_str("1. Identify what was commonly believed, known, recorded, or the state of the art THEN (around that specific year).\n");
    p.push_str("2. Compare it with what we know NOW (the modern reality, updated record, or debunking).\n");
    p.push_str("3. State if it has been 'Debunked', 'Changed', 'Confirmed', or 'Evolved'.\n");
    p.push_str("\nYou MUST use Google Search to verify these facts and provide accurate comparisons.\n\n");
    p.push_str(OUTPUT_CONTRACT);
    p.push('\n');
    p
}

fn topic_section(query: &TimelineQuery, education: bool) -> String {
    if query.topics.is_empty() {
        return DEFAULT_CATEGORIES.to_string();
    }
    let names: Vec<&str> = query.topics.iter().map(|t| t.as_str()).collect();
    let mut s = format!(
        "Focus on items related to these categories: {}.",
        names.join(", ")
    );
    if education {
        s.push_str(&format!(
            " CRITICAL FOR EDUCATION TOPIC: Include specific examples of \"facts\" that were commonly taught in schools around {} but are now known to be incorrect or outdated (e.g., Pluto as a planet, the tongue map, electron orbits, historical misconceptions).",
            query.birth_year
        ));
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BirthYear;

    fn query(country: &str, topics: Vec<Topic>, search: &str) -> TimelineQuery {
        TimelineQuery {
            birth_year: BirthYear::parse("1985", 2026).unwrap(),
            current_year: 2026,
            country: country.to_string(),
            topics,
            search_term: search.to_string(),
        }
    }

    #[test]
    fn test_default_prompt() {
        let p = timeline_prompt(&query("", vec![], ""));
        assert!(p.contains("I was born in 1985."));
        assert!(p.contains("7 to 10"));
        assert!(p.contains("from 1985 up to 2026"));
        assert!(p.contains(GLOBAL_CONTEXT));
        assert!(p.contains(DEFAULT_CATEGORIES));
        assert!(p.contains("You MUST use Google Search"));
        assert!(p.contains("\"originalBelief\""));
        assert!(p.contains("Do not use Markdown"));
        assert!(!p.contains("CRITICAL FOCUS"));
        assert!(!p.contains("4. Common misconceptions"));
    }

    #[test]
    fn test_country_and_topics() {
        let p = timeline_prompt(&query(" Japan ", vec![Topic::Food, Topic::Health], ""));
        assert!(p.contains("specifically relevant to Japan."));
        assert!(!p.contains(GLOBAL_CONTEXT));
        assert!(p.contains("these categories: Food, Health."));
        assert!(!p.contains(DEFAULT_CATEGORIES));
        assert!(!p.contains("EDUCATION"));
    }

    #[test]
    fn test_education_adds_school_instruction() {
        let p = timeline_prompt(&query("", vec![Topic::Education], ""));
        assert!(p.contains("CRITICAL FOR EDUCATION TOPIC"));
        assert!(p.contains("taught in schools around 1985"));
        assert!(p.contains("4. Common misconceptions taught in schools"));
    }

    #[test]
    fn test_search_term_overrides_filters() {
        let p = timeline_prompt(&query("France", vec![Topic::Education], "dinosaurs"));
        assert!(p.contains("CRITICAL FOCUS: The user is specifically interested in \"dinosaurs\""));
        assert!(p.contains("Track the evolution of \"dinosaurs\" specifically."));
        assert!(!p.contains("France"));
        assert!(!p.contains("EDUCATION"));
        assert!(!p.contains("You MUST include a mix of"));
        assert!(p.contains("\"status\" (string enum: Changed, Debunked, Confirmed, Evolved)"));
    }

    #[test]
    fn test_blank_search_term_ignored() {
        let p = timeline_prompt(&query("", vec![], "   "));
        assert!(!p.contains("CRITICAL FOCUS"));
        assert!(p.contains("You MUST include a mix of"));
    }
}
