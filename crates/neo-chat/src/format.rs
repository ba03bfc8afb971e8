//! Spoken and card renderings of a single asteroid.
//!
//! The sentence layout below is what users hear and see; keep it verbatim.

use neo_core::types::AsteroidRecord;

const DANGEROUS: &str = "This object is dangerous!";
const NOT_DANGEROUS: &str = "This object is not dangerous,";

/// One record rendered for speech and for the companion card.
#[derive(Clone, Debug, PartialEq)]
pub struct FormattedEvent {
    /// Sentence safe to embed inside `<speak>` markup.
    pub spoken: String,
    /// Plain sentence for the card body.
    pub card: String,
}

/// Renders asteroid records as sentences.
#[derive(Clone, Copy, Debug, Default)]
pub struct EventFormatter;

impl EventFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Render `record`, identified by its zero-based `position` in the sequence.
    pub fn format(&self, record: &AsteroidRecord, position: usize) -> FormattedEvent {
        let sentence = self.sentence(record, position);
        FormattedEvent {
            spoken: escape_ssml(&sentence),
            card: sentence,
        }
    }

    fn sentence(&self, record: &AsteroidRecord, position: usize) -> String {
        let identity = format!("Asteroid {}, name is {},", position, record.name);
        let magnitude = format!(
            "The absolute magnitude is {}",
            full_precision(record.absolute_magnitude)
        );
        let size = format!(
            ", the estimated diameter is from {} to {} kilometers,",
            two_decimals(record.min_diameter_km),
            two_decimals(record.max_diameter_km)
        );
        let hazard = if record.is_hazardous {
            DANGEROUS
        } else {
            NOT_DANGEROUS
        };
        let speed = format!(
            "It is traveling at {} kilometers per hour",
            two_decimals(record.relative_velocity_kmh)
        );
        let distance = format!(" at a distance of {} kilometers", record.miss_distance_km);
        let body = format!(" and is orbiting {}", record.orbiting_body);

        [
            identity.as_str(),
            magnitude.as_str(),
            size.as_str(),
            hazard,
            speed.as_str(),
            distance.as_str(),
            body.as_str(),
        ]
        .concat()
    }
}

/// At most two decimals, trailing zeros dropped: `5.6789 -> 5.68`, `2.0 -> 2`.
pub fn two_decimals(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let trimmed = match fixed.split_once('.') {
        Some((whole, frac)) => {
            let frac = frac.trim_end_matches('0');
            if frac.is_empty() {
                whole.to_string()
            } else {
                format!("{}.{}", whole, frac)
            }
        }
        None => fixed.clone(),
    };
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed
    }
}

/// Shortest decimal that round-trips to `value`.
pub fn full_precision(value: f64) -> String {
    value.to_string()
}

fn escape_ssml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

// =============================================================================
// Tests
// =============================================================================
