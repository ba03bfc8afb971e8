use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// AsteroidRecord
// =============================================================================

/// One near-Earth object approach, as narrated to the user.
///
/// Velocity, miss distance and orbiting body come from the object's first
/// close-approach entry only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsteroidRecord {
    /// Designation, e.g. `(2019 AB)`.
    pub name: String,
    /// Absolute magnitude H.
    pub absolute_magnitude: f64,
    /// Lower bound of the estimated diameter in kilometers.
    pub min_diameter_km: f64,
    /// Upper bound of the estimated diameter in kilometers.
    pub max_diameter_km: f64,
    /// Whether the object is flagged as potentially hazardous.
    pub is_hazardous: bool,
    /// Relative velocity at close approach in km/h.
    pub relative_velocity_kmh: f64,
    /// Miss distance at close approach in kilometers, as the decimal text the
    /// feed sent. Its digits can exceed what an `f64` holds.
    pub miss_distance_km: String,
    /// Body the object approaches, e.g. `Earth`.
    pub orbiting_body: String,
}

// =============================================================================
// EventSequence
// =============================================================================

/// The asteroids recorded for a single calendar date, in feed order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventSequence {
    date: NaiveDate,
    records: Vec<AsteroidRecord>,
}

impl EventSequence {
    pub fn new(date: NaiveDate, records: Vec<AsteroidRecord>) -> Self {
        Self { date, records }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&AsteroidRecord> {
        self.records.get(index)
    }

    /// Records in `[start, end)`, clipped to the sequence length.
    pub fn slice(&self, start: usize, end: usize) -> &[AsteroidRecord] {
        let end = end.min(self.records.len());
        let start = start.min(end);
        &self.records[start..end]
    }

    pub fn records(&self) -> &[AsteroidRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> AsteroidRecord {
        AsteroidRecord {
            name: name.to_string(),
            absolute_magnitude: 21.6,
            min_diameter_km: 0.1,
            max_diameter_km: 0.2,
            is_hazardous: false,
            relative_velocity_kmh: 45000.0,
            miss_distance_km: "1000000.0".to_string(),
            orbiting_body: "Earth".to_string(),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    #[test]
    fn test_sequence_preserves_order() {
        let seq = EventSequence::new(date(), vec![record("a"), record("b"), record("c")]);
        let names: Vec<&str> = seq.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.date(), date());
    }

    #[test]
    fn test_slice_clips_to_length() {
        let seq = EventSequence::new(date(), vec![record("a"), record("b")]);
        assert_eq!(seq.slice(1, 5).len(), 1);
        assert_eq!(seq.slice(1, 5)[0].name, "b");
        assert!(seq.slice(2, 3).is_empty());
        assert!(seq.slice(7, 9).is_empty());
    }

    #[test]
    fn test_empty_sequence() {
        let seq = EventSequence::new(date(), vec![]);
        assert!(seq.is_empty());
        assert!(seq.get(0).is_none());
        assert!(seq.slice(0, 1).is_empty());
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let json = serde_json::to_value(record("x")).unwrap();
        assert_eq!(json["absoluteMagnitude"], 21.6);
        assert_eq!(json["isHazardous"], false);
        assert_eq!(json["orbitingBody"], "Earth");
    }
}
