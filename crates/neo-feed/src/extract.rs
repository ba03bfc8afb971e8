//! Feed JSON to [`EventSequence`] extraction.
//!
//! Pure transformation over an already-fetched NeoWs `feed` payload:
//!
//! ```text
//! {
//!   "element_count": 2,
//!   "near_earth_objects": {
//!     "2024-03-05": [ { "name": ..., "close_approach_data": [ ... ] }, ... ]
//!   }
//! }
//! ```

use chrono::NaiveDate;
use neo_core::types::{AsteroidRecord, EventSequence};
use serde_json::Value;

use crate::error::MalformedFeedError;

/// Extract the asteroids listed for `date`, in feed order.
///
/// Exactly `element_count` objects are read from the date's bucket. A count
/// smaller than the bucket truncates it; a larger one fails at the first
/// index the bucket does not have.
pub fn extract_events(feed: &Value, date: NaiveDate) -> Result<EventSequence, MalformedFeedError> {
    let day = date.format("%Y-%m-%d").to_string();

    let element_count = lookup(feed, &["element_count"], "")?;
    let element_count = element_count
        .as_u64()
        .ok_or_else(|| wrong_type("element_count", "an unsigned integer"))?
        as usize;

    let bucket_path = format!("near_earth_objects.{}", day);
    let bucket = lookup(feed, &["near_earth_objects", day.as_str()], "")?
        .as_array()
        .ok_or_else(|| wrong_type(&bucket_path, "an array"))?;

    let mut records = Vec::with_capacity(element_count.min(bucket.len()));
    for index in 0..element_count {
        let object = bucket
            .get(index)
            .ok_or_else(|| MalformedFeedError::IndexOutOfBounds {
                index,
                len: bucket.len(),
                date: day.clone(),
            })?;
        records.push(extract_record(object, &format!("{}[{}]", bucket_path, index))?);
    }

    tracing::debug!(date = %day, count = records.len(), "Extracted asteroid records");
    Ok(EventSequence::new(date, records))
}

fn extract_record(object: &Value, at: &str) -> Result<AsteroidRecord, MalformedFeedError> {
    let name = as_str(object, &["name"], at)?;
    let absolute_magnitude = as_f64(object, &["absolute_magnitude_h"], at)?;
    let min_diameter_km = as_f64(
        object,
        &["estimated_diameter", "kilometers", "estimated_diameter_min"],
        at,
    )?;
    let max_diameter_km = as_f64(
        object,
        &["estimated_diameter", "kilometers", "estimated_diameter_max"],
        at,
    )?;
    let is_hazardous = as_flag(object, &["is_potentially_hazardous_asteroid"], at)?;

    let approaches_path = join(at, &["close_approach_data"]);
    let approach = lookup(object, &["close_approach_data"], at)?
        .as_array()
        .ok_or_else(|| wrong_type(&approaches_path, "an array"))?
        .first()
        .ok_or_else(|| MalformedFeedError::MissingField(format!("{}[0]", approaches_path)))?;
    let approach_at = format!("{}[0]", approaches_path);

    Ok(AsteroidRecord {
        name,
        absolute_magnitude,
        min_diameter_km,
        max_diameter_km,
        is_hazardous,
        relative_velocity_kmh: as_f64(
            approach,
            &["relative_velocity", "kilometers_per_hour"],
            &approach_at,
        )?,
        miss_distance_km: as_decimal_text(
            approach,
            &["miss_distance", "kilometers"],
            &approach_at,
        )?,
        orbiting_body: as_str(approach, &["orbiting_body"], &approach_at)?,
    })
}

// -- Field access helpers --

fn join(at: &str, path: &[&str]) -> String {
    let tail = path.join(".");
    if at.is_empty() {
        tail
    } else {
        format!("{}.{}", at, tail)
    }
}

fn wrong_type(field: &str, expected: &'static str) -> MalformedFeedError {
    MalformedFeedError::WrongType {
        field: field.to_string(),
        expected,
    }
}

fn lookup<'a>(value: &'a Value, path: &[&str], at: &str) -> Result<&'a Value, MalformedFeedError> {
    let mut current = value;
    for (depth, key) in path.iter().enumerate() {
        current = current
            .get(*key)
            .ok_or_else(|| MalformedFeedError::MissingField(join(at, &path[..=depth])))?;
    }
    Ok(current)
}

fn as_str(value: &Value, path: &[&str], at: &str) -> Result<String, MalformedFeedError> {
    lookup(value, path, at)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| wrong_type(&join(at, path), "a string"))
}

/// Numbers arrive either as JSON numbers or as numeric strings.
fn as_f64(value: &Value, path: &[&str], at: &str) -> Result<f64, MalformedFeedError> {
    let parsed = match lookup(value, path, at)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|n| n.is_finite())
        .ok_or_else(|| wrong_type(&join(at, path), "a number"))
}

/// Like [`as_f64`], but keeps the number's text so no digits are lost.
fn as_decimal_text(value: &Value, path: &[&str], at: &str) -> Result<String, MalformedFeedError> {
    as_f64(value, path, at)?;
    match lookup(value, path, at)? {
        Value::String(s) => Ok(s.trim().to_string()),
        other => Ok(other.to_string()),
    }
}

fn as_flag(value: &Value, path: &[&str], at: &str) -> Result<bool, MalformedFeedError> {
    match lookup(value, path, at)? {
        Value::Bool(b) => Ok(*b),
        Value::String(s) if s.trim().eq_ignore_ascii_case("true") => Ok(true),
        Value::String(s) if s.trim().eq_ignore_ascii_case("false") => Ok(false),
        _ => Err(wrong_type(&join(at, path), "a boolean")),
    }
}

// =============================================================================
// Tests
// =============================================================================
