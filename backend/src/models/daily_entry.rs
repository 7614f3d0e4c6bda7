use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::models::rating::{RatingCategory, Ratings};
use crate::services::metrics::compute_wellness_score;

/// One user's recorded metrics for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    pub date: NaiveDate,
    pub steps: u32,
    pub calories: u32,
    pub sleep_hours: f64,
    pub water_liters: f64,
    pub sleep_rating: u8,
    pub hydration_rating: u8,
    pub energy_rating: u8,
    pub wellness_score: u8,
}

impl DailyEntry {
    /// Builds the entry for `date` from collected check-in values. The
    /// wellness score is always derived here, never taken from input.
    pub fn from_check_in(date: NaiveDate, inputs: &CheckInInputs, ratings: &Ratings) -> Self {
        let mut entry = Self {
            date,
            steps: to_count(inputs.steps),
            calories: to_count(inputs.calories),
            sleep_hours: to_amount(inputs.sleep_hours),
            water_liters: to_amount(inputs.water_liters),
            sleep_rating: ratings.value_or_zero(RatingCategory::SleepQuality),
            hydration_rating: ratings.value_or_zero(RatingCategory::HydrationLevel),
            energy_rating: ratings.value_or_zero(RatingCategory::EnergyLevel),
            wellness_score: 0,
        };
        entry.wellness_score = compute_wellness_score(&entry);
        entry
    }

    pub fn rating(&self, category: RatingCategory) -> u8 {
        match category {
            RatingCategory::SleepQuality => self.sleep_rating,
            RatingCategory::HydrationLevel => self.hydration_rating,
            RatingCategory::EnergyLevel => self.energy_rating,
        }
    }
}

/// Raw numeric fields of the check-in form. Accepts numbers or numeric
/// strings; anything unparsable reads as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckInInputs {
    #[serde(default, deserialize_with = "lenient_number")]
    pub steps: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub calories: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub sleep_hours: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub water_liters: f64,
}

impl CheckInInputs {
    pub fn from_raw(steps: &str, calories: &str, sleep_hours: &str, water_liters: &str) -> Self {
        Self {
            steps: to_num(steps),
            calories: to_num(calories),
            sleep_hours: to_num(sleep_hours),
            water_liters: to_num(water_liters),
        }
    }
}

/// Parses a form value; empty, malformed or non-finite input is 0.
pub fn to_num(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Whole-number form of a count field, as stored on an entry.
pub fn to_count(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

fn to_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Value::String(s) => to_num(&s),
        _ => 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_to_num_is_lenient() {
        assert_eq!(to_num("8500"), 8500.0);
        assert_eq!(to_num(" 7.5 "), 7.5);
        assert_eq!(to_num(""), 0.0);
        assert_eq!(to_num("abc"), 0.0);
        assert_eq!(to_num("inf"), 0.0);
        assert_eq!(to_num("NaN"), 0.0);
    }

    #[test]
    fn test_inputs_accept_numbers_and_strings() {
        let json = r#"{"steps":"8500","calories":2200,"sleep_hours":"7.5","water_liters":null}"#;
        let inputs: CheckInInputs = serde_json::from_str(json).unwrap();
        assert_eq!(inputs.steps, 8500.0);
        assert_eq!(inputs.calories, 2200.0);
        assert_eq!(inputs.sleep_hours, 7.5);
        assert_eq!(inputs.water_liters, 0.0);

        let empty: CheckInInputs = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, CheckInInputs::default());
    }

    #[test]
    fn test_from_check_in_derives_score() {
        let inputs = CheckInInputs::from_raw("10000", "2200", "8", "2.5");
        let mut ratings = Ratings::default();
        for category in RatingCategory::ALL {
            ratings.set(category, 5).unwrap();
        }
        let entry = DailyEntry::from_check_in(date(2026, 3, 2), &inputs, &ratings);
        assert_eq!(entry.steps, 10000);
        assert_eq!(entry.calories, 2200);
        assert_eq!(entry.energy_rating, 5);
        assert_eq!(entry.wellness_score, 100);
    }

    #[test]
    fn test_negative_inputs_stored_as_zero() {
        let inputs = CheckInInputs {
            steps: -40.0,
            calories: 1800.4,
            sleep_hours: -1.0,
            water_liters: f64::NAN,
        };
        let entry = DailyEntry::from_check_in(date(2026, 3, 2), &inputs, &Ratings::default());
        assert_eq!(entry.steps, 0);
        assert_eq!(entry.calories, 1800);
        assert_eq!(entry.sleep_hours, 0.0);
        assert_eq!(entry.water_liters, 0.0);
        assert_eq!(entry.sleep_rating, 0);
        assert_eq!(entry.wellness_score, 0);
    }

    #[test]
    fn test_entry_date_serializes_as_iso_day() {
        let entry = DailyEntry::from_check_in(
            date(2026, 1, 9),
            &CheckInInputs::default(),
            &Ratings::default(),
        );
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["date"], "2026-01-09");
        assert_eq!(json["wellness_score"], 0);
    }
}
