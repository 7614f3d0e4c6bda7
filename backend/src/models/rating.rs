use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// The three self-rated dimensions collected by the check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RatingCategory {
    SleepQuality,
    HydrationLevel,
    EnergyLevel,
}

const SLEEP_QUALITY_DESCRIPTIONS: [&str; 5] = [
    "Very poor sleep - tossed and turned all night",
    "Poor sleep - woke up multiple times",
    "Fair sleep - decent rest but could be better",
    "Good sleep - woke up refreshed",
    "Excellent sleep - perfect night of rest!",
];

const HYDRATION_LEVEL_DESCRIPTIONS: [&str; 5] = [
    "Very dehydrated - need more water",
    "Slightly dehydrated - could drink more",
    "Adequately hydrated - maintaining balance",
    "Well hydrated - feeling good",
    "Perfectly hydrated - optimal levels!",
];

const ENERGY_LEVEL_DESCRIPTIONS: [&str; 5] = [
    "Very low energy - feeling drained",
    "Low energy - struggling to stay alert",
    "Moderate energy - getting through the day",
    "High energy - feeling great and productive",
    "Peak energy - unstoppable and focused!",
];

impl RatingCategory {
    pub const ALL: [RatingCategory; 3] = [
        RatingCategory::SleepQuality,
        RatingCategory::HydrationLevel,
        RatingCategory::EnergyLevel,
    ];

    pub fn key(self) -> &'static str {
        match self {
            RatingCategory::SleepQuality => "sleep-quality",
            RatingCategory::HydrationLevel => "hydration-level",
            RatingCategory::EnergyLevel => "energy-level",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RatingCategory::SleepQuality => "sleep quality",
            RatingCategory::HydrationLevel => "hydration level",
            RatingCategory::EnergyLevel => "energy level",
        }
    }

    /// Description shown next to the stars for `value`, if it is a valid rating.
    pub fn describe(self, value: u8) -> Option<&'static str> {
        if !(MIN_RATING..=MAX_RATING).contains(&value) {
            return None;
        }
        let table = match self {
            RatingCategory::SleepQuality => &SLEEP_QUALITY_DESCRIPTIONS,
            RatingCategory::HydrationLevel => &HYDRATION_LEVEL_DESCRIPTIONS,
            RatingCategory::EnergyLevel => &ENERGY_LEVEL_DESCRIPTIONS,
        };
        table.get(usize::from(value - MIN_RATING)).copied()
    }
}

/// Star ratings chosen so far; `None` means the category has not been rated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Ratings {
    #[serde(default)]
    pub sleep_quality: Option<u8>,
    #[serde(default)]
    pub hydration_level: Option<u8>,
    #[serde(default)]
    pub energy_level: Option<u8>,
}

impl Ratings {
    pub fn get(&self, category: RatingCategory) -> Option<u8> {
        match category {
            RatingCategory::SleepQuality => self.sleep_quality,
            RatingCategory::HydrationLevel => self.hydration_level,
            RatingCategory::EnergyLevel => self.energy_level,
        }
    }

    pub fn set(&mut self, category: RatingCategory, value: u8) -> AppResult<()> {
        if !(MIN_RATING..=MAX_RATING).contains(&value) {
            return Err(AppError::Validation(format!(
                "Rating for {} must be between {} and {}",
                category.label(),
                MIN_RATING,
                MAX_RATING
            )));
        }
        let slot = match category {
            RatingCategory::SleepQuality => &mut self.sleep_quality,
            RatingCategory::HydrationLevel => &mut self.hydration_level,
            RatingCategory::EnergyLevel => &mut self.energy_level,
        };
        *slot = Some(value);
        Ok(())
    }

    /// Rated categories with their values, in check-in order.
    pub fn iter_set(&self) -> impl Iterator<Item = (RatingCategory, u8)> + '_ {
        RatingCategory::ALL
            .into_iter()
            .filter_map(move |c| self.get(c).map(|v| (c, v)))
    }

    pub fn is_set(&self, category: RatingCategory) -> bool {
        self.get(category).is_some()
    }

    /// Stored form of a rating: 0 when unset.
    pub fn value_or_zero(&self, category: RatingCategory) -> u8 {
        self.get(category).unwrap_or(0)
    }

    pub fn stars(&self, category: RatingCategory) -> String {
        stars(self.value_or_zero(category))
    }
}

pub fn stars(value: u8) -> String {
    "★".repeat(usize::from(value.min(MAX_RATING)))
}
