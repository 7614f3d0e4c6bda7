//! Pure scoring and aggregation over a user's daily entries.
//!
//! Every function here is total: missing, zero or non-finite values degrade
//! to a zero or empty result instead of an error. Slices of entries are
//! expected newest first, as returned by `UserRecord::history`.

use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::daily_entry::DailyEntry;

pub const STEP_GOAL: f64 = 10_000.0;
pub const WATER_GOAL_LITERS: f64 = 2.5;
pub const IDEAL_SLEEP_HOURS: f64 = 8.0;

const STEPS_MAX_POINTS: f64 = 30.0;
const SLEEP_MAX_POINTS: f64 = 25.0;
const WATER_MAX_POINTS: f64 = 20.0;
const RATINGS_MAX_POINTS: f64 = 25.0;
const SLEEP_PENALTY_PER_HOUR: f64 = 3.0;

/// Four factors scaled to 25 points each; fixed, not derived from how many
/// factors happen to exist.
const SCORE_NORMALIZATION: f64 = 4.0;

const MAX_RATING: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    WeekWarrior,
    MonthlyMaster,
    StreakStar,
    StepChampion,
    HydrationHero,
    WellnessWarrior,
}

impl Achievement {
    pub fn title(self) -> &'static str {
        match self {
            Achievement::WeekWarrior => "Week Warrior",
            Achievement::MonthlyMaster => "Monthly Master",
            Achievement::StreakStar => "Streak Star",
            Achievement::StepChampion => "Step Champion",
            Achievement::HydrationHero => "Hydration Hero",
            Achievement::WellnessWarrior => "Wellness Warrior",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Achievement::WeekWarrior => "7 check-ins completed!",
            Achievement::MonthlyMaster => "30 check-ins completed!",
            Achievement::StreakStar => "5 days in a row!",
            Achievement::StepChampion => "10,000 steps in a day!",
            Achievement::HydrationHero => "3L water in a day!",
            Achievement::WellnessWarrior => "90%+ wellness score!",
        }
    }
}

fn is_present(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn sleep_points(hours: f64) -> f64 {
    if (7.0..=9.0).contains(&hours) {
        SLEEP_MAX_POINTS
    } else {
        (SLEEP_MAX_POINTS - (IDEAL_SLEEP_HOURS - hours).abs() * SLEEP_PENALTY_PER_HOUR).max(0.0)
    }
}

/// Wellness score on a 0..=100 scale. Each present factor contributes its
/// points; the sum is averaged over contributing factors and rescaled.
pub fn compute_wellness_score(entry: &DailyEntry) -> u8 {
    let mut score = 0.0;
    let mut factors = 0u32;

    let steps = f64::from(entry.steps);
    if is_present(steps) {
        score += (steps / STEP_GOAL * STEPS_MAX_POINTS).min(STEPS_MAX_POINTS);
        factors += 1;
    }

    if is_present(entry.sleep_hours) {
        score += sleep_points(entry.sleep_hours);
        factors += 1;
    }

    if is_present(entry.water_liters) {
        score += (entry.water_liters / WATER_GOAL_LITERS * WATER_MAX_POINTS).min(WATER_MAX_POINTS);
        factors += 1;
    }

    let ratings = [entry.sleep_rating, entry.hydration_rating, entry.energy_rating];
    if ratings.iter().all(|r| *r > 0) {
        let avg = ratings.iter().map(|r| f64::from(*r)).sum::<f64>() / 3.0;
        score += (avg / MAX_RATING * RATINGS_MAX_POINTS).min(RATINGS_MAX_POINTS);
        factors += 1;
    }

    if factors == 0 {
        return 0;
    }

    // A single strong factor can exceed 100 once rescaled.
    (score / f64::from(factors) * SCORE_NORMALIZATION)
        .round()
        .clamp(0.0, 100.0) as u8
}

/// Consecutive days with an entry, walking back from `reference`. A missing
/// reference day yields 0.
pub fn compute_streak(entries: &[DailyEntry], reference: NaiveDate) -> u32 {
    let dates: HashSet<NaiveDate> = entries.iter().map(|e| e.date).collect();

    let mut streak = 0u32;
    let mut check_date = Some(reference);
    while let Some(day) = check_date {
        if !dates.contains(&day) {
            break;
        }
        streak += 1;
        check_date = day.pred_opt();
    }
    streak
}

/// Longest run of consecutive days anywhere in the history.
pub fn compute_longest_streak(entries: &[DailyEntry]) -> u32 {
    let dates: BTreeSet<NaiveDate> = entries.iter().map(|e| e.date).collect();

    let mut longest = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;
    for date in dates {
        run = match prev.and_then(|p| p.succ_opt()) {
            Some(next) if next == date => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(date);
    }
    longest
}

/// Mean of the strictly positive, finite values. Zeros are excluded from
/// both numerator and denominator; an empty set averages to 0.
pub fn mean<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .filter(|v| is_present(*v))
        .fold((0.0, 0u32), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        0.0
    } else {
        sum / f64::from(count)
    }
}

/// Energy direction between the two newest entries.
pub fn compute_trend(entries: &[DailyEntry]) -> Option<Trend> {
    match entries {
        [newest, previous, ..] if newest.energy_rating > previous.energy_rating => Some(Trend::Up),
        [_, _, ..] => Some(Trend::Down),
        _ => None,
    }
}

/// 100 minus ten times the mean absolute day-over-day change in sleep hours.
pub fn compute_sleep_consistency(entries: &[DailyEntry]) -> f64 {
    if entries.len() < 2 {
        return 0.0;
    }

    let hours = |e: &DailyEntry| {
        if e.sleep_hours.is_finite() {
            e.sleep_hours
        } else {
            0.0
        }
    };
    let total_change: f64 = entries
        .windows(2)
        .map(|pair| match pair {
            [a, b] => (hours(a) - hours(b)).abs(),
            _ => 0.0,
        })
        .sum();
    let mean_change = total_change / (entries.len() - 1) as f64;

    (100.0 - mean_change * 10.0).max(0.0)
}

/// Milestones unlocked by the history as of `reference`.
pub fn compute_achievements(entries: &[DailyEntry], reference: NaiveDate) -> BTreeSet<Achievement> {
    let mut unlocked = BTreeSet::new();

    if entries.len() >= 7 {
        unlocked.insert(Achievement::WeekWarrior);
    }
    if entries.len() >= 30 {
        unlocked.insert(Achievement::MonthlyMaster);
    }
    if compute_streak(entries, reference) >= 5 {
        unlocked.insert(Achievement::StreakStar);
    }
    if entries.iter().any(|e| f64::from(e.steps) >= STEP_GOAL) {
        unlocked.insert(Achievement::StepChampion);
    }
    if entries.iter().any(|e| e.water_liters >= 3.0) {
        unlocked.insert(Achievement::HydrationHero);
    }
    if entries.iter().any(|e| e.wellness_score >= 90) {
        unlocked.insert(Achievement::WellnessWarrior);
    }

    unlocked
}
