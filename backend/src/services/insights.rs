use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::dto::{
    AchievementView, ActivitySummary, Aggregates, ChartPoint, ChartSeries, DashboardResponse,
    EnergySummary, GoalProgress, HydrationSummary, InsightResponse, ProgressSummary, SleepSummary,
};
use crate::models::daily_entry::DailyEntry;
use crate::services::metrics::{
    compute_achievements, compute_longest_streak, compute_sleep_consistency, compute_streak,
    compute_trend, mean, IDEAL_SLEEP_HOURS, STEP_GOAL, WATER_GOAL_LITERS,
};

const ACTIVE_DAY_STEPS: u32 = 5_000;
const CALORIE_GOAL_LOW: f64 = 2_000.0;
const CALORIE_GOAL_HIGH: f64 = 2_500.0;
const CALORIE_GOAL_MID: f64 = 2_250.0;
const CHART_BAR_MIN: f64 = 20.0;
const CHART_BAR_SPAN: f64 = 160.0;

/// Result banding for a single wellness score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    Great,
    Good,
    OnTrack,
    GettingStarted,
}

impl ScoreBand {
    pub fn for_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => ScoreBand::Excellent,
            75..=89 => ScoreBand::Great,
            60..=74 => ScoreBand::Good,
            40..=59 => ScoreBand::OnTrack,
            _ => ScoreBand::GettingStarted,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent! You're crushing your wellness goals!",
            ScoreBand::Great => "Great job! You're doing really well!",
            ScoreBand::Good => "Good progress! Keep building those healthy habits!",
            ScoreBand::OnTrack => {
                "You're on the right track! Small improvements make a big difference!"
            }
            ScoreBand::GettingStarted => {
                "Every step counts! Let's work on building better habits together!"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TipCategory {
    High,
    Medium,
    Low,
}

impl TipCategory {
    pub fn for_score(score: u8) -> Self {
        match score {
            75..=u8::MAX => TipCategory::High,
            50..=74 => TipCategory::Medium,
            _ => TipCategory::Low,
        }
    }

    fn tips(self) -> [&'static str; 3] {
        match self {
            TipCategory::High => [
                "You're doing amazing! Consider sharing your wellness routine with colleagues.",
                "Excellent progress! Try adding a new healthy habit to your routine.",
                "Fantastic! You're setting a great example for healthy living.",
            ],
            TipCategory::Medium => [
                "Good progress! Try taking short walking breaks every 2 hours.",
                "You're on the right track! Consider setting a water reminder on your phone.",
                "Nice work! Try going to bed 15 minutes earlier tonight.",
            ],
            TipCategory::Low => [
                "Small steps count! Try parking further away or taking the stairs.",
                "Every improvement matters! Start with drinking one extra glass of water today.",
                "You've got this! Begin with a 5-minute walk after lunch.",
            ],
        }
    }

    /// Tip for `date`; rotates through the category so a given day is stable.
    pub fn tip_for(self, date: NaiveDate) -> &'static str {
        let tips = self.tips();
        tips[date.ordinal0() as usize % tips.len()]
    }
}

/// Entry field plotted by a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartField {
    Steps,
    Water,
    Sleep,
    Energy,
    Score,
}

impl ChartField {
    pub fn label(self) -> &'static str {
        match self {
            ChartField::Steps => "Steps",
            ChartField::Water => "Water (L)",
            ChartField::Sleep => "Sleep (h)",
            ChartField::Energy => "Energy Level",
            ChartField::Score => "Wellness Score",
        }
    }

    pub fn value(self, entry: &DailyEntry) -> f64 {
        match self {
            ChartField::Steps => f64::from(entry.steps),
            ChartField::Water => entry.water_liters,
            ChartField::Sleep => entry.sleep_hours,
            ChartField::Energy => f64::from(entry.energy_rating),
            ChartField::Score => f64::from(entry.wellness_score),
        }
    }
}

/// Series over the newest `window` entries, reordered oldest first.
pub fn chart_series(entries: &[DailyEntry], window: usize, field: ChartField) -> ChartSeries {
    let mut recent: Vec<&DailyEntry> = entries.iter().take(window).collect();
    recent.reverse();

    let values: Vec<f64> = recent
        .iter()
        .map(|e| field.value(e))
        .map(|v| if v.is_finite() { v } else { 0.0 })
        .collect();

    let (min, max) = if values.is_empty() {
        (0.0, 0.0)
    } else {
        values.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        })
    };
    let range = if max > min { max - min } else { 1.0 };

    let points = recent
        .iter()
        .zip(values)
        .map(|(entry, value)| ChartPoint {
            date: entry.date,
            value,
            bar_height: ((value - min) / range * CHART_BAR_SPAN + CHART_BAR_MIN).max(CHART_BAR_MIN),
        })
        .collect();

    ChartSeries {
        label: field.label().to_string(),
        min,
        max,
        points,
    }
}

fn band_progress(value: f64, low: f64, high: f64, penalty: impl Fn(f64) -> f64) -> f64 {
    if (low..=high).contains(&value) {
        100.0
    } else {
        (100.0 - penalty(value)).max(0.0)
    }
}

/// Goal percentages for one entry.
pub fn goal_progress(entry: &DailyEntry) -> GoalProgress {
    let calories = f64::from(entry.calories);
    GoalProgress {
        date: entry.date,
        steps: (f64::from(entry.steps) / STEP_GOAL * 100.0).min(100.0),
        water: (entry.water_liters / WATER_GOAL_LITERS * 100.0).clamp(0.0, 100.0),
        sleep: band_progress(entry.sleep_hours, 7.0, 9.0, |h| {
            (IDEAL_SLEEP_HOURS - h).abs() * 12.5
        }),
        calories: band_progress(calories, CALORIE_GOAL_LOW, CALORIE_GOAL_HIGH, |c| {
            (CALORIE_GOAL_MID - c).abs() / 25.0
        }),
    }
}

fn achievement_views(entries: &[DailyEntry], today: NaiveDate) -> Vec<AchievementView> {
    compute_achievements(entries, today)
        .into_iter()
        .map(AchievementView::from)
        .collect()
}

/// First entry, newest first, holding the highest energy rating.
fn peak_energy_day(entries: &[DailyEntry]) -> Option<NaiveDate> {
    entries
        .iter()
        .fold(None::<&DailyEntry>, |best, e| match best {
            Some(b) if e.energy_rating <= b.energy_rating => Some(b),
            _ => Some(e),
        })
        .map(|e| e.date)
}

pub fn aggregates(entries: &[DailyEntry], today: NaiveDate) -> Aggregates {
    Aggregates {
        avg_steps: mean(entries.iter().map(|e| f64::from(e.steps))),
        avg_water: mean(entries.iter().map(|e| e.water_liters)),
        avg_sleep: mean(entries.iter().map(|e| e.sleep_hours)),
        avg_energy: mean(entries.iter().map(|e| f64::from(e.energy_rating))),
        streak: compute_streak(entries, today),
        trend: compute_trend(entries),
        achievements: achievement_views(entries, today),
        sleep_consistency: compute_sleep_consistency(entries),
    }
}

pub fn dashboard(
    entries: &[DailyEntry],
    today: NaiveDate,
    chart_window: usize,
    analytics_window: usize,
) -> DashboardResponse {
    let activity = ActivitySummary {
        avg_steps: mean(entries.iter().map(|e| f64::from(e.steps))),
        weekly_calories: entries.iter().take(7).map(|e| u64::from(e.calories)).sum(),
        active_days: entries.iter().filter(|e| e.steps > ACTIVE_DAY_STEPS).count(),
        chart: chart_series(entries, chart_window, ChartField::Steps),
    };

    let hydration = HydrationSummary {
        avg_water: mean(entries.iter().map(|e| e.water_liters)),
        hydrated_days: entries
            .iter()
            .filter(|e| e.water_liters >= WATER_GOAL_LITERS)
            .count(),
        chart: chart_series(entries, chart_window, ChartField::Water),
    };

    let sleep = SleepSummary {
        avg_sleep: mean(entries.iter().map(|e| e.sleep_hours)),
        avg_quality: mean(entries.iter().map(|e| f64::from(e.sleep_rating))),
        consistency: compute_sleep_consistency(entries),
        chart: chart_series(entries, chart_window, ChartField::Sleep),
    };

    let energy = EnergySummary {
        avg_energy: mean(entries.iter().map(|e| f64::from(e.energy_rating))),
        peak_day: peak_energy_day(entries),
        trend: compute_trend(entries),
        chart: chart_series(entries, chart_window, ChartField::Energy),
    };

    let progress = ProgressSummary {
        total_check_ins: entries.len(),
        current_streak: compute_streak(entries, today),
        longest_streak: compute_longest_streak(entries),
        overall_score: mean(entries.iter().map(|e| f64::from(e.wellness_score))),
        achievements: achievement_views(entries, today),
        chart: chart_series(entries, analytics_window, ChartField::Score),
    };

    DashboardResponse {
        activity,
        hydration,
        sleep,
        energy,
        goals: entries.first().map(goal_progress),
        progress,
    }
}

/// Deterministic coaching summary over the most recent week of entries.
pub fn generate_insight(entries: &[DailyEntry], today: NaiveDate) -> InsightResponse {
    let Some(latest) = entries.first() else {
        let tip_category = TipCategory::Low;
        return InsightResponse {
            summary: "You haven't checked in yet. Complete your first daily check-in to start tracking!".into(),
            wins: vec![],
            improvements: vec!["Complete your first check-in to get started".into()],
            streak_analysis: "No data available yet.".into(),
            tip_category,
            tip_of_the_day: tip_category.tip_for(today).into(),
        };
    };

    let recent: Vec<DailyEntry> = entries.iter().take(7).cloned().collect();
    let avg_score = mean(recent.iter().map(|e| f64::from(e.wellness_score)));
    let avg_steps = mean(recent.iter().map(|e| f64::from(e.steps)));
    let avg_water = mean(recent.iter().map(|e| e.water_liters));
    let avg_sleep = mean(recent.iter().map(|e| e.sleep_hours));
    let avg_energy = mean(recent.iter().map(|e| f64::from(e.energy_rating)));
    let streak = compute_streak(entries, today);
    let longest = compute_longest_streak(entries);

    let summary = format!(
        "Over your last {} check-ins your average wellness score is {:.0}%. {}",
        recent.len(),
        avg_score,
        ScoreBand::for_score(avg_score.round().clamp(0.0, 100.0) as u8).message(),
    );

    let mut wins = Vec::new();
    if avg_steps >= STEP_GOAL {
        wins.push(format!("Averaging {:.0} steps a day, right on your step goal.", avg_steps));
    }
    if avg_water >= WATER_GOAL_LITERS {
        wins.push(format!("Averaging {:.1}L of water a day, great hydration.", avg_water));
    }
    if (7.0..=9.0).contains(&avg_sleep) {
        wins.push(format!("{:.1}h of sleep on average, right in the healthy range.", avg_sleep));
    }
    if streak >= 3 {
        wins.push(format!("{}-day check-in streak, keep it going!", streak));
    }

    let mut improvements = Vec::new();
    if avg_steps < 7_500.0 {
        improvements.push("Try taking short walking breaks every 2 hours.".to_string());
    }
    if avg_water < 2.0 {
        improvements.push("Consider setting a water reminder on your phone.".to_string());
    }
    if avg_sleep > 0.0 && !(7.0..=9.0).contains(&avg_sleep) {
        improvements.push("Aim for 7-9 hours of sleep; try going to bed 15 minutes earlier.".to_string());
    }
    if avg_energy > 0.0 && avg_energy < 3.0 {
        improvements.push("Energy is running low. Begin with a 5-minute walk after lunch.".to_string());
    }
    if improvements.is_empty() {
        improvements.push("Try adding a new healthy habit to your routine.".to_string());
    }

    let streak_analysis = if streak > 7 {
        format!(
            "Your current streak is {} days (longest {}). Streaks above 7 days indicate a strong routine.",
            streak, longest
        )
    } else if streak > 0 {
        format!(
            "Your current streak is {} days (longest {}). Check in tomorrow to keep the chain going.",
            streak, longest
        )
    } else {
        format!(
            "No check-in today yet. Your longest streak so far is {} days.",
            longest
        )
    };

    let tip_category = TipCategory::for_score(latest.wellness_score);

    InsightResponse {
        summary,
        wins,
        improvements,
        streak_analysis,
        tip_category,
        tip_of_the_day: tip_category.tip_for(today).into(),
    }
}
