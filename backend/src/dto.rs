//! # WellnessTrack — Request/Response DTOs
//!
//! Every shape exchanged with the presentation layer lives here.
//!
//! Conventions:
//! - `*Request`  → deserialized from the caller's JSON
//! - `*Response`, `*View`, `*Summary` → serialized back to the caller
//! - Account validation is expressed via `validator` derive macros

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::daily_entry::{CheckInInputs, DailyEntry};
use crate::models::rating::{RatingCategory, Ratings};
use crate::services::checkin::CheckInStep;
use crate::services::insights::{ScoreBand, TipCategory};
use crate::services::metrics::{Achievement, Trend};

// ============================================================================
// Common
// ============================================================================

/// Standard success message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Auth
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, max = 128, message = "Please fill in all fields"))]
    pub password: String,

    #[validate(length(min = 1, max = 100, message = "Please fill in all fields"))]
    pub name: String,

    #[validate(length(min = 1, max = 100, message = "Please fill in all fields"))]
    pub department: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Please fill in all fields"))]
    pub email: String,

    #[validate(length(min = 1, message = "Please fill in all fields"))]
    pub password: String,
}

// ============================================================================
// Check-in
// ============================================================================

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RateRequest {
    pub category: RatingCategory,
    pub value: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingView {
    pub category: RatingCategory,
    pub value: u8,
    pub stars: String,
    pub description: String,
}

/// One-shot check-in: every field at once instead of step by step.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckInRequest {
    #[serde(default)]
    pub inputs: CheckInInputs,
    #[serde(default)]
    pub ratings: Ratings,
}

/// Values collected so far, shown on the review step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewSnapshot {
    pub steps: f64,
    pub calories: f64,
    pub sleep_hours: f64,
    pub water_liters: f64,
    pub sleep_rating: String,
    pub hydration_rating: String,
    pub energy_rating: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepView {
    pub step: CheckInStep,
    pub number: u8,
    pub total: u8,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<ReviewSnapshot>,
}

/// Full wizard state for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct CheckInView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<StepView>,
    pub inputs: CheckInInputs,
    pub ratings: Ratings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted: Option<DailyEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckInResult {
    pub entry: DailyEntry,
    pub score: u8,
    pub band: ScoreBand,
    pub message: String,
    pub replaced_existing: bool,
}

// ============================================================================
// Dashboard
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AchievementView {
    pub id: Achievement,
    pub title: String,
    pub description: String,
}

impl From<Achievement> for AchievementView {
    fn from(a: Achievement) -> Self {
        Self {
            id: a,
            title: a.title().to_string(),
            description: a.description().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregates {
    pub avg_steps: f64,
    pub avg_water: f64,
    pub avg_sleep: f64,
    pub avg_energy: f64,
    pub streak: u32,
    pub trend: Option<Trend>,
    pub achievements: Vec<AchievementView>,
    pub sleep_consistency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub bar_height: f64,
}

/// Numeric series for one chart, oldest point first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivitySummary {
    pub avg_steps: f64,
    pub weekly_calories: u64,
    pub active_days: usize,
    pub chart: ChartSeries,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HydrationSummary {
    pub avg_water: f64,
    pub hydrated_days: usize,
    pub chart: ChartSeries,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SleepSummary {
    pub avg_sleep: f64,
    pub avg_quality: f64,
    pub consistency: f64,
    pub chart: ChartSeries,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergySummary {
    pub avg_energy: f64,
    pub peak_day: Option<NaiveDate>,
    pub trend: Option<Trend>,
    pub chart: ChartSeries,
}

/// Progress toward daily goals for the latest entry, in percent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub date: NaiveDate,
    pub steps: f64,
    pub water: f64,
    pub sleep: f64,
    pub calories: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub total_check_ins: usize,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub overall_score: f64,
    pub achievements: Vec<AchievementView>,
    pub chart: ChartSeries,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardResponse {
    pub activity: ActivitySummary,
    pub hydration: HydrationSummary,
    pub sleep: SleepSummary,
    pub energy: EnergySummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<GoalProgress>,
    pub progress: ProgressSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightResponse {
    pub summary: String,
    pub wins: Vec<String>,
    pub improvements: Vec<String>,
    pub streak_analysis: String,
    pub tip_category: TipCategory,
    pub tip_of_the_day: String,
}
