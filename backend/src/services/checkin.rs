//! Five-step check-in wizard.
//!
//! `advance` is gated by the current step's guard, `retreat` never is. Once
//! submitted, the workflow holds the committed entry until `reset`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dto::{CheckInResult, ReviewSnapshot, StepView};
use crate::error::{AppError, AppResult};
use crate::models::daily_entry::{to_count, CheckInInputs, DailyEntry};
use crate::models::rating::{RatingCategory, Ratings};
use crate::models::user::UserRecord;
use crate::services::insights::ScoreBand;

pub const TOTAL_STEPS: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckInStep {
    Activity,
    Sleep,
    Hydration,
    Energy,
    Review,
}

impl CheckInStep {
    pub const ALL: [CheckInStep; 5] = [
        CheckInStep::Activity,
        CheckInStep::Sleep,
        CheckInStep::Hydration,
        CheckInStep::Energy,
        CheckInStep::Review,
    ];

    pub fn number(self) -> u8 {
        match self {
            CheckInStep::Activity => 1,
            CheckInStep::Sleep => 2,
            CheckInStep::Hydration => 3,
            CheckInStep::Energy => 4,
            CheckInStep::Review => 5,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.number() == number)
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }

    pub fn title(self) -> &'static str {
        match self {
            CheckInStep::Activity => "Activity",
            CheckInStep::Sleep => "Sleep",
            CheckInStep::Hydration => "Hydration",
            CheckInStep::Energy => "Energy",
            CheckInStep::Review => "Review & Submit",
        }
    }
}

/// Guard for leaving `step`. When a step has two requirements and both fail,
/// the rating message is reported.
pub fn validate_step(step: CheckInStep, inputs: &CheckInInputs, ratings: &Ratings) -> AppResult<()> {
    let message = match step {
        CheckInStep::Activity => {
            if to_count(inputs.steps) > 0 || to_count(inputs.calories) > 0 {
                None
            } else {
                Some("Please enter at least your steps or calories burned")
            }
        }
        CheckInStep::Sleep => {
            if !ratings.is_set(RatingCategory::SleepQuality) {
                Some("Please rate your sleep quality")
            } else if !(inputs.sleep_hours > 0.0 && inputs.sleep_hours <= 24.0) {
                Some("Please enter valid sleep hours (0.5-24)")
            } else {
                None
            }
        }
        CheckInStep::Hydration => {
            if !ratings.is_set(RatingCategory::HydrationLevel) {
                Some("Please rate your hydration level")
            } else if !(inputs.water_liters > 0.0) {
                Some("Please enter your water intake")
            } else {
                None
            }
        }
        CheckInStep::Energy => {
            if ratings.is_set(RatingCategory::EnergyLevel) {
                None
            } else {
                Some("Please rate your energy level")
            }
        }
        CheckInStep::Review => None,
    };

    match message {
        Some(msg) => Err(AppError::Validation(msg.into())),
        None => Ok(()),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    InProgress(CheckInStep),
    Submitted(DailyEntry),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckInWorkflow {
    phase: Phase,
    inputs: CheckInInputs,
    ratings: Ratings,
}

impl Default for CheckInWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckInWorkflow {
    pub fn new() -> Self {
        Self {
            phase: Phase::InProgress(CheckInStep::Activity),
            inputs: CheckInInputs::default(),
            ratings: Ratings::default(),
        }
    }

    /// Current step, or `None` once the check-in has been submitted.
    pub fn current_step(&self) -> Option<CheckInStep> {
        match &self.phase {
            Phase::InProgress(step) => Some(*step),
            Phase::Submitted(_) => None,
        }
    }

    pub fn submitted_entry(&self) -> Option<&DailyEntry> {
        match &self.phase {
            Phase::Submitted(entry) => Some(entry),
            Phase::InProgress(_) => None,
        }
    }

    pub fn inputs(&self) -> &CheckInInputs {
        &self.inputs
    }

    pub fn ratings(&self) -> &Ratings {
        &self.ratings
    }

    fn step_or_submitted(&self) -> AppResult<CheckInStep> {
        self.current_step().ok_or_else(|| {
            AppError::Validation("Check-in already submitted; start a new one first".into())
        })
    }

    pub fn update_inputs(&mut self, inputs: CheckInInputs) -> AppResult<()> {
        self.step_or_submitted()?;
        self.inputs = inputs;
        Ok(())
    }

    pub fn rate(&mut self, category: RatingCategory, value: u8) -> AppResult<()> {
        self.step_or_submitted()?;
        self.ratings.set(category, value)
    }

    pub fn view(&self) -> Option<StepView> {
        self.current_step().map(|step| self.view_of(step))
    }

    fn view_of(&self, step: CheckInStep) -> StepView {
        StepView {
            step,
            number: step.number(),
            total: TOTAL_STEPS,
            title: step.title().to_string(),
            review: (step == CheckInStep::Review).then(|| self.review_snapshot()),
        }
    }

    /// Moves forward if the current step's guard passes. At the review step
    /// there is nothing further; the view is returned unchanged.
    pub fn advance(&mut self) -> AppResult<StepView> {
        let step = self.step_or_submitted()?;
        if let Err(e) = validate_step(step, &self.inputs, &self.ratings) {
            tracing::debug!(step = step.number(), error = %e, "Check-in step rejected");
            return Err(e);
        }

        let next = step.next().unwrap_or(step);
        self.phase = Phase::InProgress(next);
        Ok(self.view_of(next))
    }

    pub fn retreat(&mut self) -> AppResult<StepView> {
        let step = self.step_or_submitted()?;
        let previous = step.previous().unwrap_or(step);
        self.phase = Phase::InProgress(previous);
        Ok(self.view_of(previous))
    }

    pub fn review_snapshot(&self) -> ReviewSnapshot {
        ReviewSnapshot {
            steps: self.inputs.steps,
            calories: self.inputs.calories,
            sleep_hours: self.inputs.sleep_hours,
            water_liters: self.inputs.water_liters,
            sleep_rating: self.ratings.stars(RatingCategory::SleepQuality),
            hydration_rating: self.ratings.stars(RatingCategory::HydrationLevel),
            energy_rating: self.ratings.stars(RatingCategory::EnergyLevel),
        }
    }

    /// Scores the collected values and commits them to `user` under `today`,
    /// replacing any entry already recorded for that day. Nothing is written
    /// unless the energy guard passes.
    pub fn submit(&mut self, user: &mut UserRecord, today: NaiveDate) -> AppResult<CheckInResult> {
        let step = self.step_or_submitted()?;
        if step != CheckInStep::Review {
            return Err(AppError::Validation(
                "Complete every step before submitting".into(),
            ));
        }
        validate_step(CheckInStep::Energy, &self.inputs, &self.ratings)?;

        let entry = DailyEntry::from_check_in(today, &self.inputs, &self.ratings);
        let replaced = user.commit(entry.clone()).is_some();
        let band = ScoreBand::for_score(entry.wellness_score);

        tracing::info!(
            user_id = %user.id,
            date = %today,
            score = entry.wellness_score,
            replaced,
            "Check-in committed"
        );

        self.phase = Phase::Submitted(entry.clone());
        Ok(CheckInResult {
            score: entry.wellness_score,
            entry,
            band,
            message: band.message().to_string(),
            replaced_existing: replaced,
        })
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 10).unwrap()
    }

    fn user() -> UserRecord {
        UserRecord::new("a@b.com", "pw", "A", "Ops")
    }

    fn rated_all(workflow: &mut CheckInWorkflow) {
        workflow.rate(RatingCategory::SleepQuality, 4).unwrap();
        workflow.rate(RatingCategory::HydrationLevel, 3).unwrap();
        workflow.rate(RatingCategory::EnergyLevel, 5).unwrap();
    }

    fn filled() -> CheckInWorkflow {
        let mut workflow = CheckInWorkflow::new();
        workflow
            .update_inputs(CheckInInputs::from_raw("8500", "2200", "7.5", "2.3"))
            .unwrap();
        rated_all(&mut workflow);
        workflow
    }

    fn walk_to_review(workflow: &mut CheckInWorkflow) {
        for _ in 0..4 {
            workflow.advance().unwrap();
        }
    }

    // ── Step numbering ───────────────────────────────────────────────────

    #[test]
    fn test_step_numbering() {
        assert_eq!(CheckInStep::Activity.previous(), None);
        assert_eq!(CheckInStep::Review.next(), None);
        assert_eq!(CheckInStep::Sleep.next(), Some(CheckInStep::Hydration));
        assert_eq!(CheckInStep::from_number(4), Some(CheckInStep::Energy));
        assert_eq!(CheckInStep::from_number(0), None);
        assert_eq!(CheckInStep::from_number(6), None);
    }

    // ── Guards ───────────────────────────────────────────────────────────

    #[test]
    fn test_activity_guard() {
        let ratings = Ratings::default();
        let empty = CheckInInputs::default();
        assert!(validate_step(CheckInStep::Activity, &empty, &ratings).is_err());

        let calories_only = CheckInInputs::from_raw("", "1800", "", "");
        assert!(validate_step(CheckInStep::Activity, &calories_only, &ratings).is_ok());

        // Rounds to zero steps when stored
        let fractional = CheckInInputs::from_raw("0.4", "0", "", "");
        assert!(validate_step(CheckInStep::Activity, &fractional, &ratings).is_err());
        let half = CheckInInputs::from_raw("0.5", "0", "", "");
        assert!(validate_step(CheckInStep::Activity, &half, &ratings).is_ok());
    }

    #[test]
    fn test_sleep_guard_messages() {
        let mut ratings = Ratings::default();
        let too_long = CheckInInputs::from_raw("", "", "25", "");

        // Both fail: the rating message is reported
        match validate_step(CheckInStep::Sleep, &too_long, &ratings) {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "Please rate your sleep quality"),
            other => panic!("unexpected: {:?}", other),
        }

        ratings.set(RatingCategory::SleepQuality, 3).unwrap();
        match validate_step(CheckInStep::Sleep, &too_long, &ratings) {
            Err(AppError::Validation(msg)) => assert!(msg.contains("valid sleep hours")),
            other => panic!("unexpected: {:?}", other),
        }

        let full_day = CheckInInputs::from_raw("", "", "24", "");
        assert!(validate_step(CheckInStep::Sleep, &full_day, &ratings).is_ok());
    }

    #[test]
    fn test_hydration_and_energy_guards() {
        let mut ratings = Ratings::default();
        let water = CheckInInputs::from_raw("", "", "", "1.5");
        assert!(validate_step(CheckInStep::Hydration, &water, &ratings).is_err());
        ratings.set(RatingCategory::HydrationLevel, 2).unwrap();
        assert!(validate_step(CheckInStep::Hydration, &water, &ratings).is_ok());
        assert!(validate_step(CheckInStep::Hydration, &CheckInInputs::default(), &ratings).is_err());

        assert!(validate_step(CheckInStep::Energy, &water, &ratings).is_err());
        ratings.set(RatingCategory::EnergyLevel, 1).unwrap();
        assert!(validate_step(CheckInStep::Energy, &water, &ratings).is_ok());

        assert!(validate_step(CheckInStep::Review, &CheckInInputs::default(), &Ratings::default()).is_ok());
    }

    // ── Transitions ──────────────────────────────────────────────────────

    #[test]
    fn test_advance_blocked_without_activity() {
        let mut workflow = CheckInWorkflow::new();
        let err = workflow.advance().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(workflow.current_step(), Some(CheckInStep::Activity));

        workflow
            .update_inputs(CheckInInputs::from_raw("500", "", "", ""))
            .unwrap();
        let view = workflow.advance().unwrap();
        assert_eq!(view.step, CheckInStep::Sleep);
        assert_eq!(view.number, 2);
        assert_eq!(workflow.current_step(), Some(CheckInStep::Sleep));
    }

    #[test]
    fn test_retreat_skips_validation_and_stops_at_one() {
        let mut workflow = filled();
        workflow.advance().unwrap();
        workflow.advance().unwrap();
        workflow.update_inputs(CheckInInputs::default()).unwrap();

        assert_eq!(workflow.retreat().unwrap().step, CheckInStep::Sleep);
        assert_eq!(workflow.retreat().unwrap().step, CheckInStep::Activity);
        assert_eq!(workflow.retreat().unwrap().step, CheckInStep::Activity);
    }

    #[test]
    fn test_entering_review_produces_snapshot() {
        let mut workflow = filled();
        for _ in 0..3 {
            assert!(workflow.advance().unwrap().review.is_none());
        }
        let view = workflow.advance().unwrap();
        assert_eq!(view.step, CheckInStep::Review);
        let review = view.review.unwrap();
        assert_eq!(review.steps, 8500.0);
        assert_eq!(review.water_liters, 2.3);
        assert_eq!(review.energy_rating, "★★★★★");

        // Nothing past review
        assert_eq!(workflow.advance().unwrap().step, CheckInStep::Review);
    }

    // ── Submit ───────────────────────────────────────────────────────────

    #[test]
    fn test_submit_commits_scored_entry() {
        let mut workflow = filled();
        walk_to_review(&mut workflow);
        let mut user = user();

        let result = workflow.submit(&mut user, today()).unwrap();
        assert_eq!(result.score, result.entry.wellness_score);
        assert!(!result.replaced_existing);
        assert_eq!(user.entry(today()), Some(&result.entry));
        assert_eq!(user.history().first(), Some(&result.entry));
        assert_eq!(workflow.current_step(), None);
        assert_eq!(workflow.submitted_entry(), Some(&result.entry));
    }

    #[test]
    fn test_submit_before_review_is_rejected() {
        let mut workflow = filled();
        let mut user = user();
        assert!(workflow.submit(&mut user, today()).is_err());
        assert_eq!(user.entry_count(), 0);
    }

    #[test]
    fn test_submit_without_energy_leaves_store_untouched() {
        let mut workflow = CheckInWorkflow::new();
        workflow
            .update_inputs(CheckInInputs::from_raw("8500", "", "8", "2"))
            .unwrap();
        workflow.rate(RatingCategory::SleepQuality, 4).unwrap();
        workflow.rate(RatingCategory::HydrationLevel, 4).unwrap();
        // Force the review step without going through the energy guard
        workflow.phase = Phase::InProgress(CheckInStep::Review);

        let mut user = user();
        user.commit(DailyEntry::from_check_in(
            today(),
            &CheckInInputs::from_raw("100", "", "", ""),
            &Ratings::default(),
        ));
        let before = user.history();

        let err = workflow.submit(&mut user, today()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(user.history(), before);
        assert_eq!(workflow.current_step(), Some(CheckInStep::Review));
    }

    #[test]
    fn test_resubmit_same_day_overwrites() {
        let mut user = user();
        let mut workflow = filled();
        walk_to_review(&mut workflow);
        workflow.submit(&mut user, today()).unwrap();

        workflow.reset();
        workflow
            .update_inputs(CheckInInputs::from_raw("12000", "", "8", "3"))
            .unwrap();
        rated_all(&mut workflow);
        walk_to_review(&mut workflow);
        let result = workflow.submit(&mut user, today()).unwrap();

        assert!(result.replaced_existing);
        assert_eq!(user.entry_count(), 1);
        assert_eq!(user.entry(today()).map(|e| e.steps), Some(12000));
    }

    #[test]
    fn test_terminal_state_only_exits_through_reset() {
        let mut workflow = filled();
        walk_to_review(&mut workflow);
        workflow.submit(&mut user(), today()).unwrap();

        assert!(workflow.advance().is_err());
        assert!(workflow.retreat().is_err());
        assert!(workflow.rate(RatingCategory::EnergyLevel, 3).is_err());
        assert!(workflow.submit(&mut user(), today()).is_err());

        workflow.reset();
        assert_eq!(workflow.current_step(), Some(CheckInStep::Activity));
        assert_eq!(workflow.ratings(), &Ratings::default());
        assert_eq!(workflow.inputs(), &CheckInInputs::default());
    }
}
