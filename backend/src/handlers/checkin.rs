use chrono::NaiveDate;

use crate::dto::{CheckInRequest, CheckInResult, CheckInView, RateRequest, RatingView, StepView};
use crate::error::{AppError, AppResult};
use crate::models::daily_entry::CheckInInputs;
use crate::models::rating::stars;
use crate::models::user::UserRecord;
use crate::services::checkin::{CheckInWorkflow, TOTAL_STEPS};
use crate::AppState;

fn active_workflow(state: &mut AppState) -> AppResult<&mut CheckInWorkflow> {
    state.current_email()?;
    Ok(state.session.workflow_mut())
}

pub fn get_check_in(state: &AppState) -> AppResult<CheckInView> {
    state.current_email()?;
    let workflow = state.session.workflow();
    Ok(CheckInView {
        step: workflow.view(),
        inputs: *workflow.inputs(),
        ratings: *workflow.ratings(),
        submitted: workflow.submitted_entry().cloned(),
    })
}

pub fn update_inputs(state: &mut AppState, inputs: CheckInInputs) -> AppResult<CheckInView> {
    active_workflow(state)?.update_inputs(inputs)?;
    get_check_in(state)
}

pub fn rate(state: &mut AppState, body: RateRequest) -> AppResult<RatingView> {
    active_workflow(state)?.rate(body.category, body.value)?;
    Ok(RatingView {
        category: body.category,
        value: body.value,
        stars: stars(body.value),
        description: body
            .category
            .describe(body.value)
            .unwrap_or_default()
            .to_string(),
    })
}

pub fn next_step(state: &mut AppState) -> AppResult<StepView> {
    active_workflow(state)?.advance()
}

pub fn previous_step(state: &mut AppState) -> AppResult<StepView> {
    active_workflow(state)?.retreat()
}

/// Commits the wizard's values as the signed-in user's entry for `today`.
pub fn submit(state: &mut AppState, today: NaiveDate) -> AppResult<CheckInResult> {
    let email = state.current_email()?;
    let user = state
        .users
        .get_mut(&email)
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", email)))?;
    state.session.workflow_mut().submit(user, today)
}

/// Starts a new check-in, discarding anything collected or submitted.
pub fn reset(state: &mut AppState) -> AppResult<StepView> {
    let workflow = active_workflow(state)?;
    workflow.reset();
    workflow
        .view()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("fresh check-in has no step")))
}

/// Runs every step guard against `body` in order and commits on success.
/// On failure nothing is stored and the session's wizard is left as it was;
/// on success the wizard starts over.
pub fn submit_check_in(
    state: &mut AppState,
    body: CheckInRequest,
    today: NaiveDate,
) -> AppResult<CheckInResult> {
    let email = state.current_email()?;
    let user = state
        .users
        .get_mut(&email)
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", email)))?;

    let result = run_check_in(body, user, today)?;
    state.session.workflow_mut().reset();
    Ok(result)
}

fn run_check_in(
    body: CheckInRequest,
    user: &mut UserRecord,
    today: NaiveDate,
) -> AppResult<CheckInResult> {
    let mut workflow = CheckInWorkflow::new();
    workflow.update_inputs(body.inputs)?;
    for (category, value) in body.ratings.iter_set() {
        workflow.rate(category, value)?;
    }
    for _ in 1..TOTAL_STEPS {
        workflow.advance()?;
    }
    workflow.submit(user, today)
}
