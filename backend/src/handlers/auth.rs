use validator::Validate;

use crate::dto::{LoginRequest, MessageResponse, SignupRequest};
use crate::error::AppResult;
use crate::models::user::{UserProfile, UserRecord};
use crate::AppState;

pub fn register(state: &mut AppState, body: SignupRequest) -> AppResult<UserProfile> {
    let body = SignupRequest {
        email: body.email.trim().to_string(),
        password: body.password,
        name: body.name.trim().to_string(),
        department: body.department.trim().to_string(),
    };
    body.validate()?;

    let record = UserRecord::new(&body.email, &body.password, &body.name, &body.department);
    let user = state.users.register(record)?;

    tracing::info!(user_id = %user.id, "Account created");
    Ok(UserProfile::from(user))
}

/// Signs in, replacing any current session and discarding its check-in.
pub fn login(state: &mut AppState, body: LoginRequest) -> AppResult<UserProfile> {
    let body = LoginRequest {
        email: body.email.trim().to_string(),
        password: body.password,
    };
    body.validate()?;

    let profile = match state.users.authenticate(&body.email, &body.password) {
        Ok(user) => UserProfile::from(user),
        Err(e) => {
            tracing::warn!(email = %body.email, "Login rejected");
            return Err(e);
        }
    };

    state.session.start(&profile.email);
    tracing::info!(user_id = %profile.id, "Session started");
    Ok(profile)
}

pub fn logout(state: &mut AppState) -> MessageResponse {
    if let Some(email) = state.session.end() {
        tracing::info!(email = %email, "Session ended");
    }
    MessageResponse {
        message: "Logged out".into(),
    }
}

pub fn me(state: &AppState) -> AppResult<UserProfile> {
    state.current_user().map(UserProfile::from)
}
