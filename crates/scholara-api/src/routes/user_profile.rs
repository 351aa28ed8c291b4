//! Signup, signin and student profile handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use scholara_auth::{SigninInput, SignupInput};
use scholara_core::models::user_profile::PublicProfile;
use scholara_core::repository::{ScholarshipRepository, UserProfileRepository};

use crate::error::ApiError;
use crate::params::{
    CompleteProfileRequest, MessageResponse, ProfileUpdatedResponse, RecommendedResponse,
    SigninRequest, SigninResponse, SigninUser, SignupRequest, parse_user_id,
};
use crate::state::AppState;

const SERVER_ERROR: &str = "Server error";

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(inner)| inner)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

pub async fn signup<S: ScholarshipRepository, U: UserProfileRepository>(
    State(state): State<AppState<S, U>>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let req = body(payload)?;
    state
        .auth
        .signup(SignupInput {
            name: req.name,
            email_id: req.email_id,
            password: req.password,
        })
        .await
        .map_err(|e| ApiError::from_domain(e, SERVER_ERROR))?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User created successfully",
        }),
    ))
}

pub async fn signin<S: ScholarshipRepository, U: UserProfileRepository>(
    State(state): State<AppState<S, U>>,
    payload: Result<Json<SigninRequest>, JsonRejection>,
) -> Result<Json<SigninResponse>, ApiError> {
    let req = body(payload)?;
    let output = state
        .auth
        .signin(SigninInput {
            email_id: req.email_id,
            password: req.password,
        })
        .await
        .map_err(|e| ApiError::from_domain(e, SERVER_ERROR))?;

    Ok(Json(SigninResponse {
        token: output.token,
        user_id: output.user.id,
        user: SigninUser {
            name: output.user.name,
            email_id: output.user.email_id,
            id: output.user.id,
        },
    }))
}

/// Tokens are stateless; the client discards its copy.
pub async fn signout() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Signed out successfully",
    })
}

pub async fn complete_profile<S: ScholarshipRepository, U: UserProfileRepository>(
    State(state): State<AppState<S, U>>,
    payload: Result<Json<CompleteProfileRequest>, JsonRejection>,
) -> Result<Json<ProfileUpdatedResponse>, ApiError> {
    let req = body(payload)?;
    let user_id =
        parse_user_id(&req.user_id).map_err(|e| ApiError::from_domain(e, SERVER_ERROR))?;

    let user = state
        .profiles
        .complete_profile(user_id, req.profile)
        .await
        .map_err(|e| ApiError::from_domain(e, SERVER_ERROR))?;

    Ok(Json(ProfileUpdatedResponse {
        message: "Profile updated successfully",
        user,
    }))
}

pub async fn profile<S: ScholarshipRepository, U: UserProfileRepository>(
    State(state): State<AppState<S, U>>,
    Path(user_id): Path<String>,
) -> Result<Json<PublicProfile>, ApiError> {
    let user_id = parse_user_id(&user_id).map_err(|e| ApiError::from_domain(e, SERVER_ERROR))?;
    state
        .profiles
        .get_profile(user_id)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_domain(e, SERVER_ERROR))
}

pub async fn recommended<S: ScholarshipRepository, U: UserProfileRepository>(
    State(state): State<AppState<S, U>>,
    Path(user_id): Path<String>,
) -> Result<Json<RecommendedResponse>, ApiError> {
    let user_id = parse_user_id(&user_id).map_err(|e| ApiError::from_domain(e, SERVER_ERROR))?;
    let recommended_scholarships = state
        .profiles
        .get_recommended(user_id)
        .await
        .map_err(|e| ApiError::from_domain(e, SERVER_ERROR))?;

    Ok(Json(RecommendedResponse {
        recommended_scholarships,
    }))
}
