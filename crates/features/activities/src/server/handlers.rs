use super::models::{EmailQuery, ErrorResponse, MessageResponse};
use crate::{Activities, ActivityError};
use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use campus_kernel::domain::activity::{Activity, Catalog};
use campus_kernel::domain::constants::ACTIVITIES_TAG;
use campus_kernel::prelude::{ApiError, ApiState};

impl From<ActivityError> for ApiError {
    fn from(err: ActivityError) -> Self {
        match err {
            ActivityError::NotFound { .. } | ActivityError::NotRegistered { .. } => {
                Self::not_found(err.to_string())
            },
            ActivityError::AlreadySignedUp { .. } | ActivityError::Full { .. } => {
                Self::bad_request(err.to_string())
            },
            ActivityError::SeedIo { .. }
            | ActivityError::SeedFormat { .. }
            | ActivityError::InvalidSeed { .. } => Self::internal(err.to_string()),
        }
    }
}

fn activities(state: &ApiState) -> Result<&Activities, ApiError> {
    state.try_get_slice::<Activities>().map_err(|e| ApiError::internal(e.to_string()))
}

/// Raw query pairs; repeated keys are kept so the last `email` wins.
type QueryPairs = Result<Query<Vec<(String, String)>>, QueryRejection>;

fn email(query: QueryPairs) -> Result<String, ApiError> {
    let Query(pairs) = query.map_err(|rejection| ApiError::unprocessable(rejection.body_text()))?;
    pairs
        .into_iter()
        .rev()
        .find_map(|(key, value)| (key == EmailQuery::FIELD).then_some(value))
        .ok_or_else(|| ApiError::unprocessable(format!("Missing query parameter `{}`", EmailQuery::FIELD)))
}

/// A name that cannot be decoded cannot match any activity.
fn activity_name(path: Result<Path<String>, PathRejection>) -> Result<String, ApiError> {
    path.map(|Path(name)| name).map_err(|rejection| {
        tracing::debug!(reason = %rejection.body_text(), "Undecodable activity name");
        ApiError::from(ActivityError::NotFound { activity: String::new() })
    })
}

#[utoipa::path(
    get,
    path = "/activities",
    responses((status = OK, description = "All activities keyed by name", body = std::collections::BTreeMap<String, Activity>)),
    tag = ACTIVITIES_TAG,
)]
#[allow(clippy::unused_async)]
pub(super) async fn list_activities(State(state): State<ApiState>) -> Result<Json<Catalog>, ApiError> {
    Ok(Json(activities(&state)?.snapshot()))
}

#[utoipa::path(
    post,
    path = "/activities/{activity_name}/signup",
    params(("activity_name" = String, Path, description = "Activity name"), EmailQuery),
    responses(
        (status = OK, description = "Student signed up", body = MessageResponse),
        (status = BAD_REQUEST, description = "Already signed up or activity full", body = ErrorResponse),
        (status = NOT_FOUND, description = "Activity not found", body = ErrorResponse),
        (status = UNPROCESSABLE_ENTITY, description = "Missing email", body = ErrorResponse),
    ),
    tag = ACTIVITIES_TAG,
)]
#[allow(clippy::unused_async)]
pub(super) async fn signup(
    State(state): State<ApiState>,
    path: Result<Path<String>, PathRejection>,
    query: QueryPairs,
) -> Result<Json<MessageResponse>, ApiError> {
    let activity_name = activity_name(path)?;
    let email = email(query)?;
    activities(&state)?.signup(&activity_name, &email)?;

    Ok(Json(MessageResponse { message: format!("Signed up {email} for {activity_name}") }))
}

#[utoipa::path(
    delete,
    path = "/activities/{activity_name}/remove",
    params(("activity_name" = String, Path, description = "Activity name"), EmailQuery),
    responses(
        (status = OK, description = "Student removed", body = MessageResponse),
        (status = NOT_FOUND, description = "Activity not found or student not registered", body = ErrorResponse),
        (status = UNPROCESSABLE_ENTITY, description = "Missing email", body = ErrorResponse),
    ),
    tag = ACTIVITIES_TAG,
)]
#[allow(clippy::unused_async)]
pub(super) async fn remove_participant(
    State(state): State<ApiState>,
    path: Result<Path<String>, PathRejection>,
    query: QueryPairs,
) -> Result<Json<MessageResponse>, ApiError> {
    let activity_name = activity_name(path)?;
    let email = email(query)?;
    activities(&state)?.unregister(&activity_name, &email)?;

    Ok(Json(MessageResponse { message: format!("Removed {email} from {activity_name}") }))
}
