use std::collections::BTreeMap;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{
    error::AppError,
    models::{activity::Activity, trip::NewTrip},
    routes::parse_id,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_trip))
        .route("/:id", get(get_trip).put(update_trip))
        .route("/:id/confirm", get(confirm_trip))
        .route(
            "/:id/activities",
            get(get_trip_activities).post(create_activity),
        )
        .route("/:id/invites", post(invite_to_trip))
        .route("/:id/links", get(get_trip_links).post(create_trip_link))
        .route("/:id/participants", get(get_trip_participants))
}

#[derive(Debug, Deserialize)]
struct CreateTripRequest {
    destination: String,
    owner_name: String,
    owner_email: String,
    emails_to_invite: Vec<String>,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct CreateTripResponse {
    #[serde(rename = "tripId")]
    trip_id: String,
}

async fn create_trip(
    State(state): State<AppState>,
    body: Result<Json<CreateTripRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateTripResponse>), AppError> {
    let Json(body) = body.map_err(bad_request_body)?;
    validate_create_trip(&body)?;

    let trip_id = state
        .store
        .create_trip(NewTrip {
            destination: body.destination,
            starts_at: body.starts_at,
            ends_at: body.ends_at,
            owner_name: body.owner_name,
            owner_email: body.owner_email,
            emails_to_invite: body.emails_to_invite,
        })
        .await
        .map_err(|err| {
            error!("failed to create trip: {err:?}");
            AppError::BadRequest("failed to create trip, try again".to_string())
        })?;

    // The response does not wait on the owner notification; delivery
    // failures are logged and never reach the client.
    let mailer = state.mailer.clone();
    tokio::spawn(async move {
        if let Err(err) = mailer.send_trip_confirmation(trip_id).await {
            error!(trip_id = %trip_id, "failed to send trip confirmation email: {err}");
        }
    });

    Ok((
        StatusCode::CREATED,
        Json(CreateTripResponse {
            trip_id: trip_id.to_string(),
        }),
    ))
}

#[derive(Serialize)]
struct TripDetails {
    id: String,
    destination: String,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    is_confirmed: bool,
}

#[derive(Serialize)]
struct GetTripResponse {
    trip: TripDetails,
}

async fn get_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> Result<Json<GetTripResponse>, AppError> {
    let id = parse_id(&trip_id)?;

    let trip = state
        .store
        .get_trip(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Trip not found".to_string()))?;

    Ok(Json(GetTripResponse {
        trip: TripDetails {
            id: trip.id,
            destination: trip.destination,
            starts_at: trip.starts_at,
            ends_at: trip.ends_at,
            is_confirmed: trip.is_confirmed,
        },
    }))
}

#[derive(Serialize)]
struct ActivityEntry {
    id: String,
    title: String,
    occurs_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct ActivityGroup {
    date: DateTime<Utc>,
    activities: Vec<ActivityEntry>,
}

#[derive(Serialize)]
struct GetTripActivitiesResponse {
    activities: Vec<ActivityGroup>,
}

async fn get_trip_activities(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> Result<Json<GetTripActivitiesResponse>, AppError> {
    let id = parse_id(&trip_id)?;

    let activities = state
        .store
        .get_trip_activities(id)
        .await?
        .ok_or_else(|| AppError::NotFound("no trips found".to_string()))?;

    Ok(Json(GetTripActivitiesResponse {
        activities: group_by_occurrence(activities),
    }))
}

/// Buckets activities by their exact occurrence instant, sub-second precision
/// included: two activities on the same calendar day but at different instants
/// land in separate groups. Groups come back in chronological order; within a
/// group, input encounter order is kept.
fn group_by_occurrence(activities: Vec<Activity>) -> Vec<ActivityGroup> {
    let mut groups: BTreeMap<DateTime<Utc>, Vec<ActivityEntry>> = BTreeMap::new();
    for activity in activities {
        groups.entry(activity.occurs_at).or_default().push(ActivityEntry {
            id: activity.id,
            title: activity.title,
            occurs_at: activity.occurs_at,
        });
    }

    groups
        .into_iter()
        .map(|(date, activities)| ActivityGroup { date, activities })
        .collect()
}

fn bad_request_body(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonSyntaxError(_) => AppError::BadRequest("invalid JSON".to_string()),
        JsonRejection::JsonDataError(err) => AppError::BadRequest(format!("invalid input: {err}")),
        _ => AppError::BadRequest("invalid request body".to_string()),
    }
}

fn validate_create_trip(body: &CreateTripRequest) -> Result<(), AppError> {
    if body.destination.trim().chars().count() < 4 {
        return Err(AppError::BadRequest(
            "invalid input: destination must be at least 4 characters".to_string(),
        ));
    }
    if body.owner_name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "invalid input: owner_name is required".to_string(),
        ));
    }
    if !looks_like_email(&body.owner_email) {
        return Err(AppError::BadRequest(
            "invalid input: owner_email is not a valid address".to_string(),
        ));
    }
    for email in &body.emails_to_invite {
        if !looks_like_email(email) {
            return Err(AppError::BadRequest(format!(
                "invalid input: invite address {email:?} is not valid"
            )));
        }
    }
    Ok(())
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

async fn update_trip(Path(_trip_id): Path<String>) -> Result<StatusCode, AppError> {
    Err(AppError::NotImplemented)
}

async fn confirm_trip(Path(_trip_id): Path<String>) -> Result<StatusCode, AppError> {
    Err(AppError::NotImplemented)
}

async fn create_activity(Path(_trip_id): Path<String>) -> Result<StatusCode, AppError> {
    Err(AppError::NotImplemented)
}

async fn invite_to_trip(Path(_trip_id): Path<String>) -> Result<StatusCode, AppError> {
    Err(AppError::NotImplemented)
}

async fn get_trip_links(Path(_trip_id): Path<String>) -> Result<StatusCode, AppError> {
    Err(AppError::NotImplemented)
}

async fn create_trip_link(Path(_trip_id): Path<String>) -> Result<StatusCode, AppError> {
    Err(AppError::NotImplemented)
}

async fn get_trip_participants(Path(_trip_id): Path<String>) -> Result<StatusCode, AppError> {
    Err(AppError::NotImplemented)
}
