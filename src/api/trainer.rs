use axum::{
    extract::State,
    middleware,
    response::Json,
    routing::{get, post, put},
    Extension, Router,
};
use axum_extra::extract::WithRejection;
use validator::Validate;

use crate::api::ApiError;
use crate::auth::{jwt_auth_middleware, AuthenticatedUser, JwtService};
use crate::dto::{
    AddSportActivity, CreateTrainingProgram, ProgramRequestSetPrice, ReportRequest,
    ReportResponse, RequestInTrainerPage, Response, TraineeInTrainerPage, TrainerEdit,
    TrainerResponse, TrainerSetPrice, WeekPlan,
};
use crate::models::NewReport;
use crate::services::TrainerService;

#[derive(Clone)]
pub struct TrainerAppState {
    pub trainer_service: TrainerService,
}

/// Routes mounted under `/trainer`, every one behind the JWT guard
///
/// Paths are registered without trailing slashes; the app normalizes
/// incoming URIs before routing.
pub fn trainer_routes(trainer_service: TrainerService, jwt_service: JwtService) -> Router {
    let shared_state = TrainerAppState { trainer_service };

    Router::new()
        .route("/", get(get_week_plan))
        .route("/profile", get(get_trainer_profile).put(edit_profile))
        .route("/trainees", get(get_trainees))
        .route("/requests", get(get_all_requests))
        .route("/request/set-price", put(set_price))
        .route("/program", post(create_training_program))
        .route("/program/sport-activity", put(add_sport_activity))
        .route("/trainers", get(get_all_trainers))
        .route("/add-report", post(add_report))
        .route_layer(middleware::from_fn_with_state(
            jwt_service,
            jwt_auth_middleware,
        ))
        .with_state(shared_state)
}

/// Get the caller's trainer profile
#[tracing::instrument(skip(state))]
pub async fn get_trainer_profile(
    State(state): State<TrainerAppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<TrainerResponse>, ApiError> {
    let trainer = state
        .trainer_service
        .get_trainer_by_user_id(user.user_id)
        .await?;

    Ok(Json(TrainerResponse::from(&trainer)))
}

/// Edit the caller's trainer profile
#[tracing::instrument(skip(state, payload))]
pub async fn edit_profile(
    State(state): State<TrainerAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    WithRejection(Json(payload), _): WithRejection<Json<TrainerEdit>, ApiError>,
) -> Result<Json<TrainerResponse>, ApiError> {
    payload.validate()?;

    let trainer = state
        .trainer_service
        .get_trainer_by_user_id(user.user_id)
        .await?;
    let updated = state
        .trainer_service
        .edit_trainer_profile(trainer.id, payload.into())
        .await?;

    Ok(Json(TrainerResponse::from(&updated)))
}

/// List the names of the caller's trainees
#[tracing::instrument(skip(state))]
pub async fn get_trainees(
    State(state): State<TrainerAppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<TraineeInTrainerPage>>, ApiError> {
    let trainer = state
        .trainer_service
        .get_trainer_by_user_id(user.user_id)
        .await?;
    let trainees = state.trainer_service.get_trainees(&trainer).await?;

    Ok(Json(trainees.iter().map(TraineeInTrainerPage::from).collect()))
}

/// List program requests addressed to the caller
#[tracing::instrument(skip(state))]
pub async fn get_all_requests(
    State(state): State<TrainerAppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<RequestInTrainerPage>>, ApiError> {
    let trainer = state
        .trainer_service
        .get_trainer_by_user_id(user.user_id)
        .await?;
    let requests = state.trainer_service.get_requests(&trainer).await?;

    Ok(Json(requests.iter().map(RequestInTrainerPage::from).collect()))
}

/// Quote a price on one of the caller's requests
#[tracing::instrument(skip(state, payload))]
pub async fn set_price(
    State(state): State<TrainerAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    WithRejection(Json(payload), _): WithRejection<Json<TrainerSetPrice>, ApiError>,
) -> Result<Json<ProgramRequestSetPrice>, ApiError> {
    payload.validate()?;

    let trainer = state
        .trainer_service
        .get_trainer_by_user_id(user.user_id)
        .await?;
    let request = state
        .trainer_service
        .set_price(&trainer, payload.request_id, payload.price, payload.description)
        .await?;

    Ok(Json(request.into()))
}

/// Create a training program for one of the caller's trainees
#[tracing::instrument(skip(state, payload))]
pub async fn create_training_program(
    State(state): State<TrainerAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateTrainingProgram>, ApiError>,
) -> Result<Json<Response>, ApiError> {
    payload.validate()?;

    let trainer = state
        .trainer_service
        .get_trainer_by_user_id(user.user_id)
        .await?;
    let program = state
        .trainer_service
        .create_training_program(&trainer, payload.into_new_program(trainer.id))
        .await?;

    Ok(Json(Response::created("Training program created", program.id)))
}

/// Add a sport activity to one of the caller's programs
#[tracing::instrument(skip(state, payload))]
pub async fn add_sport_activity(
    State(state): State<TrainerAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    WithRejection(Json(payload), _): WithRejection<Json<AddSportActivity>, ApiError>,
) -> Result<Json<Response>, ApiError> {
    payload.validate()?;

    let trainer = state
        .trainer_service
        .get_trainer_by_user_id(user.user_id)
        .await?;
    let activity = state
        .trainer_service
        .add_sport_activity(&trainer, payload.into())
        .await?;

    Ok(Json(Response::created(
        "Sport Activity Added successfully",
        activity.id,
    )))
}

/// List every trainer profile
#[tracing::instrument(skip(state))]
pub async fn get_all_trainers(
    State(state): State<TrainerAppState>,
) -> Result<Json<Vec<TrainerResponse>>, ApiError> {
    let trainers = state.trainer_service.get_all_trainers().await?;

    Ok(Json(trainers.iter().map(TrainerResponse::from).collect()))
}

/// File a report on behalf of the caller
#[tracing::instrument(skip(state, payload))]
pub async fn add_report(
    State(state): State<TrainerAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    WithRejection(Json(payload), _): WithRejection<Json<ReportRequest>, ApiError>,
) -> Result<Json<ReportResponse>, ApiError> {
    payload.validate()?;

    let report = state
        .trainer_service
        .add_report(NewReport {
            user_id: user.user_id,
            description: payload.description,
        })
        .await?;

    Ok(Json(ReportResponse {
        description: report.description,
    }))
}

/// Weekly active-days plan of the caller
#[tracing::instrument(skip(state))]
pub async fn get_week_plan(
    State(state): State<TrainerAppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<WeekPlan>, ApiError> {
    let trainer = state
        .trainer_service
        .get_trainer_by_user_id(user.user_id)
        .await?;

    Ok(Json(WeekPlan::from(trainer.active_days)))
}
