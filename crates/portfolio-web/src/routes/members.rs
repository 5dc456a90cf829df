//! Member route handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use portfolio_core::{member, Member, MemberId};
use serde::Deserialize;

use super::blocking;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateMemberRequest {
    pub name: String,
    pub role: String,
}

pub async fn list_members(State(state): State<AppState>) -> ApiResult<Json<Vec<Member>>> {
    let members = blocking(move || member::list_members(&state.db)).await?;
    Ok(Json(members))
}

pub async fn list_members_by_role(
    State(state): State<AppState>,
    role: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Vec<Member>>> {
    let Path(role) = role?;
    let members = blocking(move || member::list_members_by_role(&state.db, &role)).await?;
    Ok(Json(members))
}

pub async fn get_member(
    State(state): State<AppState>,
    id: Result<Path<MemberId>, PathRejection>,
) -> ApiResult<Json<Member>> {
    let Path(id) = id?;
    let found = blocking(move || member::get_member(&state.db, id)).await?;
    Ok(Json(found))
}

pub async fn create_member(
    State(state): State<AppState>,
    payload: Result<Json<CreateMemberRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Member>)> {
    let Json(req) = payload?;
    let created = blocking(move || member::create_member(&state.db, &req.name, &req.role)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
