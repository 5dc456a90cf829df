//! Project route handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use portfolio_core::{
    CreateProject, MemberId, Page, PageRequest, PortfolioReport, ProjectId, ProjectStatus,
    ProjectUpdate, ProjectView,
};
use serde::Deserialize;

use super::blocking;
use crate::error::ApiResult;
use crate::state::AppState;

type ProjectPath = Result<Path<ProjectId>, PathRejection>;
type ProjectMemberPath = Result<Path<(ProjectId, MemberId)>, PathRejection>;

#[derive(Deserialize)]
pub struct ListProjectsQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct ChangeStatusRequest {
    pub status: String,
}

pub async fn list_projects(
    State(state): State<AppState>,
    query: Result<Query<ListProjectsQuery>, QueryRejection>,
) -> ApiResult<Json<Page<ProjectView>>> {
    let Query(query) = query?;
    let request = PageRequest::new(
        query.page.unwrap_or(0),
        query.size.unwrap_or(state.page_size),
    )?;
    let status = query
        .status
        .as_deref()
        .map(str::parse::<ProjectStatus>)
        .transpose()?;

    let page = blocking(move || state.projects.list(request, status)).await?;
    Ok(Json(page))
}

pub async fn get_project(
    State(state): State<AppState>,
    id: ProjectPath,
) -> ApiResult<Json<ProjectView>> {
    let Path(id) = id?;
    let view = blocking(move || state.projects.get(id)).await?;
    Ok(Json(view))
}

pub async fn create_project(
    State(state): State<AppState>,
    payload: Result<Json<CreateProject>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ProjectView>)> {
    let Json(req) = payload?;
    let view = blocking(move || state.projects.create(req)).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn update_project(
    State(state): State<AppState>,
    id: ProjectPath,
    payload: Result<Json<ProjectUpdate>, JsonRejection>,
) -> ApiResult<Json<ProjectView>> {
    let Path(id) = id?;
    let Json(update) = payload?;
    let view = blocking(move || state.projects.update(id, update)).await?;
    Ok(Json(view))
}

pub async fn delete_project(
    State(state): State<AppState>,
    id: ProjectPath,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    blocking(move || state.projects.delete(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn change_status(
    State(state): State<AppState>,
    id: ProjectPath,
    payload: Result<Json<ChangeStatusRequest>, JsonRejection>,
) -> ApiResult<Json<ProjectView>> {
    let Path(id) = id?;
    let Json(req) = payload?;
    let status: ProjectStatus = req.status.parse()?;
    let view = blocking(move || state.projects.change_status(id, status)).await?;
    Ok(Json(view))
}

pub async fn add_member(
    State(state): State<AppState>,
    ids: ProjectMemberPath,
) -> ApiResult<Json<ProjectView>> {
    let Path((id, member_id)) = ids?;
    let view = blocking(move || state.projects.add_member(id, member_id)).await?;
    Ok(Json(view))
}

pub async fn remove_member(
    State(state): State<AppState>,
    ids: ProjectMemberPath,
) -> ApiResult<Json<ProjectView>> {
    let Path((id, member_id)) = ids?;
    let view = blocking(move || state.projects.remove_member(id, member_id)).await?;
    Ok(Json(view))
}

pub async fn get_report(State(state): State<AppState>) -> ApiResult<Json<PortfolioReport>> {
    let report = blocking(move || state.projects.report()).await?;
    Ok(Json(report))
}
