use axum::{Extension, Json, extract::Query, http::StatusCode};
use chrono::Utc;
use serde::Deserialize;

use crate::error::ApiError;
use crate::models::{ApiResponse, AuthUser, CreateProject, PagedResponse, Pagination, Project};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 100;
const MAX_NAME_LEN: usize = 100;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    page: Option<u32>,
    limit: Option<u32>,
}

fn page_bounds(params: &ListParams) -> (u32, u32) {
    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    (page, limit)
}

/// Paginated project listing. The data is fabricated per request until real
/// storage lands, so projects created through POST never show up here.
pub async fn list_projects(
    Extension(user): Extension<AuthUser>,
    Query(params): Query<ListParams>,
) -> Json<PagedResponse<Project>> {
    let (page, limit) = page_bounds(&params);

    let projects = vec![Project {
        id: "proj_1".to_string(),
        name: "Sample Project".to_string(),
        description: "A sample AI art project".to_string(),
        created_at: Utc::now(),
        owner_id: user.id,
    }];

    let total = projects.len() as u32;
    let pages = total.div_ceil(limit);
    let offset = (page as u64 - 1) * limit as u64;

    let data: Vec<Project> = projects
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .collect();

    Json(PagedResponse::new(
        data,
        Pagination {
            page,
            limit,
            total,
            pages,
        },
    ))
}

/// Validates and "creates" a project. Nothing is persisted: the returned
/// project exists only in this response.
pub async fn create_project(
    Extension(user): Extension<AuthUser>,
    Json(body): Json<CreateProject>,
) -> Result<(StatusCode, Json<ApiResponse<Project>>), ApiError> {
    let name = body.name.trim();

    if name.is_empty() {
        return Err(ApiError::Validation("Project name is required".to_string()));
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ApiError::Validation(
            "Project name must be at most 100 characters".to_string(),
        ));
    }

    let now = Utc::now();
    let project = Project {
        id: format!("proj_{}", now.timestamp_millis()),
        name: name.to_string(),
        description: body
            .description
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string(),
        created_at: now,
        owner_id: user.id,
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            project,
            "Project created successfully",
        )),
    ))
}
