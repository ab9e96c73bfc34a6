//! Project CRUD endpoints

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::RequireSession;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, MessageResponse};
use crate::domain::project::Project;

/// Create the projects router
pub fn create_projects_router() -> Router<AppState> {
    Router::new()
        .route("/all", get(list_projects))
        .route("/create", post(create_project))
        .route(
            "/{project_id}",
            get(get_project).patch(update_project).delete(delete_project),
        )
}

/// Project create/update request body
#[derive(Debug, Deserialize)]
pub struct ProjectBody {
    #[serde(default)]
    pub name: String,
}

/// Project fields exposed to clients
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: String,
    pub name: String,
    pub user_id: String,
    pub created_at: String,
    pub updated_at: String,
}

impl ProjectResponse {
    fn from_project(project: &Project) -> Self {
        Self {
            id: project.id().to_string(),
            name: project.name().to_string(),
            user_id: project.user_id().to_string(),
            created_at: project.created_at().to_rfc3339(),
            updated_at: project.updated_at().to_rfc3339(),
        }
    }
}

/// Envelope carrying a single project
#[derive(Debug, Serialize)]
pub struct ProjectEnvelope {
    pub success: bool,
    pub message: String,
    pub project: ProjectResponse,
}

/// Envelope carrying the project listing
#[derive(Debug, Serialize)]
pub struct ProjectsEnvelope {
    pub success: bool,
    pub message: String,
    pub projects: Vec<ProjectResponse>,
}

/// List projects owned by the session user
///
/// GET /api/projects/all
pub async fn list_projects(
    State(state): State<AppState>,
    RequireSession(identity): RequireSession,
) -> Result<Json<ProjectsEnvelope>, ApiError> {
    let projects = state.project_service.list_all(&identity.id).await?;

    Ok(Json(ProjectsEnvelope {
        success: true,
        message: "Projects found successfully".to_string(),
        projects: projects.iter().map(ProjectResponse::from_project).collect(),
    }))
}

/// Fetch a single owned project
///
/// GET /api/projects/{project_id}
pub async fn get_project(
    State(state): State<AppState>,
    RequireSession(identity): RequireSession,
    Path(project_id): Path<String>,
) -> Result<Json<ProjectEnvelope>, ApiError> {
    let project = state
        .project_service
        .get_one(&identity.id, &project_id)
        .await?;

    Ok(Json(ProjectEnvelope {
        success: true,
        message: "Project found".to_string(),
        project: ProjectResponse::from_project(&project),
    }))
}

/// Create a project for the session user
///
/// POST /api/projects/create
pub async fn create_project(
    State(state): State<AppState>,
    RequireSession(identity): RequireSession,
    Json(body): Json<ProjectBody>,
) -> Result<Json<ProjectEnvelope>, ApiError> {
    let project = state
        .project_service
        .create(&identity.id, &body.name)
        .await?;

    Ok(Json(ProjectEnvelope {
        success: true,
        message: "Project created successfully".to_string(),
        project: ProjectResponse::from_project(&project),
    }))
}

/// Rename an owned project
///
/// PATCH /api/projects/{project_id}
pub async fn update_project(
    State(state): State<AppState>,
    RequireSession(identity): RequireSession,
    Path(project_id): Path<String>,
    Json(body): Json<ProjectBody>,
) -> Result<Json<ProjectEnvelope>, ApiError> {
    let project = state
        .project_service
        .update(&identity.id, &project_id, &body.name)
        .await?;

    Ok(Json(ProjectEnvelope {
        success: true,
        message: "Project updated successfully".to_string(),
        project: ProjectResponse::from_project(&project),
    }))
}

/// Delete an owned project
///
/// DELETE /api/projects/{project_id}
pub async fn delete_project(
    State(state): State<AppState>,
    RequireSession(identity): RequireSession,
    Path(project_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .project_service
        .delete(&identity.id, &project_id)
        .await?;

    Ok(Json(MessageResponse::new("Project deleted successfully")))
}
