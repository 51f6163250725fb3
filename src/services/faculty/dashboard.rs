use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FacultyService;
use crate::middlewares::RequireJWT;
use crate::models::projects::requests::{ProjectListParams, ProjectListQuery};
use crate::models::projects::responses::FacultyDashboardResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn handle_dashboard(
    service: &FacultyService,
    request: &HttpRequest,
    params: ProjectListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized access, please login",
            )));
        }
    };

    let profile = match storage.get_faculty_profile_by_user(user.id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ProfileNotFound,
                "Faculty profile not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to load profile: {e}"),
                )),
            );
        }
    };

    // 教师可见全部项目，student_id 保持 None
    let query = ProjectListQuery::from(params);

    match storage.list_projects(query).await {
        Ok(projects) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            FacultyDashboardResponse { profile, projects },
            "Projects retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list projects: {e}"),
            )),
        ),
    }
}
