use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::middlewares::RequireJWT;
use crate::models::projects::requests::{ProjectListParams, ProjectListQuery};
use crate::models::projects::responses::StudentDashboardResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn handle_dashboard(
    service: &StudentService,
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

    // 账号存在但没有学生档案：不一致的账号状态
    let profile = match storage.get_student_profile_by_user(user.id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ProfileNotFound,
                "Student profile not found",
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

    // 只列出本人的项目
    let mut query = ProjectListQuery::from(params);
    query.student_id = Some(profile.id);

    match storage.list_projects(query).await {
        Ok(projects) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudentDashboardResponse { profile, projects },
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
