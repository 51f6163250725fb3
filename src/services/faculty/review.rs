use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FacultyService;
use crate::middlewares::RequireJWT;
use crate::models::projects::requests::ReviewProjectRequest;
use crate::models::{ApiResponse, ErrorCode};

// 评语长度上限
const MAX_REMARKS_LENGTH: usize = 4000;

pub async fn handle_review(
    service: &FacultyService,
    request: &HttpRequest,
    review_request: ReviewProjectRequest,
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

    let remarks = review_request.remarks.trim();
    if remarks.chars().count() > MAX_REMARKS_LENGTH {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::ReviewValidationFailed,
            "Remarks too long",
        )));
    }

    // reviewed_at 仅在项目首次离开 pending 时由存储层写入
    match storage
        .review_project(
            review_request.project_id,
            profile.id,
            review_request.status,
            remarks,
        )
        .await
    {
        Ok(Some(project)) => {
            tracing::info!(
                "Project {} reviewed by {} (status: {})",
                project.id,
                profile.username,
                project.status
            );
            Ok(HttpResponse::Ok()
                .json(ApiResponse::success(project, "Review saved successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ProjectNotFound,
            "Project not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to save review: {e}"),
            )),
        ),
    }
}
