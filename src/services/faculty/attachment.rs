use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::FacultyService;
use crate::errors::TrackerError;
use crate::models::{ApiResponse, ErrorCode};

pub async fn handle_download(
    service: &FacultyService,
    request: &HttpRequest,
    project_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let project = match storage.get_project_by_id(project_id).await {
        Ok(Some(project)) => project,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ProjectNotFound,
                "Project not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Project query failed: {e}"),
                )),
            );
        }
    };

    let (file_path, file_name) = match (project.attachment_path, project.attachment_name) {
        (Some(path), Some(name)) => (path, name),
        _ => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FileNotFound,
                "Project has no attachment",
            )));
        }
    };

    if !Path::new(&file_path).exists() {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "Attachment file not found",
        )));
    }

    let mut file = match File::open(&file_path) {
        Ok(f) => f,
        Err(e) => {
            tracing::error!("{}", TrackerError::file_operation(format!("{e}")));
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Attachment open failed",
                )),
            );
        }
    };

    let mut buf = Vec::new();
    if file.read_to_end(&mut buf).is_err() {
        tracing::error!("{}", TrackerError::file_operation("Attachment read failed"));
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Attachment read failed",
            )),
        );
    }

    // 使用提交时的原始文件名
    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "application/octet-stream"))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        ))
        .body(buf))
}
