use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};
use std::fs;
use std::path::Path;
use uuid::Uuid;

use super::ReportService;
use crate::config::AppConfig;
use crate::errors::TrackerError;
use crate::middlewares::RequireJWT;
use crate::models::reports::entities::CreateReportRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::pdf::render_project_report;

pub async fn handle_generate(
    service: &ReportService,
    request: &HttpRequest,
    project_id: i64,
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

    // 教师档案或项目无法解析都视为无效请求
    let profile = match storage.get_faculty_profile_by_user(user.id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ProfileNotFound,
                "Invalid request: faculty profile not found",
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

    let (project, student) = match storage.get_project_with_student(project_id).await {
        Ok(Some(pair)) => pair,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ProjectNotFound,
                "Invalid request: project not found",
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

    // 1. 渲染单页 PDF
    let pdf_bytes = match render_project_report(&project, &student) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("{}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ReportGenerationFailed,
                    "Report rendering failed",
                )),
            );
        }
    };

    // 2. 落盘（文件名冲突时追加随机后缀，绝不覆盖已有报告）
    let config = AppConfig::get();
    let reports_dir = &config.upload.reports_dir;
    if !Path::new(reports_dir).exists()
        && let Err(e) = fs::create_dir_all(reports_dir)
    {
        tracing::error!("{}", TrackerError::file_operation(format!("{e}")));
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::ReportGenerationFailed,
                "Failed to create reports directory",
            )),
        );
    }

    let file_name = dedup_report_file_name(reports_dir, project.id);
    let pdf_path = format!("{reports_dir}/{file_name}");
    if let Err(e) = fs::write(&pdf_path, &pdf_bytes) {
        tracing::error!("{}", TrackerError::file_operation(format!("{e}")));
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::ReportGenerationFailed,
                "Failed to store report file",
            )),
        );
    }

    // 3. 追加报告记录（同一项目可多次生成，记录互不覆盖）
    let report = match storage
        .create_report(CreateReportRequest {
            project_id: project.id,
            generated_by: Some(profile.id),
            pdf_path: pdf_path.clone(),
            file_name: file_name.clone(),
            notes: project.faculty_remarks.clone(),
        })
        .await
    {
        Ok(report) => report,
        Err(e) => {
            // 记录写入失败时清理刚落盘的文件
            let _ = fs::remove_file(&pdf_path);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ReportGenerationFailed,
                    format!("Failed to persist report record: {e}"),
                )),
            );
        }
    };

    tracing::info!(
        "Report {} generated for project {} by {}",
        report.id,
        project.id,
        profile.username
    );

    // 4. 回读落盘文件并作为附件回传；回读失败降级为警告，记录已存在
    match fs::read(&pdf_path) {
        Ok(bytes) => Ok(HttpResponse::Ok()
            .insert_header((header::CONTENT_TYPE, "application/pdf"))
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ))
            .body(bytes)),
        Err(e) => {
            tracing::warn!("Stored report file unreadable after save: {}", e);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                report,
                "Report generated, but the stored file could not be read back",
            )))
        }
    }
}

// project_report_<id>.pdf；已存在时插入随机后缀
fn dedup_report_file_name(reports_dir: &str, project_id: i64) -> String {
    let base = format!("project_report_{project_id}.pdf");
    if !Path::new(&format!("{reports_dir}/{base}")).exists() {
        return base;
    }
    let suffix = Uuid::new_v4().to_string();
    format!("project_report_{}-{}.pdf", project_id, &suffix[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_keeps_base_name_when_free() {
        let dir = std::env::temp_dir().join(format!("reports-{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let dir = dir.to_str().unwrap().to_string();

        assert_eq!(dedup_report_file_name(&dir, 7), "project_report_7.pdf");
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_dedup_generates_distinct_names_on_collision() {
        let dir = std::env::temp_dir().join(format!("reports-{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let dir_str = dir.to_str().unwrap().to_string();

        fs::write(dir.join("project_report_7.pdf"), b"%PDF").unwrap();
        let first = dedup_report_file_name(&dir_str, 7);
        assert_ne!(first, "project_report_7.pdf");
        assert!(first.starts_with("project_report_7-"));
        assert!(first.ends_with(".pdf"));

        fs::write(dir.join(&first), b"%PDF").unwrap();
        let second = dedup_report_file_name(&dir_str, 7);
        assert_ne!(second, first);

        fs::remove_dir_all(&dir).unwrap();
    }
}
