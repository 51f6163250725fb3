use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::fs;
use std::io::Write;
use std::{fs::File, path::Path};
use uuid::Uuid;

use super::StudentService;
use crate::config::AppConfig;
use crate::errors::TrackerError;
use crate::middlewares::RequireJWT;
use crate::models::projects::requests::{CreateProjectRequest, SubmitProjectRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::{
    validate_project_description, validate_project_domain, validate_project_title,
};
use crate::utils::validate_magic_bytes;

// 文本字段的大小上限，防止把附件塞进文本字段
const MAX_TEXT_FIELD_SIZE: usize = 16 * 1024;

// 收集到的附件信息
struct SavedAttachment {
    path: String,
    original_name: String,
}

pub async fn handle_submit(
    service: &StudentService,
    request: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();
    let upload_dir = &config.upload.attachments_dir;
    let max_size = config.upload.max_size;
    let allowed_types = &config.upload.allowed_types;

    // 确保附件目录存在
    if !Path::new(upload_dir).exists()
        && let Err(e) = fs::create_dir_all(upload_dir)
    {
        tracing::error!("{}", TrackerError::file_operation(format!("{e}")));
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                ErrorCode::FileUploadFailed,
                "Failed to create attachment directory",
            )),
        );
    }

    let mut form = SubmitProjectRequest::default();
    let mut attachment: Option<SavedAttachment> = None;

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        match name.as_str() {
            "title" | "domain" | "description" => {
                let value = match read_text_field(&mut field).await {
                    Ok(value) => value,
                    Err(response) => {
                        discard_attachment(&attachment);
                        return Ok(response);
                    }
                };
                match name.as_str() {
                    "title" => form.title = value,
                    "domain" => form.domain = value,
                    _ => form.description = value,
                }
            }
            "attachment" => {
                if attachment.is_some() {
                    discard_attachment(&attachment);
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::MultifileUploadNotAllowed,
                        "Only one attachment can be uploaded at a time",
                    )));
                }

                let original_name = content_disposition
                    .and_then(|cd| cd.get_filename())
                    .map(|s| s.to_string())
                    .unwrap_or_default();

                // 没有选择文件时浏览器仍会发送空字段
                if original_name.is_empty() {
                    continue;
                }

                // 扩展名校验
                let extension = Path::new(&original_name)
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| format!(".{}", ext.to_lowercase()))
                    .unwrap_or_default();
                if !allowed_types.iter().any(|t| t.to_lowercase() == extension) {
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::FileTypeNotAllowed,
                        "Attachment type not allowed",
                    )));
                }

                let stored_name =
                    format!("{}-{}{}", chrono::Utc::now().timestamp(), Uuid::new_v4(), extension);
                let file_path = format!("{upload_dir}/{stored_name}");
                let mut f = match File::create(&file_path) {
                    Ok(file) => file,
                    Err(e) => {
                        tracing::error!("{}", TrackerError::file_operation(format!("{e}")));
                        return Ok(HttpResponse::InternalServerError().json(
                            ApiResponse::<()>::error_empty(
                                ErrorCode::FileUploadFailed,
                                "Failed to store attachment",
                            ),
                        ));
                    }
                };

                let mut total_size: usize = 0;
                let mut first_chunk = true;
                while let Some(chunk) = field.next().await {
                    // 流中断或写入失败都要删除半成品文件并返回统一响应
                    let data = match chunk {
                        Ok(data) => data,
                        Err(e) => {
                            tracing::warn!("Attachment stream aborted: {}", e);
                            return Ok(abort_upload(
                                &file_path,
                                HttpResponse::BadRequest().json(ApiResponse::error_empty(
                                    ErrorCode::FileUploadFailed,
                                    "Attachment upload interrupted",
                                )),
                            ));
                        }
                    };

                    // 第一个 chunk 时验证魔术字节
                    if first_chunk {
                        first_chunk = false;
                        if !validate_magic_bytes(&data, &extension) {
                            return Ok(abort_upload(
                                &file_path,
                                HttpResponse::BadRequest().json(ApiResponse::error_empty(
                                    ErrorCode::FileTypeNotAllowed,
                                    "Attachment content does not match its extension",
                                )),
                            ));
                        }
                    }

                    total_size += data.len();
                    if total_size > max_size {
                        return Ok(abort_upload(
                            &file_path,
                            HttpResponse::BadRequest().json(ApiResponse::error_empty(
                                ErrorCode::FileSizeExceeded,
                                "Attachment size exceeds the limit",
                            )),
                        ));
                    }
                    if let Err(e) = f.write_all(&data) {
                        tracing::error!("{}", TrackerError::file_operation(format!("{e}")));
                        return Ok(abort_upload(
                            &file_path,
                            HttpResponse::InternalServerError().json(
                                ApiResponse::<()>::error_empty(
                                    ErrorCode::FileUploadFailed,
                                    "Failed to store attachment",
                                ),
                            ),
                        ));
                    }
                }

                attachment = Some(SavedAttachment {
                    path: file_path,
                    original_name,
                });
            }
            _ => {}
        }
    }

    // 表单字段校验；失败时丢弃已保存的附件
    if let Err(response) = validate_submission(&form) {
        discard_attachment(&attachment);
        return Ok(response);
    }

    let storage = service.get_storage(request);

    let user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            discard_attachment(&attachment);
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized access, please login",
            )));
        }
    };

    let profile = match storage.get_student_profile_by_user(user.id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            discard_attachment(&attachment);
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ProfileNotFound,
                "Student profile not found",
            )));
        }
        Err(e) => {
            discard_attachment(&attachment);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to load profile: {e}"),
                )),
            );
        }
    };

    let (attachment_path, attachment_name) = match attachment {
        Some(saved) => (Some(saved.path), Some(saved.original_name)),
        None => (None, None),
    };

    let create_request = CreateProjectRequest {
        student_id: profile.id,
        title: form.title.trim().to_string(),
        domain: form.domain.trim().to_string(),
        description: form.description.trim().to_string(),
        attachment_path,
        attachment_name,
    };

    match storage.create_project(create_request).await {
        Ok(project) => {
            tracing::info!(
                "Project {} submitted by student {}",
                project.id,
                profile.username
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(project, "Project submitted successfully")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to create project: {e}"),
            )),
        ),
    }
}

// 读取一个文本字段（UTF-8，带大小上限）
async fn read_text_field(
    field: &mut actix_multipart::Field,
) -> Result<String, HttpResponse> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.next().await {
        let data = chunk.map_err(|e| {
            HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                format!("Malformed multipart payload: {e}"),
            ))
        })?;
        buf.extend_from_slice(&data);
        if buf.len() > MAX_TEXT_FIELD_SIZE {
            return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "Text field too large",
            )));
        }
    }
    String::from_utf8(buf).map_err(|_| {
        HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Text field is not valid UTF-8",
        ))
    })
}

fn validate_submission(form: &SubmitProjectRequest) -> Result<(), HttpResponse> {
    if let Err(msg) = validate_project_title(&form.title) {
        return Err(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::ProjectValidationFailed,
            msg,
        )));
    }
    if let Err(msg) = validate_project_description(&form.description) {
        return Err(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::ProjectValidationFailed,
            msg,
        )));
    }
    if let Err(msg) = validate_project_domain(&form.domain) {
        return Err(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::ProjectValidationFailed,
            msg,
        )));
    }
    Ok(())
}

// 校验失败后清理已落盘的附件
fn discard_attachment(attachment: &Option<SavedAttachment>) {
    if let Some(saved) = attachment {
        let _ = fs::remove_file(&saved.path);
    }
}

// 上传中途失败：删除半成品文件，原样返回给定的响应
fn abort_upload(file_path: &str, response: HttpResponse) -> HttpResponse {
    let _ = fs::remove_file(file_path);
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_abort_upload_removes_partial_file() {
        let path = std::env::temp_dir().join(format!("partial-{}.bin", Uuid::new_v4()));
        fs::write(&path, b"half-written").unwrap();

        let response = abort_upload(
            path.to_str().unwrap(),
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                ErrorCode::FileUploadFailed,
                "Failed to store attachment",
            )),
        );

        assert!(!path.exists());
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_abort_upload_tolerates_missing_file() {
        let path = std::env::temp_dir().join(format!("missing-{}.bin", Uuid::new_v4()));

        let response = abort_upload(
            path.to_str().unwrap(),
            HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
                ErrorCode::FileUploadFailed,
                "Attachment upload interrupted",
            )),
        );

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
