use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::profiles::requests::{
    CreateFacultyAccount, CreateStudentAccount, RegisterFacultyRequest, RegisterStudentRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::{
    validate_identifier, validate_password, validate_username, validate_year,
};

use super::AuthService;

// 学生注册
pub async fn handle_register_student(
    service: &AuthService,
    create_request: RegisterStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. 校验账号字段
    if let Err(response) = validate_account_fields(&create_request.username, &create_request.password)
    {
        return Ok(response);
    }
    if let Err(msg) = validate_identifier(&create_request.register_number) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            format!("Register number: {msg}"),
        )));
    }
    if let Err(msg) = validate_identifier(&create_request.department) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            format!("Department: {msg}"),
        )));
    }
    if let Err(msg) = validate_year(create_request.year) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }

    // 2. 检查用户名是否已存在
    if let Err(response) = check_username_exists(&storage, &create_request.username).await {
        return Ok(response);
    }

    // 3. 检查学号是否已被占用
    match storage
        .student_register_number_exists(create_request.register_number.trim())
        .await
    {
        Ok(true) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::RegisterNumberAlreadyExists,
                "Register number already exists",
            )));
        }
        Ok(false) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    format!("Register failed: {e}"),
                )),
            );
        }
    }

    // 4. 哈希密码
    let password_hash = match hash_password(&create_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Password hashing failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Register failed",
                )),
            );
        }
    };

    // 5. 事务内创建用户 + 组成员 + 学生档案
    //    并发注册撞到唯一约束时由存储层拒绝，统一返回注册失败
    let account = CreateStudentAccount {
        username: create_request.username.trim().to_string(),
        password_hash,
        register_number: create_request.register_number.trim().to_string(),
        department: create_request.department.trim().to_string(),
        year: create_request.year,
    };
    match storage.register_student(account).await {
        Ok(profile) => {
            tracing::info!(
                "Student registered: {} ({})",
                profile.username,
                profile.register_number
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(profile, "Registration successful")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                format!("Register failed: {e}"),
            )),
        ),
    }
}

// 教师注册
pub async fn handle_register_faculty(
    service: &AuthService,
    create_request: RegisterFacultyRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(response) = validate_account_fields(&create_request.username, &create_request.password)
    {
        return Ok(response);
    }
    if let Err(msg) = validate_identifier(&create_request.employee_id) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            format!("Employee id: {msg}"),
        )));
    }
    if let Err(msg) = validate_identifier(&create_request.department) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            format!("Department: {msg}"),
        )));
    }

    if let Err(response) = check_username_exists(&storage, &create_request.username).await {
        return Ok(response);
    }

    match storage
        .faculty_employee_id_exists(create_request.employee_id.trim())
        .await
    {
        Ok(true) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::EmployeeIdAlreadyExists,
                "Employee id already exists",
            )));
        }
        Ok(false) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    format!("Register failed: {e}"),
                )),
            );
        }
    }

    let password_hash = match hash_password(&create_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Password hashing failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Register failed",
                )),
            );
        }
    };

    let account = CreateFacultyAccount {
        username: create_request.username.trim().to_string(),
        password_hash,
        employee_id: create_request.employee_id.trim().to_string(),
        department: create_request.department.trim().to_string(),
        designation: create_request.designation,
    };
    match storage.register_faculty(account).await {
        Ok(profile) => {
            tracing::info!(
                "Faculty registered: {} ({})",
                profile.username,
                profile.employee_id
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(profile, "Registration successful")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                format!("Register failed: {e}"),
            )),
        ),
    }
}

// 两种注册共享的用户名/密码校验（仅要求非空白）
fn validate_account_fields(username: &str, password: &str) -> Result<(), HttpResponse> {
    if let Err(msg) = validate_username(username) {
        return Err(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserNameInvalid, msg)));
    }
    if let Err(msg) = validate_password(password) {
        return Err(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::PasswordInvalid, msg)));
    }
    Ok(())
}

async fn check_username_exists(
    storage: &Arc<dyn Storage>,
    username: &str,
) -> Result<(), HttpResponse> {
    match storage.get_user_by_username(username.trim()).await {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserNameAlreadyExists,
            "Username already exists",
        ))),
        Ok(None) => Ok(()),
        Err(e) => Err(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                format!("Register failed: {e}"),
            )),
        ),
    }
}
