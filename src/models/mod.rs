//! 数据模型定义
//!
//! 按领域划分的请求/响应/业务实体，与数据库实体分离。

pub mod auth;
pub mod common;
pub mod profiles;
pub mod projects;
pub mod reports;
pub mod users;

pub use common::pagination::{PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// 应用启动时间（用于运行信息）
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 统一业务错误码
///
/// HTTP 状态码表达错误类别，错误码提供细分。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1002,
    NotFound = 1003,
    InternalServerError = 1004,

    // 注册与认证
    UserNameAlreadyExists = 2001,
    RegisterNumberAlreadyExists = 2002,
    EmployeeIdAlreadyExists = 2003,
    UserNameInvalid = 2004,
    PasswordInvalid = 2005,
    RegisterFailed = 2006,
    AuthFailed = 2007,

    // 档案与项目
    ProfileNotFound = 3001,
    ProjectNotFound = 3002,
    ProjectValidationFailed = 3003,
    ReviewValidationFailed = 3004,

    // 附件
    FileTypeNotAllowed = 4001,
    FileSizeExceeded = 4002,
    FileUploadFailed = 4003,
    FileNotFound = 4004,
    MultifileUploadNotAllowed = 4005,

    // 报告
    ReportGenerationFailed = 5001,
}
