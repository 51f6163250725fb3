use serde::Deserialize;

use super::entities::ProjectStatus;
use crate::models::common::pagination::PaginationQuery;

// 项目提交内容（从 multipart 表单字段收集）
#[derive(Debug, Clone, Default)]
pub struct SubmitProjectRequest {
    pub title: String,
    pub domain: String,
    pub description: String,
}

// 项目创建参数（用于存储层）
#[derive(Debug, Clone)]
pub struct CreateProjectRequest {
    pub student_id: i64,
    pub title: String,
    pub domain: String,
    pub description: String,
    pub attachment_path: Option<String>,
    pub attachment_name: Option<String>,
}

// 评审请求（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct ReviewProjectRequest {
    pub project_id: i64,
    pub status: ProjectStatus,
    #[serde(default)]
    pub remarks: String,
}

// 项目列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct ProjectListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<ProjectStatus>,
    pub search: Option<String>,
}

// 项目列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct ProjectListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub status: Option<ProjectStatus>,
    pub search: Option<String>,
    /// 限定某个学生的项目；None 表示全量列表（教师视角）
    pub student_id: Option<i64>,
}

impl From<ProjectListParams> for ProjectListQuery {
    fn from(params: ProjectListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            status: params.status,
            search: params.search,
            student_id: None,
        }
    }
}
