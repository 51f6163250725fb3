use serde::Serialize;

use super::entities::Project;
use crate::models::PaginationInfo;
use crate::models::profiles::entities::{FacultyProfile, StudentProfile};

// 列表项：项目附带提交学生的标识信息
#[derive(Debug, Clone, Serialize)]
pub struct ProjectListItem {
    #[serde(flatten)]
    pub project: Project,
    pub student_username: String,
    pub register_number: String,
}

// 项目列表响应
#[derive(Debug, Clone, Serialize)]
pub struct ProjectListResponse {
    pub items: Vec<ProjectListItem>,
    pub pagination: PaginationInfo,
}

// 学生工作台响应
#[derive(Debug, Serialize)]
pub struct StudentDashboardResponse {
    pub profile: StudentProfile,
    pub projects: ProjectListResponse,
}

// 教师工作台响应
#[derive(Debug, Serialize)]
pub struct FacultyDashboardResponse {
    pub profile: FacultyProfile,
    pub projects: ProjectListResponse,
}
