use std::sync::Arc;

use crate::models::{
    profiles::{
        entities::{FacultyProfile, StudentProfile},
        requests::{CreateFacultyAccount, CreateStudentAccount},
    },
    projects::{
        entities::{Project, ProjectStatus},
        requests::{CreateProjectRequest, ProjectListQuery},
        responses::ProjectListResponse,
    },
    reports::entities::{CreateReportRequest, ProjectReport},
    users::entities::{GroupName, User},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 通过ID获取用户信息（含组成员身份）
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 角色组方法
    // 幂等地确保角色组存在，返回组ID
    async fn ensure_group(&self, name: GroupName) -> Result<i64>;
    // 创建管理员账号并加入 Admin 组（事务）
    async fn create_admin_user(&self, username: &str, password_hash: &str) -> Result<User>;

    /// 注册方法（用户 + 组成员 + 档案在同一事务内创建）
    // 学生注册
    async fn register_student(&self, account: CreateStudentAccount) -> Result<StudentProfile>;
    // 教师注册
    async fn register_faculty(&self, account: CreateFacultyAccount) -> Result<FacultyProfile>;

    /// 档案方法
    // 获取用户的学生档案
    async fn get_student_profile_by_user(&self, user_id: i64) -> Result<Option<StudentProfile>>;
    // 获取用户的教师档案
    async fn get_faculty_profile_by_user(&self, user_id: i64) -> Result<Option<FacultyProfile>>;
    // 学号是否已被占用
    async fn student_register_number_exists(&self, register_number: &str) -> Result<bool>;
    // 工号是否已被占用
    async fn faculty_employee_id_exists(&self, employee_id: &str) -> Result<bool>;

    /// 项目方法
    // 创建项目（初始状态 pending）
    async fn create_project(&self, req: CreateProjectRequest) -> Result<Project>;
    // 通过ID获取项目
    async fn get_project_by_id(&self, id: i64) -> Result<Option<Project>>;
    // 通过ID获取项目及其提交学生
    async fn get_project_with_student(&self, id: i64)
    -> Result<Option<(Project, StudentProfile)>>;
    // 列出项目（最新提交在前，可按学生/状态/关键字过滤）
    async fn list_projects(&self, query: ProjectListQuery) -> Result<ProjectListResponse>;
    // 评审项目：绑定评审教师，首次离开 pending 时写入 reviewed_at
    async fn review_project(
        &self,
        project_id: i64,
        reviewer_id: i64,
        status: ProjectStatus,
        remarks: &str,
    ) -> Result<Option<Project>>;

    /// 报告方法
    // 追加一条报告记录（永不覆盖已有记录）
    async fn create_report(&self, req: CreateReportRequest) -> Result<ProjectReport>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
