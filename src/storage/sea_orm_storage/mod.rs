//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod profiles;
mod projects;
mod reports;
mod users;

use crate::config::AppConfig;
use crate::errors::{Result, TrackerError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::new_with_url(&config.database.url, config.database.pool_size).await
    }

    /// 使用指定连接 URL 创建存储实例（测试也走这条路径）
    pub async fn new_with_url(url: &str, pool_size: u32) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, pool_size).await?
        } else {
            Self::connect_generic(&db_url, pool_size).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| TrackerError::database_operation(format!("Migration failed: {e}")))?;

        info!("SeaORM storage initialized, database: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, pool_size: u32) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| TrackerError::database_config(format!("SQLite URL parse failed: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        // 内存库的连接池必须收敛到单连接，否则每个连接各自为政
        let max_connections = if url.contains(":memory:") {
            1
        } else {
            pool_size
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .test_before_acquire(true)
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| {
                TrackerError::database_connection(format!("SQLite connection failed: {e}"))
            })?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, pool_size: u32) -> Result<DatabaseConnection> {
        let config = AppConfig::get();
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| TrackerError::database_connection(format!("Cannot connect: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(TrackerError::database_config(format!(
                "Cannot infer database type from URL: {url}. Supported: sqlite://, postgres://, mysql://, or .db/.sqlite file paths"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 角色组模块
    async fn ensure_group(&self, name: GroupName) -> Result<i64> {
        self.ensure_group_impl(name).await
    }

    async fn create_admin_user(&self, username: &str, password_hash: &str) -> Result<User> {
        self.create_admin_user_impl(username, password_hash).await
    }

    // 注册模块
    async fn register_student(&self, account: CreateStudentAccount) -> Result<StudentProfile> {
        self.register_student_impl(account).await
    }

    async fn register_faculty(&self, account: CreateFacultyAccount) -> Result<FacultyProfile> {
        self.register_faculty_impl(account).await
    }

    // 档案模块
    async fn get_student_profile_by_user(&self, user_id: i64) -> Result<Option<StudentProfile>> {
        self.get_student_profile_by_user_impl(user_id).await
    }

    async fn get_faculty_profile_by_user(&self, user_id: i64) -> Result<Option<FacultyProfile>> {
        self.get_faculty_profile_by_user_impl(user_id).await
    }

    async fn student_register_number_exists(&self, register_number: &str) -> Result<bool> {
        self.student_register_number_exists_impl(register_number)
            .await
    }

    async fn faculty_employee_id_exists(&self, employee_id: &str) -> Result<bool> {
        self.faculty_employee_id_exists_impl(employee_id).await
    }

    // 项目模块
    async fn create_project(&self, req: CreateProjectRequest) -> Result<Project> {
        self.create_project_impl(req).await
    }

    async fn get_project_by_id(&self, id: i64) -> Result<Option<Project>> {
        self.get_project_by_id_impl(id).await
    }

    async fn get_project_with_student(
        &self,
        id: i64,
    ) -> Result<Option<(Project, StudentProfile)>> {
        self.get_project_with_student_impl(id).await
    }

    async fn list_projects(&self, query: ProjectListQuery) -> Result<ProjectListResponse> {
        self.list_projects_impl(query).await
    }

    async fn review_project(
        &self,
        project_id: i64,
        reviewer_id: i64,
        status: ProjectStatus,
        remarks: &str,
    ) -> Result<Option<Project>> {
        self.review_project_impl(project_id, reviewer_id, status, remarks.to_string())
            .await
    }

    // 报告模块
    async fn create_report(&self, req: CreateReportRequest) -> Result<ProjectReport> {
        self.create_report_impl(req).await
    }
}
