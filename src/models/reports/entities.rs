use serde::Serialize;

// 项目报告
//
// 追加写入：同一项目的多次生成产生多条记录，互不覆盖。
#[derive(Debug, Clone, Serialize)]
pub struct ProjectReport {
    pub id: i64,
    pub project_id: i64,
    /// 生成报告的教师档案 ID；教师被删除后置空
    pub generated_by: Option<i64>,
    #[serde(skip_serializing)] // 存储路径不暴露给客户端
    pub pdf_path: String,
    pub file_name: String,
    pub notes: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

// 报告创建参数（用于存储层）
#[derive(Debug, Clone)]
pub struct CreateReportRequest {
    pub project_id: i64,
    pub generated_by: Option<i64>,
    pub pdf_path: String,
    pub file_name: String,
    pub notes: String,
}
