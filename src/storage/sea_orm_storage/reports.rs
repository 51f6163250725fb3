//! 报告存储操作

use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::errors::{Result, TrackerError};
use crate::models::reports::entities::{CreateReportRequest, ProjectReport};
use sea_orm::{ActiveModelTrait, Set};

impl SeaOrmStorage {
    /// 创建报告记录（追加写入，历史记录不覆盖）
    pub(crate) async fn create_report_impl(
        &self,
        req: CreateReportRequest,
    ) -> Result<ProjectReport> {
        let model = ProjectReportActiveModel {
            project_id: Set(req.project_id),
            generated_by: Set(req.generated_by),
            pdf_path: Set(req.pdf_path),
            file_name: Set(req.file_name),
            notes: Set(req.notes),
            generated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TrackerError::database_operation(format!("Report creation failed: {e}")))?;

        Ok(result.into_report())
    }
}
