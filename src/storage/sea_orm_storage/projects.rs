//! 项目存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::entity::{projects, student_profiles};
use crate::errors::{Result, TrackerError};
use crate::models::{
    PaginationInfo,
    profiles::entities::StudentProfile,
    projects::{
        entities::{Project, ProjectStatus},
        requests::{CreateProjectRequest, ProjectListQuery},
        responses::{ProjectListItem, ProjectListResponse},
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建项目（初始状态 Pending）
    pub(crate) async fn create_project_impl(&self, req: CreateProjectRequest) -> Result<Project> {
        let now = chrono::Utc::now().timestamp();

        let model = ProjectActiveModel {
            student_id: Set(req.student_id),
            title: Set(req.title),
            domain: Set(req.domain),
            description: Set(req.description),
            status: Set(ProjectStatus::Pending.to_string()),
            faculty_remarks: Set(String::new()),
            attachment_path: Set(req.attachment_path),
            attachment_name: Set(req.attachment_name),
            submitted_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TrackerError::database_operation(format!("Project creation failed: {e}")))?;

        Ok(result.into_project())
    }

    /// 通过 ID 获取项目
    pub(crate) async fn get_project_by_id_impl(&self, project_id: i64) -> Result<Option<Project>> {
        let result = Projects::find_by_id(project_id)
            .one(&self.db)
            .await
            .map_err(|e| TrackerError::database_operation(format!("Project query failed: {e}")))?;

        Ok(result.map(|m| m.into_project()))
    }

    /// 获取项目及其提交学生的档案
    pub(crate) async fn get_project_with_student_impl(
        &self,
        project_id: i64,
    ) -> Result<Option<(Project, StudentProfile)>> {
        let result = Projects::find_by_id(project_id)
            .find_also_related(StudentProfiles)
            .one(&self.db)
            .await
            .map_err(|e| TrackerError::database_operation(format!("Project query failed: {e}")))?;

        let Some((project, Some(profile))) = result else {
            return Ok(None);
        };

        let user = Users::find_by_id(profile.user_id)
            .one(&self.db)
            .await
            .map_err(|e| TrackerError::database_operation(format!("User query failed: {e}")))?;

        let username = user.map(|u| u.username).unwrap_or_default();

        Ok(Some((
            project.into_project(),
            profile.into_student_profile(username),
        )))
    }

    /// 列出项目（分页，附带学生标识信息）
    pub(crate) async fn list_projects_impl(
        &self,
        query: ProjectListQuery,
    ) -> Result<ProjectListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Projects::find();

        // 学生筛选（学生视角只能看到自己的项目）
        if let Some(student_id) = query.student_id {
            select = select.filter(projects::Column::StudentId.eq(student_id));
        }

        // 状态筛选
        if let Some(status) = query.status {
            select = select.filter(projects::Column::Status.eq(status.to_string()));
        }

        // 搜索条件（按标题或领域搜索）
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(projects::Column::Title.contains(&escaped))
                    .add(projects::Column::Domain.contains(&escaped)),
            );
        }

        // 排序：最新提交在前
        select = select.order_by_desc(projects::Column::SubmittedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| TrackerError::database_operation(format!("Project count failed: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| TrackerError::database_operation(format!("Project page count failed: {e}")))?;

        let records = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| TrackerError::database_operation(format!("Project list failed: {e}")))?;

        // 批量查询学生档案与用户名
        let student_ids: Vec<i64> = records
            .iter()
            .map(|p| p.student_id)
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        let profiles = StudentProfiles::find()
            .filter(student_profiles::Column::Id.is_in(student_ids))
            .find_also_related(Users)
            .all(&self.db)
            .await
            .map_err(|e| TrackerError::database_operation(format!("Profile query failed: {e}")))?;

        let profile_map: HashMap<i64, (String, String)> = profiles
            .into_iter()
            .map(|(profile, user)| {
                let username = user.map(|u| u.username).unwrap_or_default();
                (profile.id, (username, profile.register_number))
            })
            .collect();

        let items = records
            .into_iter()
            .map(|m| {
                let (student_username, register_number) = profile_map
                    .get(&m.student_id)
                    .cloned()
                    .unwrap_or_default();
                ProjectListItem {
                    project: m.into_project(),
                    student_username,
                    register_number,
                }
            })
            .collect();

        Ok(ProjectListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 评审项目：记录评审人与备注，首次离开 Pending 时写入 reviewed_at
    pub(crate) async fn review_project_impl(
        &self,
        project_id: i64,
        reviewer_id: i64,
        status: ProjectStatus,
        remarks: String,
    ) -> Result<Option<Project>> {
        let Some(existing) = Projects::find_by_id(project_id)
            .one(&self.db)
            .await
            .map_err(|e| TrackerError::database_operation(format!("Project query failed: {e}")))?
        else {
            return Ok(None);
        };

        let now = chrono::Utc::now().timestamp();
        let stamp_review = should_stamp_review(status, existing.reviewed_at);

        let mut active: ProjectActiveModel = existing.into();
        active.status = Set(status.to_string());
        active.faculty_reviewer_id = Set(Some(reviewer_id));
        active.faculty_remarks = Set(remarks);
        active.updated_at = Set(now);
        if stamp_review {
            active.reviewed_at = Set(Some(now));
        }

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| TrackerError::database_operation(format!("Project update failed: {e}")))?;

        Ok(Some(updated.into_project()))
    }
}

/// reviewed_at 写入策略：仅在首次离开 Pending 时写入，此后保持不变
fn should_stamp_review(new_status: ProjectStatus, existing_reviewed_at: Option<i64>) -> bool {
    new_status != ProjectStatus::Pending && existing_reviewed_at.is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_transition_out_of_pending_stamps() {
        assert!(should_stamp_review(ProjectStatus::Approved, None));
        assert!(should_stamp_review(ProjectStatus::Rejected, None));
    }

    #[test]
    fn test_staying_pending_never_stamps() {
        assert!(!should_stamp_review(ProjectStatus::Pending, None));
        assert!(!should_stamp_review(ProjectStatus::Pending, Some(1)));
    }

    #[test]
    fn test_re_review_keeps_original_stamp() {
        // Approved -> Rejected 之类的再评审不重写 reviewed_at
        assert!(!should_stamp_review(ProjectStatus::Rejected, Some(1)));
        assert!(!should_stamp_review(ProjectStatus::Approved, Some(1)));
    }
}
