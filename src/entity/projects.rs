//! 项目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub title: String,
    pub domain: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub status: String,
    pub faculty_reviewer_id: Option<i64>,
    #[sea_orm(column_type = "Text")]
    pub faculty_remarks: String,
    pub attachment_path: Option<String>,
    pub attachment_name: Option<String>,
    pub submitted_at: i64,
    pub reviewed_at: Option<i64>,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student_profiles::Entity",
        from = "Column::StudentId",
        to = "super::student_profiles::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::faculty_profiles::Entity",
        from = "Column::FacultyReviewerId",
        to = "super::faculty_profiles::Column::Id"
    )]
    FacultyReviewer,
    #[sea_orm(has_many = "super::project_reports::Entity")]
    Reports,
}

impl Related<super::student_profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::faculty_profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FacultyReviewer.def()
    }
}

impl Related<super::project_reports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reports.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_project(self) -> crate::models::projects::entities::Project {
        use crate::models::projects::entities::{Project, ProjectStatus};
        use chrono::{DateTime, Utc};

        // 状态列损坏时退回 Pending，但必须留下痕迹
        let status = self.status.parse::<ProjectStatus>().unwrap_or_else(|e| {
            tracing::warn!("Project {} has a corrupt status column: {}", self.id, e);
            ProjectStatus::Pending
        });

        Project {
            id: self.id,
            student_id: self.student_id,
            title: self.title,
            domain: self.domain,
            description: self.description,
            status,
            faculty_reviewer_id: self.faculty_reviewer_id,
            faculty_remarks: self.faculty_remarks,
            attachment_path: self.attachment_path,
            attachment_name: self.attachment_name,
            submitted_at: DateTime::<Utc>::from_timestamp(self.submitted_at, 0).unwrap_or_default(),
            reviewed_at: self
                .reviewed_at
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::projects::entities::ProjectStatus;

    #[test]
    fn test_corrupt_status_falls_back_to_pending() {
        let model = Model {
            id: 1,
            student_id: 1,
            title: "AI Chatbot".to_string(),
            domain: "AI".to_string(),
            description: "A conversational agent.".to_string(),
            status: "archived".to_string(),
            faculty_reviewer_id: None,
            faculty_remarks: String::new(),
            attachment_path: None,
            attachment_name: None,
            submitted_at: 0,
            reviewed_at: None,
            updated_at: 0,
        };

        assert_eq!(model.into_project().status, ProjectStatus::Pending);
    }
}
