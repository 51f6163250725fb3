//! 项目报告实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "project_reports")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub project_id: i64,
    pub generated_by: Option<i64>,
    pub pdf_path: String,
    pub file_name: String,
    #[sea_orm(column_type = "Text")]
    pub notes: String,
    pub generated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::projects::Entity",
        from = "Column::ProjectId",
        to = "super::projects::Column::Id"
    )]
    Project,
    #[sea_orm(
        belongs_to = "super::faculty_profiles::Entity",
        from = "Column::GeneratedBy",
        to = "super::faculty_profiles::Column::Id"
    )]
    GeneratedBy,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::faculty_profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GeneratedBy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_report(self) -> crate::models::reports::entities::ProjectReport {
        use chrono::{DateTime, Utc};

        crate::models::reports::entities::ProjectReport {
            id: self.id,
            project_id: self.project_id,
            generated_by: self.generated_by,
            pdf_path: self.pdf_path,
            file_name: self.file_name,
            notes: self.notes,
            generated_at: DateTime::<Utc>::from_timestamp(self.generated_at, 0).unwrap_or_default(),
        }
    }
}
