//! 教师档案实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "faculty_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    #[sea_orm(unique)]
    pub employee_id: String,
    pub department: String,
    pub designation: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::projects::Entity")]
    ReviewedProjects,
    #[sea_orm(has_many = "super::project_reports::Entity")]
    GeneratedReports,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_faculty_profile(
        self,
        username: String,
    ) -> crate::models::profiles::entities::FacultyProfile {
        use crate::models::profiles::entities::Designation;
        use chrono::{DateTime, Utc};

        // 职称列损坏时退回 Lecturer，但必须留下痕迹
        let designation = self.designation.parse::<Designation>().unwrap_or_else(|e| {
            tracing::warn!(
                "Faculty profile {} has a corrupt designation column: {}",
                self.id,
                e
            );
            Designation::Lecturer
        });

        crate::models::profiles::entities::FacultyProfile {
            id: self.id,
            user_id: self.user_id,
            username,
            employee_id: self.employee_id,
            department: self.department,
            designation,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profiles::entities::Designation;

    #[test]
    fn test_corrupt_designation_falls_back_to_lecturer() {
        let model = Model {
            id: 1,
            user_id: 1,
            employee_id: "EMP1".to_string(),
            department: "CSE".to_string(),
            designation: "Dean".to_string(),
            created_at: 0,
            updated_at: 0,
        };

        let profile = model.into_faculty_profile("bob".to_string());
        assert_eq!(profile.designation, Designation::Lecturer);
    }
}
