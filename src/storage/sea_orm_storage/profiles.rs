use super::users::{add_membership_on, ensure_group_on};
use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::entity::{faculty_profiles, student_profiles};
use crate::errors::{Result, TrackerError};
use crate::models::profiles::entities::{FacultyProfile, StudentProfile};
use crate::models::profiles::requests::{CreateFacultyAccount, CreateStudentAccount};
use crate::models::users::entities::{GroupName, UserStatus};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 注册学生账号：用户、组成员、学生档案在同一事务内写入
    pub(crate) async fn register_student_impl(
        &self,
        account: CreateStudentAccount,
    ) -> Result<StudentProfile> {
        let now = chrono::Utc::now().timestamp();

        let txn = self.db.begin().await.map_err(|e| {
            TrackerError::database_operation(format!("Transaction begin failed: {e}"))
        })?;

        let user = UserActiveModel {
            username: Set(account.username.clone()),
            password_hash: Set(account.password_hash),
            status: Set(UserStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| TrackerError::database_operation(format!("User creation failed: {e}")))?;

        let group_id = ensure_group_on(&txn, GroupName::Student).await?;
        add_membership_on(&txn, user.id, group_id).await?;

        let profile = StudentProfileActiveModel {
            user_id: Set(user.id),
            register_number: Set(account.register_number),
            department: Set(account.department),
            year: Set(account.year),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| TrackerError::database_operation(format!("Profile creation failed: {e}")))?;

        txn.commit().await.map_err(|e| {
            TrackerError::database_operation(format!("Transaction commit failed: {e}"))
        })?;

        Ok(profile.into_student_profile(account.username))
    }

    /// 注册教师账号：用户、组成员、教师档案在同一事务内写入
    pub(crate) async fn register_faculty_impl(
        &self,
        account: CreateFacultyAccount,
    ) -> Result<FacultyProfile> {
        let now = chrono::Utc::now().timestamp();

        let txn = self.db.begin().await.map_err(|e| {
            TrackerError::database_operation(format!("Transaction begin failed: {e}"))
        })?;

        let user = UserActiveModel {
            username: Set(account.username.clone()),
            password_hash: Set(account.password_hash),
            status: Set(UserStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| TrackerError::database_operation(format!("User creation failed: {e}")))?;

        let group_id = ensure_group_on(&txn, GroupName::Faculty).await?;
        add_membership_on(&txn, user.id, group_id).await?;

        let profile = FacultyProfileActiveModel {
            user_id: Set(user.id),
            employee_id: Set(account.employee_id),
            department: Set(account.department),
            designation: Set(account.designation.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| TrackerError::database_operation(format!("Profile creation failed: {e}")))?;

        txn.commit().await.map_err(|e| {
            TrackerError::database_operation(format!("Transaction commit failed: {e}"))
        })?;

        Ok(profile.into_faculty_profile(account.username))
    }

    /// 按用户 ID 获取学生档案
    pub(crate) async fn get_student_profile_by_user_impl(
        &self,
        user_id: i64,
    ) -> Result<Option<StudentProfile>> {
        let result = StudentProfiles::find()
            .filter(student_profiles::Column::UserId.eq(user_id))
            .find_also_related(Users)
            .one(&self.db)
            .await
            .map_err(|e| TrackerError::database_operation(format!("Profile query failed: {e}")))?;

        Ok(result.map(|(profile, user)| {
            let username = user.map(|u| u.username).unwrap_or_default();
            profile.into_student_profile(username)
        }))
    }

    /// 按用户 ID 获取教师档案
    pub(crate) async fn get_faculty_profile_by_user_impl(
        &self,
        user_id: i64,
    ) -> Result<Option<FacultyProfile>> {
        let result = FacultyProfiles::find()
            .filter(faculty_profiles::Column::UserId.eq(user_id))
            .find_also_related(Users)
            .one(&self.db)
            .await
            .map_err(|e| TrackerError::database_operation(format!("Profile query failed: {e}")))?;

        Ok(result.map(|(profile, user)| {
            let username = user.map(|u| u.username).unwrap_or_default();
            profile.into_faculty_profile(username)
        }))
    }

    /// 检查学号是否已被占用
    pub(crate) async fn student_register_number_exists_impl(
        &self,
        register_number: &str,
    ) -> Result<bool> {
        let count = StudentProfiles::find()
            .filter(student_profiles::Column::RegisterNumber.eq(register_number))
            .count(&self.db)
            .await
            .map_err(|e| TrackerError::database_operation(format!("Profile query failed: {e}")))?;

        Ok(count > 0)
    }

    /// 检查工号是否已被占用
    pub(crate) async fn faculty_employee_id_exists_impl(&self, employee_id: &str) -> Result<bool> {
        let count = FacultyProfiles::find()
            .filter(faculty_profiles::Column::EmployeeId.eq(employee_id))
            .count(&self.db)
            .await
            .map_err(|e| TrackerError::database_operation(format!("Profile query failed: {e}")))?;

        Ok(count > 0)
    }
}
