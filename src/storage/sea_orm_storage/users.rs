use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::entity::{groups, user_groups, users};
use crate::errors::{Result, TrackerError};
use crate::models::users::entities::{GroupName, User, UserStatus};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 加载用户的组成员身份
    pub(crate) async fn load_user_groups(&self, user_id: i64) -> Result<Vec<GroupName>> {
        let rows = UserGroups::find()
            .filter(user_groups::Column::UserId.eq(user_id))
            .find_also_related(Groups)
            .all(&self.db)
            .await
            .map_err(|e| {
                TrackerError::database_operation(format!("Group membership query failed: {e}"))
            })?;

        Ok(rows
            .into_iter()
            .filter_map(|(_, group)| group)
            .filter_map(|g| g.name.parse::<GroupName>().ok())
            .collect())
    }

    /// 通过 ID 获取用户
    pub(crate) async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| TrackerError::database_operation(format!("User query failed: {e}")))?;

        match result {
            Some(model) => {
                let groups = self.load_user_groups(model.id).await?;
                Ok(Some(model.into_user(groups)))
            }
            None => Ok(None),
        }
    }

    /// 通过用户名获取用户
    pub(crate) async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| TrackerError::database_operation(format!("User query failed: {e}")))?;

        match result {
            Some(model) => {
                let groups = self.load_user_groups(model.id).await?;
                Ok(Some(model.into_user(groups)))
            }
            None => Ok(None),
        }
    }

    /// 更新用户最后登录时间
    pub(crate) async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(
                users::Column::LastLogin,
                sea_orm::sea_query::Expr::value(now),
            )
            .filter(users::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                TrackerError::database_operation(format!("Last login update failed: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }

    /// 统计用户数量
    pub(crate) async fn count_users_impl(&self) -> Result<u64> {
        let count = Users::find()
            .count(&self.db)
            .await
            .map_err(|e| TrackerError::database_operation(format!("User count failed: {e}")))?;

        Ok(count)
    }

    /// 幂等地确保角色组存在（get-or-create）
    pub(crate) async fn ensure_group_impl(&self, name: GroupName) -> Result<i64> {
        ensure_group_on(&self.db, name).await
    }

    /// 创建管理员账号并加入 Admin 组（事务）
    pub(crate) async fn create_admin_user_impl(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let txn = self.db.begin().await.map_err(|e| {
            TrackerError::database_operation(format!("Transaction begin failed: {e}"))
        })?;

        let user = UserActiveModel {
            username: Set(username.to_string()),
            password_hash: Set(password_hash.to_string()),
            status: Set(UserStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| TrackerError::database_operation(format!("Admin creation failed: {e}")))?;

        // 特权账号创建即自动入组
        let group_id = ensure_group_on(&txn, GroupName::Admin).await?;
        add_membership_on(&txn, user.id, group_id).await?;

        txn.commit().await.map_err(|e| {
            TrackerError::database_operation(format!("Transaction commit failed: {e}"))
        })?;

        Ok(user.into_user(vec![GroupName::Admin]))
    }
}

/// get-or-create 角色组，可在事务或裸连接上执行
pub(crate) async fn ensure_group_on<C: ConnectionTrait>(conn: &C, name: GroupName) -> Result<i64> {
    let existing = Groups::find()
        .filter(groups::Column::Name.eq(name.as_str()))
        .one(conn)
        .await
        .map_err(|e| TrackerError::database_operation(format!("Group query failed: {e}")))?;

    if let Some(group) = existing {
        return Ok(group.id);
    }

    let inserted = GroupActiveModel {
        name: Set(name.as_str().to_string()),
        created_at: Set(chrono::Utc::now().timestamp()),
        ..Default::default()
    }
    .insert(conn)
    .await;

    match inserted {
        Ok(group) => Ok(group.id),
        // 并发创建撞了唯一索引：重查一次
        Err(_) => {
            let group = Groups::find()
                .filter(groups::Column::Name.eq(name.as_str()))
                .one(conn)
                .await
                .map_err(|e| TrackerError::database_operation(format!("Group query failed: {e}")))?
                .ok_or_else(|| {
                    TrackerError::database_operation(format!("Group '{name}' cannot be created"))
                })?;
            Ok(group.id)
        }
    }
}

/// 添加用户到组
pub(crate) async fn add_membership_on<C: ConnectionTrait>(
    conn: &C,
    user_id: i64,
    group_id: i64,
) -> Result<()> {
    UserGroupActiveModel {
        user_id: Set(user_id),
        group_id: Set(group_id),
        joined_at: Set(chrono::Utc::now().timestamp()),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(|e| TrackerError::database_operation(format!("Group membership failed: {e}")))?;

    Ok(())
}
