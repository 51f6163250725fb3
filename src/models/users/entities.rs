use serde::{Deserialize, Serialize};

// 角色组名称
//
// Student -> 学生工作台, Faculty -> 教师工作台, Admin -> 管理
// 不属于任何组的账号仅能回到登录页。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GroupName {
    Student,
    Faculty,
    Admin,
}

impl GroupName {
    pub const STUDENT: &'static str = "Student";
    pub const FACULTY: &'static str = "Faculty";
    pub const ADMIN: &'static str = "Admin";

    pub fn all() -> &'static [GroupName] {
        &[GroupName::Student, GroupName::Faculty, GroupName::Admin]
    }

    /// 组名在数据库中的规范形式
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupName::Student => Self::STUDENT,
            GroupName::Faculty => Self::FACULTY,
            GroupName::Admin => Self::ADMIN,
        }
    }
}

impl<'de> Deserialize<'de> for GroupName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<GroupName>().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for GroupName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for GroupName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::STUDENT | "student" => Ok(GroupName::Student),
            Self::FACULTY | "faculty" => Ok(GroupName::Faculty),
            Self::ADMIN | "admin" => Ok(GroupName::Admin),
            _ => Err(format!(
                "Invalid group name: '{s}'. Supported: Student, Faculty, Admin"
            )),
        }
    }
}

/// 根据组成员身份决定登录后的去向
///
/// 学生组优先于教师组；两者都不属于则回到登录页。
pub fn dashboard_destination(groups: &[GroupName]) -> &'static str {
    if groups.contains(&GroupName::Student) {
        "student_dashboard"
    } else if groups.contains(&GroupName::Faculty) {
        "faculty_dashboard"
    } else {
        "login"
    }
}

// 用户状态
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl<'de> Deserialize<'de> for UserStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<UserStatus>().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Inactive => write!(f, "inactive"),
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            _ => Err(format!(
                "Invalid user status: '{s}'. Supported: active, inactive"
            )),
        }
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)] // 不序列化到JSON响应中
    pub password_hash: String,
    pub status: UserStatus,
    pub groups: Vec<GroupName>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    /// 登录后的去向（按组成员身份分发）
    pub fn dashboard_destination(&self) -> &'static str {
        dashboard_destination(&self.groups)
    }

    /// 主组：用于写入 JWT claims
    pub fn primary_group(&self) -> Option<GroupName> {
        if self.groups.contains(&GroupName::Student) {
            Some(GroupName::Student)
        } else if self.groups.contains(&GroupName::Faculty) {
            Some(GroupName::Faculty)
        } else if self.groups.contains(&GroupName::Admin) {
            Some(GroupName::Admin)
        } else {
            None
        }
    }

    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(&self) -> Result<crate::utils::jwt::TokenPair, String> {
        let group = self
            .primary_group()
            .map(|g| g.to_string())
            .unwrap_or_default();
        crate::utils::jwt::JwtUtils::generate_token_pair(self.id, &group)
            .map_err(|e| format!("Failed to generate token pair: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_name_round_trip() {
        for group in GroupName::all() {
            assert_eq!(group.as_str().parse::<GroupName>().unwrap(), *group);
        }
        assert!("Principal".parse::<GroupName>().is_err());
    }

    #[test]
    fn test_dashboard_dispatch() {
        assert_eq!(
            dashboard_destination(&[GroupName::Student]),
            "student_dashboard"
        );
        assert_eq!(
            dashboard_destination(&[GroupName::Faculty]),
            "faculty_dashboard"
        );
        // 学生身份优先
        assert_eq!(
            dashboard_destination(&[GroupName::Faculty, GroupName::Student]),
            "student_dashboard"
        );
        // 仅管理组或无组：回到登录页
        assert_eq!(dashboard_destination(&[GroupName::Admin]), "login");
        assert_eq!(dashboard_destination(&[]), "login");
    }
}
