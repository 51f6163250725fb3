use serde::{Deserialize, Serialize};

// 项目状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Pending,
    Approved,
    Rejected,
}

impl ProjectStatus {
    pub const PENDING: &'static str = "pending";
    pub const APPROVED: &'static str = "approved";
    pub const REJECTED: &'static str = "rejected";

    /// 人类可读的状态标签（用于报告）
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Pending => "Pending",
            ProjectStatus::Approved => "Approved",
            ProjectStatus::Rejected => "Rejected",
        }
    }
}

impl<'de> Deserialize<'de> for ProjectStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<ProjectStatus>().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectStatus::Pending => write!(f, "{}", Self::PENDING),
            ProjectStatus::Approved => write!(f, "{}", Self::APPROVED),
            ProjectStatus::Rejected => write!(f, "{}", Self::REJECTED),
        }
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::PENDING => Ok(ProjectStatus::Pending),
            Self::APPROVED => Ok(ProjectStatus::Approved),
            Self::REJECTED => Ok(ProjectStatus::Rejected),
            _ => Err(format!(
                "Invalid project status: '{s}'. Supported: pending, approved, rejected"
            )),
        }
    }
}

// 项目实体
//
// reviewed_at 在状态首次离开 pending 时写入，此后不再变更。
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub id: i64,
    pub student_id: i64,
    pub title: String,
    pub domain: String,
    pub description: String,
    pub status: ProjectStatus,
    pub faculty_reviewer_id: Option<i64>,
    pub faculty_remarks: String,
    #[serde(skip_serializing)] // 存储路径不暴露给客户端
    pub attachment_path: Option<String>,
    pub attachment_name: Option<String>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub reviewed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            ProjectStatus::Pending,
            ProjectStatus::Approved,
            ProjectStatus::Rejected,
        ] {
            assert_eq!(
                status.to_string().parse::<ProjectStatus>().unwrap(),
                status
            );
        }
        assert!("archived".parse::<ProjectStatus>().is_err());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(ProjectStatus::Pending.label(), "Pending");
        assert_eq!(ProjectStatus::Approved.label(), "Approved");
        assert_eq!(ProjectStatus::Rejected.label(), "Rejected");
    }
}
