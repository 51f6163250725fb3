use serde::{Deserialize, Serialize};

// 教师职称
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Designation {
    AssistantProfessor,
    AssociateProfessor,
    Professor,
    Lecturer,
}

impl Designation {
    pub const ASSISTANT_PROFESSOR: &'static str = "Assistant Professor";
    pub const ASSOCIATE_PROFESSOR: &'static str = "Associate Professor";
    pub const PROFESSOR: &'static str = "Professor";
    pub const LECTURER: &'static str = "Lecturer";

    pub fn as_str(&self) -> &'static str {
        match self {
            Designation::AssistantProfessor => Self::ASSISTANT_PROFESSOR,
            Designation::AssociateProfessor => Self::ASSOCIATE_PROFESSOR,
            Designation::Professor => Self::PROFESSOR,
            Designation::Lecturer => Self::LECTURER,
        }
    }
}

impl<'de> Deserialize<'de> for Designation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Designation>().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for Designation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Designation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::ASSISTANT_PROFESSOR => Ok(Designation::AssistantProfessor),
            Self::ASSOCIATE_PROFESSOR => Ok(Designation::AssociateProfessor),
            Self::PROFESSOR => Ok(Designation::Professor),
            Self::LECTURER => Ok(Designation::Lecturer),
            _ => Err(format!(
                "Invalid designation: '{s}'. Supported: Assistant Professor, Associate Professor, Professor, Lecturer"
            )),
        }
    }
}

// 学生档案
#[derive(Debug, Clone, Serialize)]
pub struct StudentProfile {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub register_number: String,
    pub department: String,
    pub year: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 教师档案
#[derive(Debug, Clone, Serialize)]
pub struct FacultyProfile {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub employee_id: String,
    pub department: String,
    pub designation: Designation,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_designation_round_trip() {
        for d in [
            Designation::AssistantProfessor,
            Designation::AssociateProfessor,
            Designation::Professor,
            Designation::Lecturer,
        ] {
            assert_eq!(d.as_str().parse::<Designation>().unwrap(), d);
        }
        assert!("Dean".parse::<Designation>().is_err());
    }
}
