//! 预导入模块，方便使用

pub use super::faculty_profiles::{
    ActiveModel as FacultyProfileActiveModel, Entity as FacultyProfiles,
    Model as FacultyProfileModel,
};
pub use super::groups::{ActiveModel as GroupActiveModel, Entity as Groups, Model as GroupModel};
pub use super::project_reports::{
    ActiveModel as ProjectReportActiveModel, Entity as ProjectReports,
    Model as ProjectReportModel,
};
pub use super::projects::{
    ActiveModel as ProjectActiveModel, Entity as Projects, Model as ProjectModel,
};
pub use super::student_profiles::{
    ActiveModel as StudentProfileActiveModel, Entity as StudentProfiles,
    Model as StudentProfileModel,
};
pub use super::user_groups::{
    ActiveModel as UserGroupActiveModel, Entity as UserGroups, Model as UserGroupModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
