pub mod auth;
pub mod faculty;
pub mod reports;
pub mod student;

pub use auth::AuthService;
pub use faculty::FacultyService;
pub use reports::ReportService;
pub use student::StudentService;
