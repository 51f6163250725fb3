pub mod auth;

pub mod faculty;

pub mod projects;

pub mod student;

pub use auth::configure_auth_routes;
pub use faculty::configure_faculty_routes;
pub use projects::configure_project_routes;
pub use student::configure_student_routes;
