use serde::Deserialize;

use super::entities::Designation;

// 学生注册请求（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct RegisterStudentRequest {
    pub username: String,
    pub password: String,
    pub register_number: String,
    pub department: String,
    pub year: i32,
}

// 教师注册请求（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct RegisterFacultyRequest {
    pub username: String,
    pub password: String,
    pub employee_id: String,
    pub department: String,
    pub designation: Designation,
}

// 学生账号创建参数（用于存储层，密码已哈希）
#[derive(Debug, Clone)]
pub struct CreateStudentAccount {
    pub username: String,
    pub password_hash: String,
    pub register_number: String,
    pub department: String,
    pub year: i32,
}

// 教师账号创建参数（用于存储层，密码已哈希）
#[derive(Debug, Clone)]
pub struct CreateFacultyAccount {
    pub username: String,
    pub password_hash: String,
    pub employee_id: String,
    pub department: String,
    pub designation: Designation,
}
