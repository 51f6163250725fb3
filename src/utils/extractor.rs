//! 路径参数安全提取器
//!
//! 非法的路径参数（非数字、非正数）直接以统一响应格式返回 400，
//! 不进入业务处理。

use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, HttpResponse, error::InternalError};

use crate::models::{ApiResponse, ErrorCode};

/// 项目 ID 路径参数（`{id}`）
pub struct SafeProjectIdI64(pub i64);

impl FromRequest for SafeProjectIdI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let parsed = req
            .match_info()
            .get("id")
            .and_then(|raw| raw.parse::<i64>().ok());

        ready(match parsed {
            Some(id) if id > 0 => Ok(SafeProjectIdI64(id)),
            _ => {
                let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::BadRequest,
                    "Invalid project id",
                ));
                Err(InternalError::from_response("Invalid project id", response).into())
            }
        })
    }
}
