/*!
 * 基于组的访问控制中间件
 *
 * 此中间件必须在 RequireJWT 中间件之后使用，用于验证用户是否属于指定的组。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App, HttpServer};
 * use crate::middlewares::require_jwt::RequireJWT;
 * use crate::middlewares::require_group::RequireGroup;
 * use crate::models::users::entities::GroupName;
 *
 * HttpServer::new(|| {
 *     App::new()
 *         .service(
 *             web::scope("/api")
 *                 .wrap(RequireJWT)  // 先验证JWT
 *                 .service(
 *                     web::scope("/faculty")
 *                         .wrap(RequireGroup::new(GroupName::Faculty))  // 再验证组
 *                         .route("/dashboard", web::get().to(faculty_dashboard_handler))
 *                 )
 *         )
 * })
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::models::{
    ErrorCode,
    users::entities::{self, GroupName},
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireGroup {
    required_groups: Vec<GroupName>,
}

impl RequireGroup {
    /// 创建需要特定组成员身份的中间件
    pub fn new(group: GroupName) -> Self {
        Self {
            required_groups: vec![group],
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireGroup
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireGroupMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireGroupMiddleware {
            service: Rc::new(service),
            required_groups: self.required_groups.clone(),
        }))
    }
}

pub struct RequireGroupMiddleware<S> {
    service: Rc<S>,
    required_groups: Vec<GroupName>,
}

impl<S, B> Service<ServiceRequest> for RequireGroupMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let required_groups = self.required_groups.clone();

        Box::pin(async move {
            // 从请求扩展中获取已认证用户
            let user = req.extensions().get::<entities::User>().cloned();

            match user {
                Some(user) => {
                    let has_permission = required_groups
                        .iter()
                        .any(|group| user.groups.contains(group));

                    if has_permission {
                        let res = srv.call(req).await?.map_into_left_body();
                        Ok(res)
                    } else {
                        info!(
                            "Access denied for user {} (groups: {:?}). Required groups: {:?}",
                            user.id, user.groups, required_groups
                        );
                        Ok(req.into_response(
                            create_error_response(
                                StatusCode::FORBIDDEN,
                                ErrorCode::Forbidden,
                                "Access denied.",
                            )
                            .map_into_right_body(),
                        ))
                    }
                }
                None => {
                    info!(
                        "Group check failed: No user found in request. Make sure RequireJWT middleware is applied first."
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Authentication required",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}
