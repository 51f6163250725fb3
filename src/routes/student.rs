use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::projects::requests::ProjectListParams;
use crate::models::users::entities::GroupName;
use crate::services::StudentService;

// 懒加载的全局 StudentService 实例
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

pub async fn dashboard(
    request: HttpRequest,
    query: web::Query<ProjectListParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.dashboard(&request, query.into_inner()).await
}

pub async fn submit_project(
    request: HttpRequest,
    payload: actix_multipart::Multipart,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.submit_project(&request, payload).await
}

// 配置路由
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/student")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireGroup::new(GroupName::Student))
                    .route("/dashboard", web::get().to(dashboard))
                    .route("/dashboard", web::post().to(submit_project)),
            ),
    );
}
