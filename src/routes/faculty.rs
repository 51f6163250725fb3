use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::projects::requests::{ProjectListParams, ReviewProjectRequest};
use crate::models::users::entities::GroupName;
use crate::services::FacultyService;

// 懒加载的全局 FacultyService 实例
static FACULTY_SERVICE: Lazy<FacultyService> = Lazy::new(FacultyService::new_lazy);

pub async fn dashboard(
    request: HttpRequest,
    query: web::Query<ProjectListParams>,
) -> ActixResult<HttpResponse> {
    FACULTY_SERVICE.dashboard(&request, query.into_inner()).await
}

pub async fn review_project(
    request: HttpRequest,
    review: web::Json<ReviewProjectRequest>,
) -> ActixResult<HttpResponse> {
    FACULTY_SERVICE
        .review_project(&request, review.into_inner())
        .await
}

// 配置路由
pub fn configure_faculty_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/faculty")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireGroup::new(GroupName::Faculty))
                    .route("/dashboard", web::get().to(dashboard))
                    .route("/dashboard", web::post().to(review_project)),
            ),
    );
}
