use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, middleware, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::GroupName;
use crate::services::{FacultyService, ReportService};
use crate::utils::SafeProjectIdI64;

// 懒加载的全局服务实例
static REPORT_SERVICE: Lazy<ReportService> = Lazy::new(ReportService::new_lazy);
static FACULTY_SERVICE: Lazy<FacultyService> = Lazy::new(FacultyService::new_lazy);

pub async fn generate_report(
    request: HttpRequest,
    project_id: SafeProjectIdI64,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.generate_report(&request, project_id.0).await
}

pub async fn download_attachment(
    request: HttpRequest,
    project_id: SafeProjectIdI64,
) -> ActixResult<HttpResponse> {
    FACULTY_SERVICE
        .download_attachment(&request, project_id.0)
        .await
}

// 配置路由
pub fn configure_project_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/projects")
            .wrap(middlewares::RequireJWT)
            .wrap(middleware::Compress::default())
            .service(
                web::scope("")
                    .wrap(middlewares::RequireGroup::new(GroupName::Faculty))
                    .route("/{id}/attachment", web::get().to(download_attachment))
                    .route("/{id}/generate_report", web::get().to(generate_report)),
            ),
    );
}
