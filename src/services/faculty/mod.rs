pub mod attachment;
pub mod dashboard;
pub mod review;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::projects::requests::{ProjectListParams, ReviewProjectRequest};
use crate::storage::Storage;

pub struct FacultyService {
    storage: Option<Arc<dyn Storage>>,
}

impl FacultyService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 教师工作台：全量项目列表（最新提交在前，不按教师过滤）
    pub async fn dashboard(
        &self,
        request: &HttpRequest,
        params: ProjectListParams,
    ) -> ActixResult<HttpResponse> {
        dashboard::handle_dashboard(self, request, params).await
    }

    // 评审决定：绑定评审教师，首次离开 pending 时写入 reviewed_at
    pub async fn review_project(
        &self,
        request: &HttpRequest,
        review_request: ReviewProjectRequest,
    ) -> ActixResult<HttpResponse> {
        review::handle_review(self, request, review_request).await
    }

    // 下载项目附件
    pub async fn download_attachment(
        &self,
        request: &HttpRequest,
        project_id: i64,
    ) -> ActixResult<HttpResponse> {
        attachment::handle_download(self, request, project_id).await
    }
}
