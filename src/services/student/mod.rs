pub mod dashboard;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::projects::requests::ProjectListParams;
use crate::storage::Storage;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
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

    // 学生工作台：本人项目列表（最新提交在前）
    pub async fn dashboard(
        &self,
        request: &HttpRequest,
        params: ProjectListParams,
    ) -> ActixResult<HttpResponse> {
        dashboard::handle_dashboard(self, request, params).await
    }

    // 提交新项目（multipart：文本字段 + 可选附件）
    pub async fn submit_project(
        &self,
        request: &HttpRequest,
        payload: actix_multipart::Multipart,
    ) -> ActixResult<HttpResponse> {
        submit::handle_submit(self, request, payload).await
    }
}
