use axum::{
    extract::State,
    http::{StatusCode, Uri},
    Json,
};

use crate::{
    errors::AppError, models::view_model::ViewResponse, services::view_service::ViewService,
    utils::path::view_key, AppState,
};

pub struct ViewHandler;

impl ViewHandler {
    fn create_service(state: &AppState) -> ViewService {
        ViewService::new(state.store.clone())
    }

    pub async fn get_views(
        State(state): State<AppState>,
        uri: Uri,
    ) -> Result<(StatusCode, Json<ViewResponse>), AppError> {
        let path = view_key(uri.path());

        let service = Self::create_service(&state);
        let views = service.get_views(&path).await?;

        Ok((StatusCode::OK, Json(views)))
    }

    pub async fn record_view(
        State(state): State<AppState>,
        uri: Uri,
    ) -> Result<(StatusCode, Json<ViewResponse>), AppError> {
        let path = view_key(uri.path());

        let service = Self::create_service(&state);
        let views = service.record_view(&path).await?;

        Ok((StatusCode::OK, Json(views)))
    }

    pub async fn method_not_allowed() -> AppError {
        AppError::MethodNotAllowed
    }
}
