use crate::api_state::ApiContext;
use crate::uploads::handlers::{
    delete_photo_handler, upload_gallery_handler, upload_logo_handler,
    upload_product_photo_handler,
};
use app_state::UploadSettings;
use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    routing::{delete, post},
};

pub fn uploads_protected_router(uploads: &UploadSettings) -> Router<ApiContext> {
    // Multipart framing adds some overhead on top of the file itself; the
    // exact size check happens in the upload service.
    let body_limit = DefaultBodyLimit::max(uploads.max_upload_bytes + 64 * 1024);

    Router::new()
        .route("/upload/logo/{machine_id}", post(upload_logo_handler))
        .route("/upload/gallery/{machine_id}", post(upload_gallery_handler))
        .route(
            "/upload/product/{product_id}",
            post(upload_product_photo_handler),
        )
        .route("/photos/{photo_id}", delete(delete_photo_handler))
        .layer(body_limit)
}
