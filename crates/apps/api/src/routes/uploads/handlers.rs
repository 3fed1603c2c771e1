//! Multipart upload handlers for machine logos and gallery media.

use crate::api_state::ApiContext;
use axum::body::Bytes;
use axum::http::StatusCode;
use axum::{
    Extension, Json,
    extract::{Multipart, Path, State},
};
use common_services::api::uploads::error::UploadError;
use common_services::api::uploads::service::{
    delete_photo, store_gallery_media, store_logo, store_product_photo,
};
use common_services::database::app_user::User;
use common_services::database::machine::VendingMachine;
use common_services::database::photo::Photo;
use common_services::database::product::Product;
use tracing::instrument;

/// Pulls the `file` part (and an optional `caption` part) out of a multipart
/// body.
async fn read_upload(
    multipart: &mut Multipart,
) -> Result<(String, Bytes, Option<String>), UploadError> {
    let mut file: Option<(String, Bytes)> = None;
    let mut caption: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::BadRequest(e.to_string()))?
    {
        let name = field.name().map(ToOwned::to_owned);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().map(ToOwned::to_owned).ok_or_else(|| {
                    UploadError::BadRequest("file part has no filename".to_string())
                })?;
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| UploadError::BadRequest(e.to_string()))?;
                file = Some((filename, data));
            }
            Some("caption") => {
                caption = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| UploadError::BadRequest(e.to_string()))?,
                );
            }
            _ => {}
        }
    }

    let (filename, data) =
        file.ok_or_else(|| UploadError::BadRequest("missing file part".to_string()))?;
    Ok((filename, data, caption))
}

/// Replaces a machine's logo. Expects a multipart body with a `file` part.
#[utoipa::path(
    post,
    path = "/upload/logo/{machine_id}",
    tag = "Uploads",
    params(("machine_id" = i32, Path, description = "Machine id")),
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Logo stored", body = VendingMachine),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Machine not found"),
        (status = 413, description = "File too large"),
        (status = 415, description = "Not an accepted image type"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user, multipart), err(Debug))]
pub async fn upload_logo_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(machine_id): Path<i32>,
    mut multipart: Multipart,
) -> Result<Json<VendingMachine>, UploadError> {
    let (filename, data, _caption) = read_upload(&mut multipart).await?;
    let machine = store_logo(
        &context.pool,
        &context.settings.uploads,
        &user,
        machine_id,
        &filename,
        &data,
    )
    .await?;
    Ok(Json(machine))
}

/// Replaces a catalog product's photo. Expects a multipart body with a `file`
/// part.
#[utoipa::path(
    post,
    path = "/upload/product/{product_id}",
    tag = "Uploads",
    params(("product_id" = i32, Path, description = "Product id")),
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Photo stored", body = Product),
        (status = 404, description = "Product not found"),
        (status = 413, description = "File too large"),
        (status = 415, description = "Not an accepted image type"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user, multipart), err(Debug))]
pub async fn upload_product_photo_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(product_id): Path<i32>,
    mut multipart: Multipart,
) -> Result<Json<Product>, UploadError> {
    let (filename, data, _caption) = read_upload(&mut multipart).await?;
    let product = store_product_photo(
        &context.pool,
        &context.settings.uploads,
        &user,
        product_id,
        &filename,
        &data,
    )
    .await?;
    Ok(Json(product))
}

/// Adds a photo or video to a machine's gallery. Expects a multipart body
/// with a `file` part and an optional `caption` part.
#[utoipa::path(
    post,
    path = "/upload/gallery/{machine_id}",
    tag = "Uploads",
    params(("machine_id" = i32, Path, description = "Machine id")),
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Media stored", body = Photo),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Machine not found"),
        (status = 413, description = "File too large"),
        (status = 415, description = "Not an accepted media type"),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context, user, multipart), err(Debug))]
pub async fn upload_gallery_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(machine_id): Path<i32>,
    mut multipart: Multipart,
) -> Result<Json<Photo>, UploadError> {
    let (filename, data, caption) = read_upload(&mut multipart).await?;
    let photo = store_gallery_media(
        &context.pool,
        &context.settings.uploads,
        &user,
        machine_id,
        &filename,
        caption,
        &data,
    )
    .await?;
    Ok(Json(photo))
}

#[utoipa::path(
    delete,
    path = "/photos/{photo_id}",
    tag = "Uploads",
    params(("photo_id" = i32, Path, description = "Photo id")),
    responses(
        (status = 204, description = "Photo deleted"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Photo not found"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_photo_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(photo_id): Path<i32>,
) -> Result<StatusCode, UploadError> {
    delete_photo(&context.pool, &context.settings.uploads, &user, photo_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
