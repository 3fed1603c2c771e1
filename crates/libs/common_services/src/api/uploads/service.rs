use crate::api::uploads::error::UploadError;
use crate::database::app_user::{User, UserRole};
use crate::database::machine::VendingMachine;
use crate::database::machine_store::MachineStore;
use crate::database::photo::{MediaType, Photo};
use crate::database::photo_store::PhotoStore;
use crate::database::product::Product;
use crate::database::product_store::ProductStore;
use crate::nice_id;
use app_state::UploadSettings;
use sqlx::PgPool;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

const FILE_ID_LENGTH: usize = 20;

async fn ensure_owner_or_admin(
    pool: &PgPool,
    user: &User,
    machine_id: i32,
) -> Result<(), UploadError> {
    if user.role == UserRole::Admin {
        return Ok(());
    }
    let owner_id = MachineStore::get_owner_id(pool, machine_id)
        .await?
        .ok_or(UploadError::MachineNotFound(machine_id))?;
    if owner_id != user.id {
        return Err(UploadError::Forbidden(
            "only the machine owner or an admin may manage its media".to_string(),
        ));
    }
    Ok(())
}

fn check_size(uploads: &UploadSettings, size: usize) -> Result<(), UploadError> {
    let max = uploads.max_upload_bytes;
    if size > max {
        return Err(UploadError::TooLarge { size, max });
    }
    Ok(())
}

/// Lowercased extension of the client-supplied filename, if any.
fn file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

/// Maps a stored `/media/<name>` url back to its path under the media folder.
/// Anything that doesn't look like one of our urls yields `None`.
fn media_url_to_path(uploads: &UploadSettings, url: &str) -> Option<PathBuf> {
    let name = url.strip_prefix("/media/")?;
    if name.is_empty() || name.contains('/') || name.contains("..") {
        return None;
    }
    Some(uploads.media_folder.join(name))
}

/// Writes an upload to the media folder under a fresh random name and returns
/// the public url it will be served from.
async fn write_media_file(
    uploads: &UploadSettings,
    extension: &str,
    data: &[u8],
) -> Result<String, UploadError> {
    tokio::fs::create_dir_all(&uploads.media_folder).await?;
    let stored_name = format!("{}.{extension}", nice_id(FILE_ID_LENGTH));
    let path = uploads.media_folder.join(&stored_name);
    tokio::fs::write(&path, data).await?;
    Ok(format!("/media/{stored_name}"))
}

/// Best-effort removal of a stored media file. The database row is already
/// gone by the time this runs, so failures are only logged.
pub async fn remove_media_file(uploads: &UploadSettings, url: &str) {
    let Some(path) = media_url_to_path(uploads, url) else {
        warn!("Not removing unrecognized media url: {}", url);
        return;
    };
    if let Err(e) = tokio::fs::remove_file(&path).await {
        warn!("Could not remove media file {:?}: {}", path, e);
    }
}

/// Stores a new logo image for a machine and replaces the previous one.
#[instrument(skip(pool, uploads, user, data))]
pub async fn store_logo(
    pool: &PgPool,
    uploads: &UploadSettings,
    user: &User,
    machine_id: i32,
    filename: &str,
    data: &[u8],
) -> Result<VendingMachine, UploadError> {
    ensure_owner_or_admin(pool, user, machine_id).await?;
    check_size(uploads, data.len())?;
    if !uploads.is_photo_file(Path::new(filename)) {
        return Err(UploadError::UnsupportedMediaType(filename.to_string()));
    }
    let extension = file_extension(filename)
        .ok_or_else(|| UploadError::BadRequest("filename has no extension".to_string()))?;

    let machine = MachineStore::find_by_id(pool, machine_id)
        .await?
        .ok_or(UploadError::MachineNotFound(machine_id))?;

    let url = write_media_file(uploads, &extension, data).await?;
    MachineStore::set_logo_url(pool, machine_id, &url).await?;
    if let Some(old_url) = &machine.logo_url {
        remove_media_file(uploads, old_url).await;
    }

    let updated = MachineStore::find_by_id(pool, machine_id)
        .await?
        .ok_or(UploadError::MachineNotFound(machine_id))?;
    info!("Stored new logo for machine {}: {}", machine_id, url);
    Ok(updated)
}

/// Stores a new catalog photo for a product and replaces the previous one.
/// The catalog is shared, so any authenticated user may set it.
#[instrument(skip(pool, uploads, user, data))]
pub async fn store_product_photo(
    pool: &PgPool,
    uploads: &UploadSettings,
    user: &User,
    product_id: i32,
    filename: &str,
    data: &[u8],
) -> Result<Product, UploadError> {
    check_size(uploads, data.len())?;
    if !uploads.is_photo_file(Path::new(filename)) {
        return Err(UploadError::UnsupportedMediaType(filename.to_string()));
    }
    let extension = file_extension(filename)
        .ok_or_else(|| UploadError::BadRequest("filename has no extension".to_string()))?;

    let product = ProductStore::find_by_id(pool, product_id)
        .await?
        .ok_or(UploadError::ProductNotFound(product_id))?;

    let url = write_media_file(uploads, &extension, data).await?;
    ProductStore::set_photo_url(pool, product_id, &url).await?;
    if let Some(old_url) = &product.photo_url {
        remove_media_file(uploads, old_url).await;
    }

    let updated = ProductStore::find_by_id(pool, product_id)
        .await?
        .ok_or(UploadError::ProductNotFound(product_id))?;
    info!(
        "User {} stored a new photo for product {}: {}",
        user.id, product_id, url
    );
    Ok(updated)
}

/// Stores a gallery photo or video for a machine.
#[instrument(skip(pool, uploads, user, data))]
pub async fn store_gallery_media(
    pool: &PgPool,
    uploads: &UploadSettings,
    user: &User,
    machine_id: i32,
    filename: &str,
    caption: Option<String>,
    data: &[u8],
) -> Result<Photo, UploadError> {
    ensure_owner_or_admin(pool, user, machine_id).await?;
    check_size(uploads, data.len())?;

    let media_type = if uploads.is_photo_file(Path::new(filename)) {
        MediaType::Image
    } else if uploads.is_video_file(Path::new(filename)) {
        MediaType::Video
    } else {
        return Err(UploadError::UnsupportedMediaType(filename.to_string()));
    };
    let extension = file_extension(filename)
        .ok_or_else(|| UploadError::BadRequest("filename has no extension".to_string()))?;

    if MachineStore::find_by_id(pool, machine_id).await?.is_none() {
        return Err(UploadError::MachineNotFound(machine_id));
    }

    let url = write_media_file(uploads, &extension, data).await?;
    let photo = PhotoStore::create(
        pool,
        machine_id,
        &url,
        caption.filter(|c| !c.trim().is_empty()),
        media_type,
        filename,
        data.len() as i64,
    )
    .await?;
    info!(
        "Stored gallery {:?} {} for machine {}",
        photo.media_type, photo.id, machine_id
    );
    Ok(photo)
}

/// Removes a gallery entry and its file. Only the machine owner or an admin
/// may do this.
#[instrument(skip(pool, uploads, user))]
pub async fn delete_photo(
    pool: &PgPool,
    uploads: &UploadSettings,
    user: &User,
    photo_id: i32,
) -> Result<(), UploadError> {
    let photo = PhotoStore::find_by_id(pool, photo_id)
        .await?
        .ok_or(UploadError::PhotoNotFound(photo_id))?;
    ensure_owner_or_admin(pool, user, photo.machine_id).await?;

    let rows = PhotoStore::delete(pool, photo_id).await?;
    if rows == 0 {
        return Err(UploadError::PhotoNotFound(photo_id));
    }
    remove_media_file(uploads, &photo.url).await;
    info!("Deleted photo {}", photo_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_uploads() -> UploadSettings {
        UploadSettings {
            media_folder: PathBuf::from("/srv/media"),
            max_upload_bytes: 100,
            photo_extensions: vec!["jpg".to_owned()],
            video_extensions: vec!["mp4".to_owned()],
        }
    }

    #[test]
    fn media_urls_map_into_the_media_folder() {
        let uploads = test_uploads();
        assert_eq!(
            media_url_to_path(&uploads, "/media/abc123.jpg"),
            Some(PathBuf::from("/srv/media/abc123.jpg"))
        );
        assert_eq!(media_url_to_path(&uploads, "/media/"), None);
        assert_eq!(media_url_to_path(&uploads, "/media/../etc/passwd"), None);
        assert_eq!(media_url_to_path(&uploads, "https://elsewhere/x.jpg"), None);
    }

    #[test]
    fn size_limit_is_enforced() {
        let uploads = test_uploads();
        assert!(check_size(&uploads, 100).is_ok());
        assert!(check_size(&uploads, 101).is_err());
    }

    #[test]
    fn extensions_are_lowercased() {
        assert_eq!(file_extension("Logo.JPG"), Some("jpg".to_string()));
        assert_eq!(file_extension("noext"), None);
    }
}
