use crate::api::machines::error::MachinesError;
use crate::api::machines::interfaces::{
    CreateMachineRequest, MachineDetailsResponse, SetPaymentMethodsRequest, SetProductsRequest,
    UpdateMachineRequest,
};
use crate::api::uploads::service::remove_media_file;
use crate::database::app_user::{User, UserRole};
use crate::database::machine::VendingMachine;
use crate::database::machine_store::MachineStore;
use crate::database::photo_store::PhotoStore;
use crate::database::review_store::ReviewStore;
use app_state::UploadSettings;
use sqlx::PgPool;
use tracing::{info, instrument};

/// The owner-or-admin gate: admins short-circuit, owners must match the
/// machine's owner id. Unknown machines read as not-found.
pub async fn ensure_owner_or_admin(
    pool: &PgPool,
    user: &User,
    machine_id: i32,
) -> Result<(), MachinesError> {
    if user.role == UserRole::Admin {
        return Ok(());
    }
    let owner_id = MachineStore::get_owner_id(pool, machine_id)
        .await?
        .ok_or(MachinesError::NotFound(machine_id))?;
    if owner_id != user.id {
        return Err(MachinesError::Forbidden(
            "only the machine owner or an admin may do this".to_string(),
        ));
    }
    Ok(())
}

fn validate_coordinates(latitude: Option<f64>, longitude: Option<f64>) -> Result<(), MachinesError> {
    if let Some(lat) = latitude
        && !(-90.0..=90.0).contains(&lat)
    {
        return Err(MachinesError::BadRequest(format!(
            "latitude out of range: {lat}"
        )));
    }
    if let Some(lon) = longitude
        && !(-180.0..=180.0).contains(&lon)
    {
        return Err(MachinesError::BadRequest(format!(
            "longitude out of range: {lon}"
        )));
    }
    Ok(())
}

#[instrument(skip(pool))]
pub async fn create_machine(
    pool: &PgPool,
    owner_id: i32,
    payload: CreateMachineRequest,
) -> Result<VendingMachine, MachinesError> {
    if payload.name.trim().is_empty() {
        return Err(MachinesError::BadRequest("name must not be empty".into()));
    }
    if payload.location.trim().is_empty() {
        return Err(MachinesError::BadRequest(
            "location must not be empty".into(),
        ));
    }
    validate_coordinates(payload.latitude, payload.longitude)?;

    let machine = MachineStore::create(
        pool,
        owner_id,
        payload.name.trim(),
        payload.location.trim(),
        payload.description,
        payload.latitude,
        payload.longitude,
    )
    .await?;
    info!("Created machine {} ({})", machine.id, machine.name);
    Ok(machine)
}

#[instrument(skip(pool, user))]
pub async fn update_machine(
    pool: &PgPool,
    user: &User,
    machine_id: i32,
    payload: UpdateMachineRequest,
) -> Result<VendingMachine, MachinesError> {
    ensure_owner_or_admin(pool, user, machine_id).await?;
    validate_coordinates(payload.latitude, payload.longitude)?;

    let machine = MachineStore::update(
        pool,
        machine_id,
        payload.name,
        payload.location,
        payload.description,
        payload.latitude,
        payload.longitude,
        payload.is_active,
    )
    .await
    .map_err(|err| match err {
        crate::database::DbError::Sqlx(sqlx::Error::RowNotFound) => {
            MachinesError::NotFound(machine_id)
        }
        other => other.into(),
    })?;
    Ok(machine)
}

/// Deletes a machine and everything hanging off it. Gallery files are removed
/// best-effort after the rows are gone.
#[instrument(skip(pool, user, uploads))]
pub async fn delete_machine(
    pool: &PgPool,
    uploads: &UploadSettings,
    user: &User,
    machine_id: i32,
) -> Result<(), MachinesError> {
    ensure_owner_or_admin(pool, user, machine_id).await?;

    let photos = PhotoStore::list_by_machine(pool, machine_id).await?;
    let result = MachineStore::delete(pool, machine_id).await?;
    if result.rows_affected() == 0 {
        return Err(MachinesError::NotFound(machine_id));
    }

    for photo in photos {
        remove_media_file(uploads, &photo.url).await;
    }
    info!("Deleted machine {}", machine_id);
    Ok(())
}

/// Fetches the full public detail view of a machine. Unapproved reviews are
/// only included for the owner and admins.
#[instrument(skip(pool, caller))]
pub async fn get_machine_details(
    pool: &PgPool,
    machine_id: i32,
    caller: Option<&User>,
) -> Result<MachineDetailsResponse, MachinesError> {
    let machine = MachineStore::find_by_id(pool, machine_id)
        .await?
        .ok_or(MachinesError::NotFound(machine_id))?;

    let privileged = caller.is_some_and(|user| {
        user.role == UserRole::Admin || user.id == machine.owner_id
    });

    let (products_res, payment_methods_res, photos_res, reviews_res) = tokio::join!(
        MachineStore::list_products(pool, machine_id),
        MachineStore::list_payment_methods(pool, machine_id),
        PhotoStore::list_by_machine(pool, machine_id),
        ReviewStore::list_by_machine(pool, machine_id, !privileged),
    );

    Ok(MachineDetailsResponse {
        machine,
        products: products_res?,
        payment_methods: payment_methods_res?,
        photos: photos_res?,
        reviews: reviews_res?,
    })
}

/// Replaces a machine's product set in one transaction so a failed update
/// never leaves a half-written list.
#[instrument(skip(pool, user, payload))]
pub async fn set_machine_products(
    pool: &PgPool,
    user: &User,
    machine_id: i32,
    payload: SetProductsRequest,
) -> Result<(), MachinesError> {
    ensure_owner_or_admin(pool, user, machine_id).await?;
    for entry in &payload.products {
        if entry.price_cents_override.is_some_and(|cents| cents < 0) {
            return Err(MachinesError::BadRequest(format!(
                "negative price override for product {}",
                entry.product_id
            )));
        }
    }

    let mut tx = pool.begin().await?;
    MachineStore::clear_products(&mut *tx, machine_id).await?;
    for entry in &payload.products {
        MachineStore::add_product(
            &mut *tx,
            machine_id,
            entry.product_id,
            entry.price_cents_override,
            entry.is_available,
        )
        .await
        .map_err(|err| match err {
            // A broken FK means the client sent a product id that doesn't exist.
            crate::database::DbError::Sqlx(sqlx::Error::Database(db_err))
                if db_err.is_foreign_key_violation() =>
            {
                MachinesError::BadRequest(format!("unknown product id {}", entry.product_id))
            }
            other => other.into(),
        })?;
    }
    tx.commit().await?;
    Ok(())
}

/// Same contract as [`set_machine_products`] but for the payment method set.
#[instrument(skip(pool, user, payload))]
pub async fn set_machine_payment_methods(
    pool: &PgPool,
    user: &User,
    machine_id: i32,
    payload: SetPaymentMethodsRequest,
) -> Result<(), MachinesError> {
    ensure_owner_or_admin(pool, user, machine_id).await?;

    let mut tx = pool.begin().await?;
    MachineStore::clear_payment_methods(&mut *tx, machine_id).await?;
    for entry in &payload.payment_methods {
        MachineStore::add_payment_method(
            &mut *tx,
            machine_id,
            entry.payment_method_id,
            entry.is_available,
        )
        .await
        .map_err(|err| match err {
            crate::database::DbError::Sqlx(sqlx::Error::Database(db_err))
                if db_err.is_foreign_key_violation() =>
            {
                MachinesError::BadRequest(format!(
                    "unknown payment method id {}",
                    entry.payment_method_id
                ))
            }
            other => other.into(),
        })?;
    }
    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_validation() {
        assert!(validate_coordinates(None, None).is_ok());
        assert!(validate_coordinates(Some(51.05), Some(13.74)).is_ok());
        assert!(validate_coordinates(Some(90.0), Some(-180.0)).is_ok());
        assert!(validate_coordinates(Some(90.1), None).is_err());
        assert!(validate_coordinates(None, Some(180.5)).is_err());
    }
}
