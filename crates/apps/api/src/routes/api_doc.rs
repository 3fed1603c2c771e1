use crate::routes::{admin, auth, machines, payment_methods, products, reviews, root, uploads};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        root::handlers::root,
        root::handlers::health_check,
        // Auth handlers
        auth::handlers::login,
        auth::handlers::register,
        auth::handlers::logout,
        auth::handlers::get_me,
        // Machine handlers
        machines::handlers::list_machines_handler,
        machines::handlers::get_machine_handler,
        machines::handlers::create_machine_handler,
        machines::handlers::update_machine_handler,
        machines::handlers::delete_machine_handler,
        machines::handlers::set_machine_products_handler,
        machines::handlers::set_machine_payment_methods_handler,
        // Product handlers
        products::handlers::list_products_handler,
        products::handlers::get_product_handler,
        products::handlers::create_product_handler,
        products::handlers::update_product_handler,
        products::handlers::delete_product_handler,
        // Payment method handlers
        payment_methods::handlers::list_payment_methods_handler,
        // Review handlers
        reviews::handlers::create_review_handler,
        reviews::handlers::list_machine_reviews_handler,
        // Upload handlers
        uploads::handlers::upload_logo_handler,
        uploads::handlers::upload_gallery_handler,
        uploads::handlers::upload_product_photo_handler,
        uploads::handlers::delete_photo_handler,
        // Admin handlers
        admin::handlers::list_users_handler,
        admin::handlers::deactivate_user_handler,
        admin::handlers::list_pending_reviews_handler,
        admin::handlers::approve_review_handler,
        admin::handlers::delete_review_handler,
    ),
    components(
        schemas(
        ),
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Machines", description = "Vending machine listing and management"),
        (name = "Products", description = "The shared product catalog"),
        (name = "Payment Methods", description = "The fixed payment method catalog"),
        (name = "Reviews", description = "Customer reviews and moderation"),
        (name = "Uploads", description = "Machine logo and gallery media uploads"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Admin", description = "Account and review moderation"),
        (name = "System", description = "Health check"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
