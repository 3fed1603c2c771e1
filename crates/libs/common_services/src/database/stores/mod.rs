pub mod machine_store;
pub mod payment_method_store;
pub mod photo_store;
pub mod product_store;
pub mod review_store;
pub mod session_store;
pub mod user_store;
