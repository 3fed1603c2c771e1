pub mod app_user;
pub mod machine;
pub mod payment_method;
pub mod photo;
pub mod product;
pub mod review;
pub mod session;
