pub mod auth_handlers;
pub mod contact_handlers;
pub mod jwt;
pub mod translation_handlers;
pub mod user_handlers;
