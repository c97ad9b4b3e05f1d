//! Web surface of the application.
//! Contains the handlers for the upload form, the shared state and the router.
pub mod handlers;
pub mod models;
pub mod router;
