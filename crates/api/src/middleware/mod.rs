//! Request middleware: authentication extraction and error-body stamping.

pub mod auth;
pub mod error_body;
