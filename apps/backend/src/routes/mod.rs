//! HTTP route handlers

pub mod attempts;
pub mod auth;
pub mod dictionaries;
pub mod rounds;
pub mod words;
