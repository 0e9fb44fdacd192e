//! Feature modules (state, reducer pieces and views per concern).

pub mod auth;
pub mod navbar;
pub mod pages;
