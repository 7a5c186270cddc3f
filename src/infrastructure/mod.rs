//! Infrastructure layer - token signing, crypto primitives, storage, logging

pub mod auth;
pub mod crypto;
pub mod logging;
pub mod user;
