//! User infrastructure module
//!
//! This module provides the in-memory user store, password digests and the
//! user service behind login.

mod password;
mod repository;
mod service;

pub use password::{Md5PasswordHasher, PasswordHasher};
pub use repository::InMemoryUserRepository;
pub use service::{CreateUserRequest, UserService};
