// src/domain/user/mod.rs
pub mod entity;
pub mod repository;
pub mod value_objects;

pub use entity::{AdminUser, NewAdminUser};
pub use repository::AdminUserRepository;
pub use value_objects::{Email, PasswordHash, UserId};
