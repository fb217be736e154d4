// src/infrastructure/media/mod.rs
mod local_store;

pub use local_store::LocalMediaStore;
