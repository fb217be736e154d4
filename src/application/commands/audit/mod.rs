mod clear;
mod record;
mod service;

pub use service::AuditCommandService;
