pub mod audit;
pub mod auth;
pub mod scenarios;
pub mod users;

pub use audit::{AuditLogDto, AuditLogPage};
pub use auth::{AuthenticatedAdmin, SessionDto};
pub use scenarios::ScenarioDto;
pub use users::AdminUserDto;
