mod list;
mod service;

pub use list::ListAuditLogsQuery;
pub use service::AuditQueryService;
