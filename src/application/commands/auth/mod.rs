mod check;
mod login;
mod logout;
mod service;

pub use login::{LoginAdminCommand, LoginResult};
pub use service::AuthCommandService;
