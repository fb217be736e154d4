pub mod audit;
pub mod client;
pub mod errors;
pub mod scenario;
pub mod user;
