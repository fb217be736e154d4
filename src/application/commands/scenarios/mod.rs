mod archive;
mod create;
mod delete;
mod service;
mod update;

pub use archive::{MAX_ARCHIVE_BYTES, UploadedArchive};
pub use create::CreateScenarioCommand;
pub use delete::DeleteScenarioCommand;
pub use service::ScenarioCommandService;
pub use update::UpdateScenarioCommand;
