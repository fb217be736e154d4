mod get;
mod list;
mod service;

pub use list::ListScenariosQuery;
pub use service::ScenarioQueryService;
