// src/domain/scenario/mod.rs
pub mod entity;
pub mod repository;

pub use entity::{NewScenario, Scenario, ScenarioChanges, ScenarioDetails, ScenarioId};
pub use repository::ScenarioRepository;
