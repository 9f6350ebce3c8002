pub mod cards;
pub mod overrides;
pub mod resolver;
pub mod sets;
pub mod upsert;
