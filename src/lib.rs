pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod scryfall;
pub mod sync;
