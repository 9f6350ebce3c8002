pub mod card;
pub mod collector_number;
pub mod set;
pub mod variant;
