pub mod provision;
pub mod reload;
