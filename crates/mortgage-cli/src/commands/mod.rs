pub mod affordability;
pub mod mortgage;
pub mod rates;
