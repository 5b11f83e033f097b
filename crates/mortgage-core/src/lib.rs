pub mod amortization;
pub mod calculation;
pub mod error;
pub mod payment;
pub mod terms;
pub mod types;

#[cfg(feature = "affordability")]
pub mod affordability;

#[cfg(feature = "rates")]
pub mod rates;

pub use error::MortgageError;
pub use types::*;

/// Standard result type for all mortgage-engine operations
pub type MortgageResult<T> = Result<T, MortgageError>;
