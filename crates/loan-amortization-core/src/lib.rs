pub mod amortization;
pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "investment")]
pub mod investment;

#[cfg(feature = "goal_seek")]
pub mod goal_seek;

#[cfg(feature = "analysis")]
pub mod analysis;

pub use error::LoanError;
pub use types::*;

/// Standard result type for all loan-amortization operations
pub type LoanResult<T> = Result<T, LoanError>;
