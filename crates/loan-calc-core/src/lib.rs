pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "loan")]
pub mod loan;

pub use error::LoanCalcError;
pub use types::*;

#[cfg(feature = "loan")]
pub use loan::amortized::compute_amortized_payment;
#[cfg(feature = "loan")]
pub use loan::interest_only::compute_interest_only_payment;

/// Standard result type for all loan-calc operations
pub type LoanCalcResult<T> = Result<T, LoanCalcError>;
