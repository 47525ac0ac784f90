pub mod calc;
pub mod input;

// Flat public surface for domain types and functions.
pub use calc::{calculate, CalculationResult, OTHER_EXPENSES_PERCENT};
#[allow(unused_imports)]
pub use input::{BatchInput, CalcError, CalculationInput, CalculationRecord, SalePrice};
