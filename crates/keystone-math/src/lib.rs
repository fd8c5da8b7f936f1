//! # Keystone Math
//!
//! Lending-formula primitives for the Keystone investment calculator.
//!
//! This crate provides:
//!
//! - **Amortization**: Fixed-installment payment, interest accrued and
//!   remaining balance over a horizon
//! - **Loan legs**: An asset financed on given terms, evaluated at the
//!   month of sale
//!
//! Everything here is a pure function of its arguments.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::float_cmp)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]

pub mod amortization;
pub mod leg;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::amortization::{
        accrue, installment_payment, interest_accrued, remaining_balance, Accrual, MonthlyRate,
    };
    pub use crate::leg::{LegFigures, LoanLeg};
}

pub use amortization::{
    accrue, installment_payment, interest_accrued, remaining_balance, Accrual, MonthlyRate,
};
pub use leg::{LegFigures, LoanLeg};
