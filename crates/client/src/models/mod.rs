//! Typed resource models mirroring the backend's response schemas.
//!
//! All monetary amounts travel as strings on the wire and map to
//! [`rust_decimal::Decimal`]; dates are `chrono` types. Optional embedded
//! collections (a loan's disbursements, a client's loans) are only present
//! on detail endpoints.

pub mod alert;
pub mod client;
pub mod disbursement;
pub mod loan;
pub mod reports;
pub mod user;

pub use alert::{Alert, AlertsSummary};
pub use client::{Client, ClientWithLoans};
pub use disbursement::Disbursement;
pub use loan::{Loan, LoanWithDetails};
pub use reports::DashboardStats;
pub use user::{LoginResponse, User};
