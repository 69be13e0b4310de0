//! HTTP API module for the payroll engine.
//!
//! This module exposes the gross-to-net calculation over REST: a JSON
//! result, a plain-text payslip and the list of configured tax years.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AllowancesRequest, PayrollRequest, PeriodRequest, SpecialPaymentRequest, TaxCreditsRequest,
};
pub use response::{ApiError, ApiErrorResponse, TaxYearsResponse};
pub use state::AppState;
