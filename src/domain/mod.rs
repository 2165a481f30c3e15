//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{DateRange, GenerateReport, ReportDate};
pub use response::{AccountUser, RateCenterEntry, ReportEntry, SipCredentials};
pub use validation::ValidationError;
pub use value::{
    ApiKey, AreaCode, CcvCode, ErrorCode, PhoneNumber, RateCenterName, RawPhoneNumber,
    RefillAmount, ReportFilename, StateCode,
};
