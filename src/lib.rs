//! Typed Rust client for the VoicePulse Connect! SOAP API.
//!
//! The crate is split into a domain layer of strong types, a transport layer
//! for the SOAP wire format, and a small client layer orchestrating requests.
//! Every operation is a one-shot request/response exchange; remote failures
//! come back as [`VoicePulseError::Api`] instead of error strings in the
//! success channel.
//!
//! ```rust,no_run
//! use voicepulse::{ApiKey, VoicePulseClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), voicepulse::VoicePulseError> {
//!     let client = VoicePulseClient::connect(ApiKey::new("...")?).await?;
//!     let balance = client.get_balance().await?;
//!     println!("balance: {balance}");
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{VoicePulseClient, VoicePulseClientBuilder, VoicePulseError};
pub use domain::{
    AccountUser, ApiKey, AreaCode, CcvCode, DateRange, ErrorCode, GenerateReport, PhoneNumber,
    RateCenterEntry, RateCenterName, RawPhoneNumber, RefillAmount, ReportDate, ReportEntry,
    ReportFilename, SipCredentials, StateCode, ValidationError,
};
