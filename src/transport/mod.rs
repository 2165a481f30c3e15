//! Transport layer: SOAP envelopes and wire-format details
//! (serialization/deserialization).

mod account;
mod envelope;
mod inventory;
mod report;
pub mod wsdl;

pub use account::{
    GET_BALANCE, GET_CREDENTIALS, GET_FLEX_RATE, GET_USER, REFILL_NOW, decode_get_balance,
    decode_get_credentials, decode_get_rate, decode_get_user, decode_refill, encode_get_balance,
    encode_get_credentials, encode_get_rate, encode_get_user, encode_refill,
};
pub use envelope::{Outcome, RemoteFailure, TransportError, build_envelope, soap_action};
pub use inventory::{
    GET_AVAILABLE_AREA_CODES, GET_AVAILABLE_NUMBERS, GET_AVAILABLE_RATE_CENTERS,
    GET_AVAILABLE_STATES, decode_get_area_codes, decode_get_numbers, decode_get_rate_centers,
    decode_get_states, encode_get_area_codes, encode_get_numbers, encode_get_rate_centers,
    encode_get_states,
};
pub use report::{
    GENERATE_REPORT, GET_GENERATED_REPORTS, decode_generate_report, decode_get_generated_reports,
    encode_generate_report, encode_get_generated_reports,
};
