use super::envelope::{Outcome, SoapResult, TransportError, XmlNode};
use crate::domain::{AreaCode, RateCenterEntry, RateCenterName, StateCode};

pub const GET_AVAILABLE_AREA_CODES: &str = "GetAvailablePhoneNumberAreaCodes";
pub const GET_AVAILABLE_RATE_CENTERS: &str = "GetAvailablePhoneNumberRateCenters";
pub const GET_AVAILABLE_STATES: &str = "GetAvailablePhoneNumberStates";
pub const GET_AVAILABLE_NUMBERS: &str = "GetAvailablePhoneNumbers";

pub fn encode_get_area_codes(state: &StateCode) -> Vec<(&'static str, String)> {
    vec![(StateCode::FIELD, state.as_str().to_owned())]
}

pub fn decode_get_area_codes(body: &str) -> Result<Outcome<Vec<String>>, TransportError> {
    collect_item_field(GET_AVAILABLE_AREA_CODES, body, "areaCode")
}

pub fn encode_get_rate_centers(
    state: &StateCode,
    area_code: &AreaCode,
) -> Vec<(&'static str, String)> {
    vec![
        (StateCode::FIELD, state.as_str().to_owned()),
        (AreaCode::FIELD, area_code.as_str().to_owned()),
    ]
}

pub fn decode_get_rate_centers(
    body: &str,
) -> Result<Outcome<Vec<RateCenterEntry>>, TransportError> {
    let result = SoapResult::parse(GET_AVAILABLE_RATE_CENTERS, body)?;
    if let Some(failure) = result.failure() {
        return Ok(Outcome::Failure(failure));
    }
    let entries = result
        .items()
        .map(|item| {
            Ok(RateCenterEntry {
                rate_center: item.required_text(GET_AVAILABLE_RATE_CENTERS, "rateCenter")?,
                city: item.required_text(GET_AVAILABLE_RATE_CENTERS, "city")?,
            })
        })
        .collect::<Result<Vec<_>, TransportError>>()?;
    Ok(Outcome::Success(entries))
}

pub fn encode_get_states() -> Vec<(&'static str, String)> {
    Vec::new()
}

pub fn decode_get_states(body: &str) -> Result<Outcome<Vec<String>>, TransportError> {
    collect_item_field(GET_AVAILABLE_STATES, body, "state")
}

pub fn encode_get_numbers(
    state: &StateCode,
    area_code: &AreaCode,
    rate_center: &RateCenterName,
) -> Vec<(&'static str, String)> {
    vec![
        (StateCode::FIELD, state.as_str().to_owned()),
        (AreaCode::FIELD, area_code.as_str().to_owned()),
        (RateCenterName::FIELD, rate_center.as_str().to_owned()),
    ]
}

pub fn decode_get_numbers(body: &str) -> Result<Outcome<Vec<String>>, TransportError> {
    collect_item_field(GET_AVAILABLE_NUMBERS, body, "phoneNumber")
}

/// Flatten repeated single-field items into a list, exactly one value per
/// item record.
fn collect_item_field(
    operation: &'static str,
    body: &str,
    field: &'static str,
) -> Result<Outcome<Vec<String>>, TransportError> {
    let result = SoapResult::parse(operation, body)?;
    if let Some(failure) = result.failure() {
        return Ok(Outcome::Failure(failure));
    }
    let values = result
        .items()
        .map(|item: &XmlNode| item.required_text(operation, field))
        .collect::<Result<Vec<_>, TransportError>>()?;
    Ok(Outcome::Success(values))
}
