use super::envelope::{Outcome, SoapResult, TransportError, check_fault, parse_document};
use crate::domain::{AccountUser, CcvCode, RawPhoneNumber, RefillAmount, SipCredentials};

pub const GET_BALANCE: &str = "GetBalance";
pub const GET_FLEX_RATE: &str = "GetFlexRate";
pub const REFILL_NOW: &str = "RefillNow";
pub const GET_CREDENTIALS: &str = "GetCredentials";
pub const GET_USER: &str = "GetUser";

pub fn encode_get_balance() -> Vec<(&'static str, String)> {
    Vec::new()
}

pub fn decode_get_balance(body: &str) -> Result<Outcome<String>, TransportError> {
    let result = SoapResult::parse(GET_BALANCE, body)?;
    if let Some(failure) = result.failure() {
        return Ok(Outcome::Failure(failure));
    }
    let balance = result.required_text(GET_BALANCE, "balance")?;
    Ok(Outcome::Success(balance))
}

pub fn encode_get_rate(number: &RawPhoneNumber) -> Vec<(&'static str, String)> {
    vec![(RawPhoneNumber::FIELD, number.digits().to_owned())]
}

pub fn decode_get_rate(body: &str) -> Result<Outcome<String>, TransportError> {
    let result = SoapResult::parse(GET_FLEX_RATE, body)?;
    if let Some(failure) = result.failure() {
        return Ok(Outcome::Failure(failure));
    }
    let rate = result.required_text(GET_FLEX_RATE, "flexRate")?;
    Ok(Outcome::Success(rate))
}

pub fn encode_refill(code: &CcvCode, amount: &RefillAmount) -> Vec<(&'static str, String)> {
    vec![
        (CcvCode::FIELD, code.as_str().to_owned()),
        (RefillAmount::FIELD, amount.as_str().to_owned()),
    ]
}

/// `RefillNow` has no error-code envelope; the provider's result text is
/// passed through unnormalized.
pub fn decode_refill(body: &str) -> Result<String, TransportError> {
    let document = parse_document(body)?;
    check_fault(&document)?;
    let node = document
        .descendant("RefillNowResult")
        .ok_or(TransportError::MissingField {
            operation: REFILL_NOW,
            field: "Result",
        })?;
    let text = node
        .child("refillNow")
        .map(|refill| refill.text().to_owned())
        .unwrap_or_else(|| node.text().to_owned());
    Ok(text)
}

pub fn encode_get_credentials() -> Vec<(&'static str, String)> {
    Vec::new()
}

pub fn decode_get_credentials(body: &str) -> Result<Outcome<SipCredentials>, TransportError> {
    let result = SoapResult::parse(GET_CREDENTIALS, body)?;
    if let Some(failure) = result.failure() {
        return Ok(Outcome::Failure(failure));
    }
    let item = result.items().next().ok_or(TransportError::MissingField {
        operation: GET_CREDENTIALS,
        field: "items",
    })?;
    Ok(Outcome::Success(SipCredentials {
        login: item.required_text(GET_CREDENTIALS, "login")?,
        password: item.required_text(GET_CREDENTIALS, "password")?,
    }))
}

pub fn encode_get_user() -> Vec<(&'static str, String)> {
    Vec::new()
}

pub fn decode_get_user(body: &str) -> Result<Outcome<AccountUser>, TransportError> {
    let result = SoapResult::parse(GET_USER, body)?;
    if let Some(failure) = result.failure() {
        return Ok(Outcome::Failure(failure));
    }
    let item = result.items().next().ok_or(TransportError::MissingField {
        operation: GET_USER,
        field: "items",
    })?;
    Ok(Outcome::Success(AccountUser {
        username: item.required_text(GET_USER, "username")?,
        email: item.required_text(GET_USER, "email")?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_get_balance_keeps_wire_text() {
        let body = "<E><B><GetBalanceResponse><GetBalanceResult>\
                    <errorCode>0</errorCode>\
                    <balance>25.00</balance>\
                    </GetBalanceResult></GetBalanceResponse></B></E>";
        assert_eq!(
            decode_get_balance(body).unwrap(),
            Outcome::Success("25.00".to_owned())
        );
    }

    #[test]
    fn decode_get_balance_failure_keeps_message() {
        let body = "<E><B><GetBalanceResponse><GetBalanceResult>\
                    <errorCode>5</errorCode>\
                    <errorMessage>Invalid API Key</errorMessage>\
                    </GetBalanceResult></GetBalanceResponse></B></E>";
        match decode_get_balance(body).unwrap() {
            Outcome::Failure(failure) => assert_eq!(failure.message, "Invalid API Key"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn encode_get_rate_sends_bare_digits() {
        let number = RawPhoneNumber::new("12015551234").unwrap();
        assert_eq!(
            encode_get_rate(&number),
            vec![("PhoneNumber", "12015551234".to_owned())]
        );
    }

    #[test]
    fn decode_get_rate_extracts_flex_rate() {
        let body = "<E><B><GetFlexRateResponse><GetFlexRateResult>\
                    <errorCode>0</errorCode>\
                    <flexRate>0.0125</flexRate>\
                    </GetFlexRateResult></GetFlexRateResponse></B></E>";
        assert_eq!(
            decode_get_rate(body).unwrap(),
            Outcome::Success("0.0125".to_owned())
        );
    }

    #[test]
    fn decode_refill_passes_result_through() {
        let body = "<E><B><RefillNowResponse><RefillNowResult>\
                    <refillNow>Refill successful</refillNow>\
                    </RefillNowResult></RefillNowResponse></B></E>";
        assert_eq!(decode_refill(body).unwrap(), "Refill successful");
    }

    #[test]
    fn decode_refill_falls_back_to_result_text() {
        let body = "<E><B><RefillNowResponse>\
                    <RefillNowResult>Declined</RefillNowResult>\
                    </RefillNowResponse></B></E>";
        assert_eq!(decode_refill(body).unwrap(), "Declined");
    }

    #[test]
    fn decode_refill_requires_result_wrapper() {
        let err = decode_refill("<E><B/></E>").unwrap_err();
        assert!(matches!(
            err,
            TransportError::MissingField {
                operation: "RefillNow",
                field: "Result"
            }
        ));
    }

    #[test]
    fn decode_get_credentials_reads_single_item() {
        let body = "<E><B><GetCredentialsResponse><GetCredentialsResult>\
                    <errorCode>0</errorCode>\
                    <items><ApiResponseItem>\
                    <login>sip_user</login>\
                    <password>sip_pass</password>\
                    </ApiResponseItem></items>\
                    </GetCredentialsResult></GetCredentialsResponse></B></E>";
        assert_eq!(
            decode_get_credentials(body).unwrap(),
            Outcome::Success(SipCredentials {
                login: "sip_user".to_owned(),
                password: "sip_pass".to_owned(),
            })
        );
    }

    #[test]
    fn decode_get_credentials_failure_reads_own_error_message() {
        // The message must come from GetCredentialsResult, not any other
        // operation's result element.
        let body = "<E><B><GetCredentialsResponse><GetCredentialsResult>\
                    <errorCode>7</errorCode>\
                    <errorMessage>No credentials on file</errorMessage>\
                    </GetCredentialsResult></GetCredentialsResponse></B></E>";
        match decode_get_credentials(body).unwrap() {
            Outcome::Failure(failure) => {
                assert_eq!(failure.code.as_str(), "7");
                assert_eq!(failure.message, "No credentials on file");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn decode_get_credentials_without_items_is_contract_violation() {
        let body = "<E><B><GetCredentialsResponse><GetCredentialsResult>\
                    <errorCode>0</errorCode>\
                    </GetCredentialsResult></GetCredentialsResponse></B></E>";
        let err = decode_get_credentials(body).unwrap_err();
        assert!(matches!(
            err,
            TransportError::MissingField { field: "items", .. }
        ));
    }

    #[test]
    fn decode_get_user_reads_single_item() {
        let body = "<E><B><GetUserResponse><GetUserResult>\
                    <errorCode>0</errorCode>\
                    <items><ApiResponseItem>\
                    <username>jdoe</username>\
                    <email>jdoe@example.com</email>\
                    </ApiResponseItem></items>\
                    </GetUserResult></GetUserResponse></B></E>";
        assert_eq!(
            decode_get_user(body).unwrap(),
            Outcome::Success(AccountUser {
                username: "jdoe".to_owned(),
                email: "jdoe@example.com".to_owned(),
            })
        );
    }
}
