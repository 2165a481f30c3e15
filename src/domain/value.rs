use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// VoicePulse Connect! API key.
///
/// Invariant: non-empty after trimming. Immutable after construction; a client
/// holds one key for its whole lifetime.
pub struct ApiKey(String);

impl ApiKey {
    /// Request parameter name used by VoicePulse (`ApiKey`).
    pub const FIELD: &'static str = "ApiKey";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Two-letter US state code (`State`), normalized to uppercase.
pub struct StateCode(String);

impl StateCode {
    /// Request parameter name used by VoicePulse (`State`).
    pub const FIELD: &'static str = "State";

    /// Create a validated [`StateCode`]. Lowercase input is accepted and
    /// uppercased.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.len() != 2 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::NotAStateCode {
                input: value.clone(),
            });
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Borrow the uppercase two-letter code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Three-digit NANP area code (`AreaCode`).
pub struct AreaCode(String);

impl AreaCode {
    /// Request parameter name used by VoicePulse (`AreaCode`).
    pub const FIELD: &'static str = "AreaCode";

    /// Create a validated [`AreaCode`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::NotDigits {
                field: Self::FIELD,
                input: value.clone(),
            });
        }
        if trimmed.len() != 3 {
            return Err(ValidationError::WrongLength {
                field: Self::FIELD,
                expected: "exactly 3 digits",
                input: value.clone(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated area code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Rate center name (`RateCenter`) as returned by the rate-center listing.
///
/// Invariant: non-empty after trimming.
pub struct RateCenterName(String);

impl RateCenterName {
    /// Request parameter name used by VoicePulse (`RateCenter`).
    pub const FIELD: &'static str = "RateCenter";

    /// Create a validated [`RateCenterName`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated rate center name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Report filename (`Filename`), both as requested and as returned by
/// `GenerateReport` (the provider always produces a `.zip`).
///
/// Invariant: non-empty after trimming.
pub struct ReportFilename(String);

impl ReportFilename {
    /// Request parameter name used by VoicePulse (`Filename`).
    pub const FIELD: &'static str = "Filename";

    /// Create a validated [`ReportFilename`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated filename.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Credit card verification code (`CreditCardCode`) for `RefillNow`.
///
/// Invariant: 3 or 4 ASCII digits.
pub struct CcvCode(String);

impl CcvCode {
    /// Request parameter name used by VoicePulse (`CreditCardCode`).
    pub const FIELD: &'static str = "CreditCardCode";

    /// Create a validated [`CcvCode`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::NotDigits {
                field: Self::FIELD,
                input: value.clone(),
            });
        }
        if !(3..=4).contains(&trimmed.len()) {
            return Err(ValidationError::WrongLength {
                field: Self::FIELD,
                expected: "3 or 4 digits",
                input: value.clone(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Refill amount in dollars (`Amount`), kept as the exact string sent on the
/// wire to avoid formatting drift.
///
/// Invariant: one or more ASCII digits with at most one decimal point.
pub struct RefillAmount(String);

impl RefillAmount {
    /// Request parameter name used by VoicePulse (`Amount`).
    pub const FIELD: &'static str = "Amount";

    /// Create a validated [`RefillAmount`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        let digits = trimmed.chars().filter(|c| c.is_ascii_digit()).count();
        let dots = trimmed.chars().filter(|c| *c == '.').count();
        let valid = digits > 0
            && dots <= 1
            && trimmed.chars().all(|c| c.is_ascii_digit() || c == '.');
        if !valid {
            return Err(ValidationError::InvalidAmount {
                input: value.clone(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the amount exactly as it will be sent.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Unformatted phone number as sent to VoicePulse (`PhoneNumber`).
///
/// Invariant: 7 to 15 ASCII digits, nothing else. This type does not
/// normalize; to accept formatted input, parse into [`PhoneNumber`] and
/// convert it into [`RawPhoneNumber`].
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// Request parameter name used by VoicePulse (`PhoneNumber`).
    pub const FIELD: &'static str = "PhoneNumber";

    /// Create a validated digits-only phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        if !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::NotDigits {
                field: Self::FIELD,
                input: value.clone(),
            });
        }
        if !(7..=15).contains(&trimmed.len()) {
            return Err(ValidationError::WrongLength {
                field: Self::FIELD,
                expected: "7 to 15 digits",
                input: value.clone(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Digits as sent to VoicePulse.
    pub fn digits(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for RawPhoneNumber {
    /// Convert an already-parsed phone number to the digits-only wire form
    /// (E.164 without the leading `+`).
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164.trim_start_matches('+').to_owned())
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality, ordering, and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Request parameter name used by VoicePulse (`PhoneNumber`).
    pub const FIELD: &'static str = "PhoneNumber";

    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not carry an explicit
    /// country prefix; pass `Some(country::Id::US)` for NANP input.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

impl std::cmp::PartialOrd for PhoneNumber {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::cmp::Ord for PhoneNumber {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.e164.cmp(&other.e164)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Error code carried by every VoicePulse result envelope.
///
/// `"0"` means success; any other value means the operation failed and the
/// envelope's `errorMessage` explains why. The code is preserved as wire text
/// even when non-numeric.
pub struct ErrorCode(String);

impl ErrorCode {
    /// The code VoicePulse uses for a successful call.
    pub const SUCCESS: &'static str = "0";

    /// Wrap a wire error code (trimmed, otherwise as-is).
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_owned())
    }

    /// Whether this code marks a successful call.
    pub fn is_success(&self) -> bool {
        self.0 == Self::SUCCESS
    }

    /// Get the code as provided by VoicePulse.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_newtypes_trim_or_validate() {
        let key = ApiKey::new("  key ").unwrap();
        assert_eq!(key.as_str(), "key");
        assert!(ApiKey::new("  ").is_err());

        let filename = ReportFilename::new(" vpreport ").unwrap();
        assert_eq!(filename.as_str(), "vpreport");
        assert!(ReportFilename::new("").is_err());

        let rate_center = RateCenterName::new(" Jersey City ").unwrap();
        assert_eq!(rate_center.as_str(), "Jersey City");
        assert!(RateCenterName::new("   ").is_err());
    }

    #[test]
    fn state_code_uppercases_and_rejects_junk() {
        let state = StateCode::new(" nj ").unwrap();
        assert_eq!(state.as_str(), "NJ");
        assert!(StateCode::new("N").is_err());
        assert!(StateCode::new("NJX").is_err());
        assert!(StateCode::new("N1").is_err());
    }

    #[test]
    fn area_code_requires_exactly_three_digits() {
        let area = AreaCode::new("201").unwrap();
        assert_eq!(area.as_str(), "201");
        assert!(matches!(
            AreaCode::new("20"),
            Err(ValidationError::WrongLength { .. })
        ));
        assert!(matches!(
            AreaCode::new("2o1"),
            Err(ValidationError::NotDigits { .. })
        ));
    }

    #[test]
    fn ccv_code_accepts_three_or_four_digits() {
        assert_eq!(CcvCode::new("123").unwrap().as_str(), "123");
        assert_eq!(CcvCode::new("1234").unwrap().as_str(), "1234");
        assert!(CcvCode::new("12").is_err());
        assert!(CcvCode::new("12345").is_err());
        assert!(CcvCode::new("12a").is_err());
    }

    #[test]
    fn refill_amount_accepts_decimal_strings() {
        assert_eq!(RefillAmount::new("25").unwrap().as_str(), "25");
        assert_eq!(RefillAmount::new(" 25.00 ").unwrap().as_str(), "25.00");
        assert!(RefillAmount::new("").is_err());
        assert!(RefillAmount::new(".").is_err());
        assert!(RefillAmount::new("25.0.0").is_err());
        assert!(RefillAmount::new("$25").is_err());
    }

    #[test]
    fn raw_phone_number_is_digits_only() {
        let raw = RawPhoneNumber::new(" 12015551234 ").unwrap();
        assert_eq!(raw.digits(), "12015551234");
        assert!(RawPhoneNumber::new("").is_err());
        assert!(matches!(
            RawPhoneNumber::new("+12015551234"),
            Err(ValidationError::NotDigits { .. })
        ));
        assert!(matches!(
            RawPhoneNumber::new("123"),
            Err(ValidationError::WrongLength { .. })
        ));
    }

    #[test]
    fn phone_number_parses_and_converts_to_bare_digits() {
        let parsed = PhoneNumber::parse(Some(country::Id::US), "(201) 555-1234").unwrap();
        assert_eq!(parsed.e164(), "+12015551234");
        assert_eq!(parsed.raw(), "(201) 555-1234");

        let raw: RawPhoneNumber = parsed.clone().into();
        assert_eq!(raw.digits(), "12015551234");

        let same = PhoneNumber::parse(None, "+1 201 555 1234").unwrap();
        assert_eq!(parsed, same);
        assert!(PhoneNumber::parse(None, "not-a-number").is_err());
    }

    #[test]
    fn error_code_distinguishes_success() {
        assert!(ErrorCode::new("0").is_success());
        assert!(ErrorCode::new(" 0 ").is_success());
        assert!(!ErrorCode::new("5").is_success());
        assert_eq!(ErrorCode::new("101").as_str(), "101");
        assert_eq!(ErrorCode::new("101").to_string(), "101");
    }
}
