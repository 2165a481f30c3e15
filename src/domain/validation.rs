use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    NotDigits { field: &'static str, input: String },
    WrongLength { field: &'static str, expected: &'static str, input: String },
    NotAStateCode { input: String },
    InvalidPhoneNumber { input: String },
    InvalidAmount { input: String },
    InvalidDate { year: u16, month: u8, day: u8 },
    InvertedDateRange,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::NotDigits { field, input } => {
                write!(f, "{field} must contain only digits: {input}")
            }
            Self::WrongLength {
                field,
                expected,
                input,
            } => write!(f, "{field} must be {expected}: {input}"),
            Self::NotAStateCode { input } => {
                write!(f, "state must be a two-letter code: {input}")
            }
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidAmount { input } => write!(f, "invalid amount: {input}"),
            Self::InvalidDate { year, month, day } => {
                write!(f, "invalid calendar date: {year}-{month}-{day}")
            }
            Self::InvertedDateRange => write!(f, "date range end precedes start"),
        }
    }
}

impl std::error::Error for ValidationError {}
