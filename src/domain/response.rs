#[derive(Debug, Clone, PartialEq, Eq)]
/// One generated report as listed by `GetGeneratedReports`.
pub struct ReportEntry {
    pub filename: String,
    pub full_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One rate center as listed by `GetAvailablePhoneNumberRateCenters`.
pub struct RateCenterEntry {
    pub rate_center: String,
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// SIP/IAX login pair returned by `GetCredentials`, for use in `sip.conf` or
/// `iax2.conf`.
pub struct SipCredentials {
    pub login: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Account holder identity returned by `GetUser`.
pub struct AccountUser {
    pub username: String,
    pub email: String,
}
