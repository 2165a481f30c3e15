use super::envelope::{Outcome, SoapResult, TransportError};
use crate::domain::{GenerateReport, ReportEntry, ReportFilename};

pub const GENERATE_REPORT: &str = "GenerateReport";
pub const GET_GENERATED_REPORTS: &str = "GetGeneratedReports";

const FILENAME: &str = "filename";
const FULL_PATH: &str = "fullPath";

pub fn encode_generate_report(request: &GenerateReport) -> Vec<(&'static str, String)> {
    let range = request.range();
    vec![
        ("StartYear", range.start().year().to_string()),
        ("StartMonth", range.start().month().to_string()),
        ("StartDay", range.start().day().to_string()),
        ("EndYear", range.end().year().to_string()),
        ("EndMonth", range.end().month().to_string()),
        ("EndDay", range.end().day().to_string()),
        (
            ReportFilename::FIELD,
            request.filename().as_str().to_owned(),
        ),
    ]
}

pub fn decode_generate_report(body: &str) -> Result<Outcome<String>, TransportError> {
    let result = SoapResult::parse(GENERATE_REPORT, body)?;
    if let Some(failure) = result.failure() {
        return Ok(Outcome::Failure(failure));
    }
    let filename = result.required_text(GENERATE_REPORT, FILENAME)?;
    Ok(Outcome::Success(filename))
}

pub fn encode_get_generated_reports() -> Vec<(&'static str, String)> {
    Vec::new()
}

pub fn decode_get_generated_reports(
    body: &str,
) -> Result<Outcome<Vec<ReportEntry>>, TransportError> {
    let result = SoapResult::parse(GET_GENERATED_REPORTS, body)?;
    if let Some(failure) = result.failure() {
        return Ok(Outcome::Failure(failure));
    }
    let entries = result
        .items()
        .map(|item| {
            Ok(ReportEntry {
                filename: item.required_text(GET_GENERATED_REPORTS, FILENAME)?,
                full_path: item.required_text(GET_GENERATED_REPORTS, FULL_PATH)?,
            })
        })
        .collect::<Result<Vec<_>, TransportError>>()?;
    Ok(Outcome::Success(entries))
}
