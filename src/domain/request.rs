use crate::domain::validation::ValidationError;
use crate::domain::value::ReportFilename;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Calendar date for a report boundary.
///
/// Invariant: a real calendar date (month 1..=12, day within the month, leap
/// years honored).
pub struct ReportDate {
    year: u16,
    month: u8,
    day: u8,
}

impl ReportDate {
    /// Create a validated [`ReportDate`].
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ValidationError> {
        if year < 1900 || !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month)
        {
            return Err(ValidationError::InvalidDate { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Inclusive date range for `GenerateReport`.
///
/// Invariant: `end` does not precede `start`.
pub struct DateRange {
    start: ReportDate,
    end: ReportDate,
}

impl DateRange {
    /// Create a validated [`DateRange`].
    pub fn new(start: ReportDate, end: ReportDate) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::InvertedDateRange);
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> ReportDate {
        self.start
    }

    pub fn end(&self) -> ReportDate {
        self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to generate a usage report over a date range.
///
/// The provider always produces a `.zip`; the returned filename may therefore
/// differ from the requested one by its extension.
pub struct GenerateReport {
    range: DateRange,
    filename: ReportFilename,
}

impl GenerateReport {
    pub fn new(range: DateRange, filename: ReportFilename) -> Self {
        Self { range, filename }
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }

    pub fn filename(&self) -> &ReportFilename {
        &self.filename
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_date_validates_calendar() {
        assert!(ReportDate::new(2007, 3, 1).is_ok());
        assert!(ReportDate::new(2007, 2, 28).is_ok());
        assert!(ReportDate::new(2008, 2, 29).is_ok());
        assert!(ReportDate::new(2007, 2, 29).is_err());
        assert!(ReportDate::new(2000, 2, 29).is_ok());
        assert!(ReportDate::new(1900, 2, 29).is_err());
        assert!(ReportDate::new(2007, 0, 1).is_err());
        assert!(ReportDate::new(2007, 13, 1).is_err());
        assert!(ReportDate::new(2007, 4, 31).is_err());
        assert!(ReportDate::new(1815, 6, 18).is_err());
    }

    #[test]
    fn date_range_rejects_inverted_bounds() {
        let start = ReportDate::new(2007, 3, 1).unwrap();
        let end = ReportDate::new(2007, 4, 2).unwrap();
        assert!(DateRange::new(start, end).is_ok());
        assert!(DateRange::new(start, start).is_ok());
        assert!(matches!(
            DateRange::new(end, start),
            Err(ValidationError::InvertedDateRange)
        ));
    }

    #[test]
    fn generate_report_exposes_parts() {
        let start = ReportDate::new(2007, 3, 1).unwrap();
        let end = ReportDate::new(2007, 4, 2).unwrap();
        let range = DateRange::new(start, end).unwrap();
        let request = GenerateReport::new(range, ReportFilename::new("vpreport").unwrap());
        assert_eq!(request.range().start().year(), 2007);
        assert_eq!(request.range().end().day(), 2);
        assert_eq!(request.filename().as_str(), "vpreport");
    }
}
