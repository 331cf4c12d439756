// Lead time report.
// Aggregates time-to-close across closed issues and renders the summary.

use std::fmt;

use chrono::{NaiveDateTime, TimeDelta};

use crate::error::{Result, ScrapeError};
use crate::issue::IssueRecord;

/// Format of GitHub's `createdAt` / `closedAt` values.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

const MICROS_PER_SECOND: i64 = 1_000_000;
const MICROS_PER_DAY: i64 = 86_400 * MICROS_PER_SECOND;

/// Starting minimum: the widest span between two calendar datetimes
/// (0001-01-01 to 9999-12-31 23:59:59.999999). Reported as-is when no issue is closed.
pub fn min_lead_time_sentinel() -> TimeDelta {
    TimeDelta::days(3_652_058) + TimeDelta::seconds(86_399) + TimeDelta::microseconds(999_999)
}

/// Summary statistics over an issue list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadTimeReport {
    /// All issues, open and closed.
    pub total: usize,
    pub closed: usize,
    /// Summed lead time divided by `total`, not by `closed`.
    pub average: TimeDelta,
    pub max: TimeDelta,
    pub min: TimeDelta,
}

impl LeadTimeReport {
    /// Compute the report for `issues`.
    ///
    /// An empty list is rejected with [`ScrapeError::NoIssues`] since there is
    /// nothing to average over.
    pub fn compute(issues: &[IssueRecord]) -> Result<Self> {
        if issues.is_empty() {
            return Err(ScrapeError::NoIssues);
        }

        let mut sum = TimeDelta::zero();
        let mut max = TimeDelta::zero();
        let mut min = min_lead_time_sentinel();
        let mut closed = 0;

        for issue in issues.iter().filter(|issue| issue.is_closed) {
            let lead = lead_time(issue)?;
            sum = sum + lead;
            max = max.max(lead);
            min = min.min(lead);
            closed += 1;
        }

        Ok(Self {
            total: issues.len(),
            closed,
            average: divide_rounded(sum, issues.len())?,
            max,
            min,
        })
    }
}

impl fmt::Display for LeadTimeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total issues: {}", self.total)?;
        writeln!(f, "Average lead time: {}", format_duration(self.average))?;
        writeln!(f, "Max Lead Time: {}", format_duration(self.max))?;
        write!(f, "Min Lead Time: {}", format_duration(self.min))
    }
}

/// Time from creation to close for a closed issue.
pub fn lead_time(issue: &IssueRecord) -> Result<TimeDelta> {
    let closed = issue
        .closed_timestamp
        .as_deref()
        .ok_or(ScrapeError::MissingClosedTimestamp {
            number: issue.number,
        })?;

    let created = parse_timestamp(&issue.created_timestamp)?;
    let closed = parse_timestamp(closed)?;
    Ok(closed - created)
}

/// Parse a `YYYY-MM-DDTHH:MM:SSZ` timestamp as UTC.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    Ok(NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)?)
}

/// Divide to microsecond precision, rounding half to even.
fn divide_rounded(total: TimeDelta, count: usize) -> Result<TimeDelta> {
    let micros = total
        .num_microseconds()
        .ok_or_else(|| ScrapeError::Other("total lead time out of range".to_string()))?;
    let count = i64::try_from(count)
        .map_err(|_| ScrapeError::Other("too many issues to average".to_string()))?;

    let quotient = micros.div_euclid(count);
    let remainder = micros.rem_euclid(count);
    let rounded = match (2 * remainder).cmp(&count) {
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal => quotient + (quotient & 1),
        std::cmp::Ordering::Less => quotient,
    };
    Ok(TimeDelta::microseconds(rounded))
}

/// Render a duration as `[D day[s], ]H:MM:SS[.ffffff]`.
pub fn format_duration(duration: TimeDelta) -> String {
    let micros = duration.num_microseconds().unwrap_or(i64::MAX);
    let days = micros.div_euclid(MICROS_PER_DAY);
    let rest = micros.rem_euclid(MICROS_PER_DAY);

    let seconds = rest / MICROS_PER_SECOND;
    let fraction = rest % MICROS_PER_SECOND;

    let mut out = String::new();
    if days != 0 {
        let unit = if days.abs() == 1 { "day" } else { "days" };
        out.push_str(&format!("{} {}, ", days, unit));
    }
    out.push_str(&format!(
        "{}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    ));
    if fraction != 0 {
        out.push_str(&format!(".{:06}", fraction));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::IssueState;

    fn closed(number: u64, created: &str, closed: &str) -> IssueRecord {
        IssueRecord {
            title: format!("Closed {}", number),
            number,
            state: IssueState::Closed,
            is_closed: true,
            closed_timestamp: Some(closed.to_string()),
            created_timestamp: created.to_string(),
            labels: Vec::new(),
        }
    }

    fn open(number: u64) -> IssueRecord {
        IssueRecord {
            title: format!("Open {}", number),
            number,
            state: IssueState::Open,
            is_closed: false,
            closed_timestamp: None,
            created_timestamp: "2020-01-01T00:00:00Z".to_string(),
            labels: Vec::new(),
        }
    }

    #[test]
    fn test_report_on_mixed_issues() {
        let issues = vec![
            closed(1, "2020-01-01T00:00:00Z", "2020-01-02T00:00:00Z"),
            closed(2, "2020-01-01T00:00:00Z", "2020-01-04T00:00:00Z"),
            open(3),
        ];

        let report = LeadTimeReport::compute(&issues).unwrap();
        assert_eq!(report.total, 3);
        assert_eq!(report.closed, 2);
        assert_eq!(report.average, TimeDelta::hours(32));
        assert_eq!(report.max, TimeDelta::days(3));
        assert_eq!(report.min, TimeDelta::days(1));

        assert_eq!(
            report.to_string(),
            "Total issues: 3\n\
             Average lead time: 1 day, 8:00:00\n\
             Max Lead Time: 3 days, 0:00:00\n\
             Min Lead Time: 1 day, 0:00:00"
        );
    }

    #[test]
    fn test_report_on_all_open_issues_keeps_sentinels() {
        let issues = vec![open(1), open(2)];

        let report = LeadTimeReport::compute(&issues).unwrap();
        assert_eq!(report.total, 2);
        assert_eq!(report.closed, 0);
        assert_eq!(report.average, TimeDelta::zero());
        assert_eq!(report.max, TimeDelta::zero());
        assert_eq!(report.min, min_lead_time_sentinel());
        assert_eq!(
            format_duration(report.min),
            "3652058 days, 23:59:59.999999"
        );
    }

    #[test]
    fn test_report_on_no_issues_is_an_error() {
        let result = LeadTimeReport::compute(&[]);
        assert!(matches!(result, Err(ScrapeError::NoIssues)));
    }

    #[test]
    fn test_malformed_timestamp_fails_report() {
        let issues = vec![closed(1, "2020-01-01 00:00:00", "2020-01-02T00:00:00Z")];
        let result = LeadTimeReport::compute(&issues);
        assert!(matches!(result, Err(ScrapeError::Timestamp(_))));
    }

    #[test]
    fn test_closed_without_timestamp_fails_report() {
        let mut issue = closed(5, "2020-01-01T00:00:00Z", "2020-01-02T00:00:00Z");
        issue.closed_timestamp = None;
        let result = LeadTimeReport::compute(&[issue]);
        assert!(matches!(
            result,
            Err(ScrapeError::MissingClosedTimestamp { number: 5 })
        ));
    }

    #[test]
    fn test_average_rounds_to_microseconds() {
        // 1 second over 3 issues is 333333.33...us
        let issues = vec![
            closed(1, "2020-01-01T00:00:00Z", "2020-01-01T00:00:01Z"),
            open(2),
            open(3),
        ];
        let report = LeadTimeReport::compute(&issues).unwrap();
        assert_eq!(report.average, TimeDelta::microseconds(333_333));
        assert_eq!(format_duration(report.average), "0:00:00.333333");
    }

    #[test]
    fn test_divide_rounded_half_to_even() {
        assert_eq!(
            divide_rounded(TimeDelta::microseconds(5), 2).unwrap(),
            TimeDelta::microseconds(2)
        );
        assert_eq!(
            divide_rounded(TimeDelta::microseconds(7), 2).unwrap(),
            TimeDelta::microseconds(4)
        );
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(TimeDelta::zero()), "0:00:00");
        assert_eq!(format_duration(TimeDelta::seconds(3725)), "1:02:05");
        assert_eq!(format_duration(TimeDelta::days(2)), "2 days, 0:00:00");
        assert_eq!(format_duration(TimeDelta::seconds(-1)), "-1 day, 23:59:59");
    }

    #[test]
    fn test_parse_timestamp() {
        let parsed = parse_timestamp("2020-01-31T12:30:45Z").unwrap();
        assert_eq!(parsed.to_string(), "2020-01-31 12:30:45");
        assert!(parse_timestamp("2020-01-31T12:30:45+00:00").is_err());
    }
}
