//! Temporal source selection

use chrono::NaiveDate;

use crate::models::SourceDecision;

/// Dates more than this many days before the reference day go to the archive.
/// The archive lags a few days behind, the forecast source covers the gap.
pub const ARCHIVE_THRESHOLD_DAYS: i64 = 5;

/// Pick the source class for `query_date` as seen from `reference_date`.
#[must_use]
pub fn decide(reference_date: NaiveDate, query_date: NaiveDate) -> SourceDecision {
    let days_back = reference_date.signed_duration_since(query_date).num_days();
    if days_back > ARCHIVE_THRESHOLD_DAYS {
        SourceDecision::Archive
    } else {
        SourceDecision::Forecast
    }
}

/// Whether `query_date` lies further ahead than the forecast source covers.
#[must_use]
pub fn beyond_forecast_horizon(
    reference_date: NaiveDate,
    query_date: NaiveDate,
    horizon_days: u32,
) -> bool {
    query_date.signed_duration_since(reference_date).num_days() > i64::from(horizon_days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rstest::rstest;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[rstest]
    #[case(-30, SourceDecision::Forecast)]
    #[case(-1, SourceDecision::Forecast)]
    #[case(0, SourceDecision::Forecast)]
    #[case(1, SourceDecision::Forecast)]
    #[case(5, SourceDecision::Forecast)]
    #[case(6, SourceDecision::Archive)]
    #[case(365 * 40, SourceDecision::Archive)]
    fn test_decide_by_days_back(#[case] days_back: i64, #[case] expected: SourceDecision) {
        let query_date = today() - Duration::days(days_back);
        assert_eq!(decide(today(), query_date), expected);
    }

    #[test]
    fn test_decide_is_deterministic() {
        let query_date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(decide(today(), query_date), decide(today(), query_date));
    }

    #[test]
    fn test_decide_across_year_boundary() {
        let reference = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let query_date = NaiveDate::from_ymd_opt(2023, 12, 28).unwrap();
        assert_eq!(decide(reference, query_date), SourceDecision::Archive);
    }

    #[rstest]
    #[case(0, false)]
    #[case(16, false)]
    #[case(17, true)]
    #[case(-400, false)]
    fn test_beyond_forecast_horizon(#[case] days_ahead: i64, #[case] expected: bool) {
        let query_date = today() + Duration::days(days_ahead);
        assert_eq!(beyond_forecast_horizon(today(), query_date, 16), expected);
    }
}
