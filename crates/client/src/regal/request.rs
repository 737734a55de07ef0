//! Listing request: which theater, which date, and the resulting URL.

use chrono::{Datelike, Days, NaiveDate};
use url::Url;

use super::UpstreamError;

/// Date format used in the quickbook path.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parameters identifying one film-events listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    /// API base, e.g. `https://www.regmovies.com/us/data-api-service/v1`.
    pub base_url: String,
    pub tenant_id: String,
    pub cinema_id: String,
    pub date: NaiveDate,
}

impl ListingRequest {
    /// Build the listing URL.
    ///
    /// `{base}/quickbook/{tenant}/film-events/in-cinema/{cinema}/at-date/{date}?attr=&lang=en_US`
    pub fn url(&self) -> Result<Url, UpstreamError> {
        let base = self.base_url.trim_end_matches('/');
        let mut url = Url::parse(&format!(
            "{base}/quickbook/{tenant}/film-events/in-cinema/{cinema}/at-date/{date}",
            tenant = self.tenant_id,
            cinema = self.cinema_id,
            date = self.date.format(DATE_FORMAT),
        ))
        .map_err(|e| UpstreamError::InvalidUrl(format!("{base}: {e}")))?;

        url.query_pairs_mut().append_pair("attr", "").append_pair("lang", "en_US");
        Ok(url)
    }
}

/// The Friday of the week containing `today`, counting weeks from Sunday.
///
/// Sunday through Friday map forward to that Friday; Saturday maps back one day.
pub fn listing_date(today: NaiveDate) -> NaiveDate {
    let weekday = today.weekday().num_days_from_sunday();
    if weekday <= 5 {
        today + Days::new(u64::from(5 - weekday))
    } else {
        today - Days::new(u64::from(weekday - 5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_listing_date_across_week() {
        // 2024-05-05 is a Sunday.
        assert_eq!(listing_date(date(2024, 5, 5)), date(2024, 5, 10));
        assert_eq!(listing_date(date(2024, 5, 8)), date(2024, 5, 10));
        assert_eq!(listing_date(date(2024, 5, 10)), date(2024, 5, 10));
        assert_eq!(listing_date(date(2024, 5, 11)), date(2024, 5, 10));
    }

    #[test]
    fn test_listing_date_crosses_month() {
        // 2024-05-29 is a Wednesday.
        assert_eq!(listing_date(date(2024, 5, 29)), date(2024, 5, 31));
        // 2024-06-01 is a Saturday.
        assert_eq!(listing_date(date(2024, 6, 1)), date(2024, 5, 31));
    }

    #[test]
    fn test_url_format() {
        let req = ListingRequest {
            base_url: "https://www.regmovies.com/us/data-api-service/v1/".into(),
            tenant_id: "10110".into(),
            cinema_id: "0354".into(),
            date: date(2024, 5, 10),
        };
        assert_eq!(
            req.url().unwrap().as_str(),
            "https://www.regmovies.com/us/data-api-service/v1/quickbook/10110/film-events/in-cinema/0354/at-date/2024-05-10?attr=&lang=en_US"
        );
    }

    #[test]
    fn test_url_rejects_garbage_base() {
        let req = ListingRequest {
            base_url: "not a url".into(),
            tenant_id: "10110".into(),
            cinema_id: "0354".into(),
            date: date(2024, 5, 10),
        };
        assert!(matches!(req.url(), Err(UpstreamError::InvalidUrl(_))));
    }
}
