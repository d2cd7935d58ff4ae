use serde::{Deserialize, Serialize};
use validator::Validate;

use super::ScanResult;

pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct HistoryQuery {
    #[validate(length(max = 500))]
    pub term: Option<String>,
    /// 1-based page number. Defaults to 1.
    #[validate(range(min = 1))]
    pub page: Option<usize>,
    #[validate(range(min = 1, max = 100))]
    pub per_page: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPage {
    pub items: Vec<ScanResult>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl HistoryPage {
    /// Filters `scans` (kept in their stored order) and cuts out one page.
    /// A page past the end yields no items but still reports the totals.
    pub fn build(scans: &[ScanResult], query: &HistoryQuery, default_per_page: usize) -> Self {
        let term = query.term.as_deref().unwrap_or("");
        let per_page = query
            .per_page
            .unwrap_or(default_per_page)
            .clamp(1, MAX_PAGE_SIZE);
        let page = query.page.unwrap_or(1).max(1);

        let matching: Vec<&ScanResult> = scans.iter().filter(|s| s.matches(term)).collect();
        let total = matching.len();
        let total_pages = total.div_ceil(per_page);

        let items = matching
            .into_iter()
            .skip((page - 1).saturating_mul(per_page))
            .take(per_page)
            .cloned()
            .collect();

        Self {
            items,
            page,
            per_page,
            total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn scans(n: usize) -> Vec<ScanResult> {
        (0..n)
            .map(|i| ScanResult {
                id: format!("{i}"),
                user_id: "1".to_string(),
                image_url: String::new(),
                extracted_text: if i % 2 == 0 {
                    format!("Invoice #{i}")
                } else {
                    format!("Recipe #{i}")
                },
                confidence: 0.9,
                created_at: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, i as u32).unwrap(),
            })
            .collect()
    }

    #[test]
    fn test_first_page_uses_default_size() {
        let page = HistoryPage::build(&scans(14), &HistoryQuery::default(), 6);
        assert_eq!(page.items.len(), 6);
        assert_eq!(page.page, 1);
        assert_eq!(page.total, 14);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items[0].id, "0");
    }

    #[test]
    fn test_last_page_is_partial() {
        let query = HistoryQuery {
            page: Some(3),
            ..Default::default()
        };
        let page = HistoryPage::build(&scans(14), &query, 6);
        let ids: Vec<&str> = page.items.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["12", "13"]);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let query = HistoryQuery {
            page: Some(9),
            ..Default::default()
        };
        let page = HistoryPage::build(&scans(4), &query, 6);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 4);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_term_filters_before_paging() {
        let query = HistoryQuery {
            term: Some("invoice".to_string()),
            per_page: Some(2),
            ..Default::default()
        };
        let page = HistoryPage::build(&scans(10), &query, 6);
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 3);
        assert!(page.items.iter().all(|s| s.extracted_text.starts_with("Invoice")));
    }

    #[test]
    fn test_no_matches_has_zero_pages() {
        let query = HistoryQuery {
            term: Some("parking ticket".to_string()),
            ..Default::default()
        };
        let page = HistoryPage::build(&scans(3), &query, 6);
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_validation_rejects_zero_page() {
        let query = HistoryQuery {
            page: Some(0),
            ..Default::default()
        };
        assert!(query.validate().is_err());

        let query = HistoryQuery {
            per_page: Some(500),
            ..Default::default()
        };
        assert!(query.validate().is_err());
    }
}
