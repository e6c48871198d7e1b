use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::review::Review;
use crate::domain::types::{CompanyId, Locale, ReviewId};
use crate::forms::reviews::ReviewParams;
use crate::i18n::{ReviewsText, interpolate};
use crate::preferences::{HelpfulVotes, PreferenceStore};
use crate::repository::{ReviewListQuery, ReviewReader};

use super::{ServiceError, ServiceResult};

/// Human readable age of a review, e.g. "3 days ago".
///
/// Under a month counts days, under a year counts 30-day months, anything
/// older counts 365-day years.
pub fn relative_date(date: NaiveDate, today: NaiveDate, t: &ReviewsText) -> String {
    let days = (today - date).num_days().unsigned_abs();
    match days {
        0 => t.today.clone(),
        1 => t.yesterday.clone(),
        2..30 => interpolate(&t.days_ago, &[("count", &days.to_string())]),
        30..365 => interpolate(&t.months_ago, &[("count", &(days / 30).to_string())]),
        _ => interpolate(&t.years_ago, &[("count", &(days / 365).to_string())]),
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReplyView {
    pub content: String,
    pub date: NaiveDate,
    pub relative_date: String,
}

/// A review prepared for one visitor in one locale.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReviewView {
    pub id: String,
    pub company_id: String,
    pub reviewer_name: String,
    pub reviewer_initials: String,
    pub rating: u8,
    pub title: String,
    pub content: String,
    pub date: NaiveDate,
    pub relative_date: String,
    pub verified: bool,
    /// Fixture count plus this visitor's vote.
    pub helpful: u32,
    pub voted: bool,
    pub company_reply: Option<ReplyView>,
}

impl ReviewView {
    pub fn new(
        review: &Review,
        votes: &HelpfulVotes,
        locale: Locale,
        today: NaiveDate,
        t: &ReviewsText,
    ) -> Self {
        let voted = votes.contains(&review.id);
        Self {
            id: review.id.as_str().to_string(),
            company_id: review.company_id.as_str().to_string(),
            reviewer_name: review.reviewer_name.as_str().to_string(),
            reviewer_initials: review.reviewer_initials.as_str().to_string(),
            rating: review.rating.get(),
            title: review.title.as_str().to_string(),
            content: review.content.get(locale).to_string(),
            date: review.date,
            relative_date: relative_date(review.date, today, t),
            verified: review.verified,
            helpful: review.helpful.get().saturating_add(u32::from(voted)),
            voted,
            company_reply: review.company_reply.as_ref().map(|reply| ReplyView {
                content: reply.content.get(locale).to_string(),
                date: reply.date,
                relative_date: relative_date(reply.date, today, t),
            }),
        }
    }
}

/// Reviews of a company filtered by rating and sorted as requested.
pub fn list_company_reviews<R>(
    company_id: &CompanyId,
    params: &ReviewParams,
    repo: &R,
) -> ServiceResult<Vec<Review>>
where
    R: ReviewReader,
{
    let mut query = ReviewListQuery::default().company(company_id.clone());
    if let Some(rating) = params.rating {
        query = query.rating(rating);
    }

    let mut reviews = match repo.list_reviews(query) {
        Ok(reviews) => reviews,
        Err(e) => {
            log::error!("Failed to list reviews: {e}");
            return Err(ServiceError::Internal);
        }
    };
    params.sort.sort(&mut reviews);
    Ok(reviews)
}

/// Count a "helpful" vote from the visitor owning `store`.
///
/// The vote only lives in the visitor's preferences. Returns `Ok(false)` when
/// the visitor already voted for this review.
pub fn mark_helpful<R, S>(
    company_id: &str,
    review_id: &str,
    store: &mut S,
    repo: &R,
) -> ServiceResult<bool>
where
    R: ReviewReader,
    S: PreferenceStore,
{
    let (company_id, review_id) = match (CompanyId::new(company_id), ReviewId::new(review_id)) {
        (Ok(company_id), Ok(review_id)) => (company_id, review_id),
        _ => return Err(ServiceError::NotFound),
    };

    let reviews = match repo.list_reviews(ReviewListQuery::default().company(company_id)) {
        Ok(reviews) => reviews,
        Err(e) => {
            log::error!("Failed to list reviews: {e}");
            return Err(ServiceError::Internal);
        }
    };
    if !reviews.iter().any(|review| review.id == review_id) {
        return Err(ServiceError::NotFound);
    }

    let mut votes = HelpfulVotes::load(store);
    let counted = votes.vote(&review_id);
    if counted {
        votes.save(store);
    }
    Ok(counted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::review::ReviewSort;
    use crate::domain::types::Rating;
    use crate::i18n::Dictionaries;
    use crate::preferences::MemoryStore;
    use crate::repository::test::{TestRepository, sample_review};

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    fn en() -> ReviewsText {
        Dictionaries::load().unwrap().get(Locale::En).reviews.clone()
    }

    fn repo() -> TestRepository {
        TestRepository::new(
            vec![],
            vec![
                sample_review("r1", "abc", 4, "2024-01-10", 3),
                sample_review("r2", "abc", 5, "2024-03-01", 0),
                sample_review("r3", "other", 5, "2024-02-01", 0),
                sample_review("r4", "abc", 5, "2024-02-14", 7),
            ],
        )
    }

    #[test]
    fn relative_dates() {
        let t = en();
        let today = date("2024-06-30");
        assert_eq!(relative_date(today, today, &t), "Today");
        assert_eq!(relative_date(date("2024-06-29"), today, &t), "Yesterday");
        assert_eq!(relative_date(date("2024-06-01"), today, &t), "29 days ago");
        assert_eq!(relative_date(date("2024-05-31"), today, &t), "1 months ago");
        assert_eq!(relative_date(date("2023-07-02"), today, &t), "12 months ago");
        assert_eq!(relative_date(date("2023-07-01"), today, &t), "1 years ago");
        assert_eq!(relative_date(date("2021-06-30"), today, &t), "3 years ago");
    }

    #[test]
    fn relative_dates_in_thai() {
        let t = Dictionaries::load().unwrap().get(Locale::Th).reviews.clone();
        let today = date("2024-06-30");
        assert_eq!(relative_date(date("2024-06-25"), today, &t), "5 วันที่แล้ว");
    }

    #[test]
    fn lists_company_reviews_sorted_and_filtered() {
        let repo = repo();
        let id = CompanyId::new("abc").unwrap();

        let reviews = list_company_reviews(&id, &ReviewParams::default(), &repo).unwrap();
        let ids: Vec<_> = reviews.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["r2", "r4", "r1"]);

        let params = ReviewParams {
            sort: ReviewSort::MostHelpful,
            rating: Some(Rating::new(5).unwrap()),
            retry: false,
        };
        let reviews = list_company_reviews(&id, &params, &repo).unwrap();
        let ids: Vec<_> = reviews.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["r4", "r2"]);
    }

    #[test]
    fn repository_failure_is_internal() {
        let id = CompanyId::new("abc").unwrap();
        let result = list_company_reviews(&id, &ReviewParams::default(), &TestRepository::failing());
        assert_eq!(result.unwrap_err(), ServiceError::Internal);
    }

    #[test]
    fn helpful_vote_counts_once_per_visitor() {
        let repo = repo();
        let mut store = MemoryStore::default();

        assert!(mark_helpful("abc", "r1", &mut store, &repo).unwrap());
        assert!(!mark_helpful("abc", "r1", &mut store, &repo).unwrap());

        let review = &repo.list_reviews(ReviewListQuery::default()).unwrap()[0];
        let view = ReviewView::new(
            review,
            &HelpfulVotes::load(&store),
            Locale::En,
            date("2024-01-10"),
            &en(),
        );
        assert_eq!(view.helpful, 4);
        assert!(view.voted);
        assert_eq!(view.relative_date, "Today");
    }

    #[test]
    fn vote_on_maximum_helpful_count_does_not_overflow() {
        let review = sample_review("r1", "abc", 4, "2024-01-10", i64::from(u32::MAX));
        let mut store = MemoryStore::default();
        let mut votes = HelpfulVotes::load(&store);
        votes.vote(&review.id);
        votes.save(&mut store);

        let view = ReviewView::new(
            &review,
            &HelpfulVotes::load(&store),
            Locale::En,
            date("2024-01-10"),
            &en(),
        );
        assert_eq!(view.helpful, u32::MAX);
        assert!(view.voted);
    }

    #[test]
    fn helpful_vote_requires_matching_company() {
        let repo = repo();
        let mut store = MemoryStore::default();
        assert_eq!(
            mark_helpful("abc", "r3", &mut store, &repo).unwrap_err(),
            ServiceError::NotFound
        );
        assert_eq!(
            mark_helpful("abc", "missing", &mut store, &repo).unwrap_err(),
            ServiceError::NotFound
        );
    }

    #[test]
    fn view_uses_locale_content_without_vote() {
        let review = sample_review("r1", "abc", 4, "2024-01-10", 3);
        let view = ReviewView::new(
            &review,
            &HelpfulVotes::default(),
            Locale::Th,
            date("2024-01-12"),
            &en(),
        );
        assert_eq!(view.content, "บริการดี");
        assert_eq!(view.helpful, 3);
        assert!(!view.voted);
        assert_eq!(view.relative_date, "2 days ago");
    }
}
