mod request;
mod wrapper;

pub use request::*;
pub use wrapper::*;

use serde::{Deserialize, Serialize};

use crate::errors::RequestError;

pub const DEFAULT_LIMIT: i64 = 10;
pub const MIN_LIMIT: i64 = 3;
pub const MAX_LIMIT: i64 = 25;

// Query strings are taken as raw text so that bad values become a 400 from
// validation instead of an extractor rejection.
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct ArticleQueryParams {
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct PageQueryParams {
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    ArticleId,
    Topic,
    Author,
    Votes,
    CreatedAt,
    CommentCount,
    Title,
}

impl SortBy {
    fn parse(value: &str) -> Option<Self> {
        let sort_by = match value {
            "article_id" => SortBy::ArticleId,
            "topic" => SortBy::Topic,
            "author" => SortBy::Author,
            "votes" => SortBy::Votes,
            "created_at" => SortBy::CreatedAt,
            "comment_count" => SortBy::CommentCount,
            "title" => SortBy::Title,
            _ => return None,
        };
        Some(sort_by)
    }

    /// Column expression used in `ORDER BY`.
    pub fn column(self) -> &'static str {
        match self {
            SortBy::ArticleId => "articles.article_id",
            SortBy::Topic => "articles.topic",
            SortBy::Author => "articles.author",
            SortBy::Votes => "articles.votes",
            SortBy::CreatedAt => "articles.created_at",
            SortBy::CommentCount => "comment_count",
            SortBy::Title => "articles.title",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("asc") {
            Some(SortOrder::Asc)
        } else if value.eq_ignore_ascii_case("desc") {
            Some(SortOrder::Desc)
        } else {
            None
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub page: i64,
}

impl Pagination {
    pub fn parse(limit: Option<&str>, page: Option<&str>) -> Result<Self, RequestError> {
        let limit = match limit {
            Some(limit) => limit.parse::<i64>().map_err(|_| RequestError::BadRequest)?,
            None => DEFAULT_LIMIT,
        };
        if !(MIN_LIMIT..=MAX_LIMIT).contains(&limit) {
            return Err(RequestError::BadRequest);
        }
        let page = match page {
            Some(page) => page.parse::<i64>().map_err(|_| RequestError::BadRequest)?,
            None => 1,
        };
        if page < 1 {
            return Err(RequestError::BadRequest);
        }
        Ok(Pagination { limit, page })
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn page_count(&self, total_count: i64) -> i64 {
        (total_count + self.limit - 1) / self.limit
    }

    /// A page past the end is only an error when there is something to page
    /// through.
    pub fn is_out_of_range(&self, total_count: i64) -> bool {
        let pages = self.page_count(total_count);
        pages > 0 && self.page > pages
    }
}

impl TryFrom<PageQueryParams> for Pagination {
    type Error = RequestError;

    fn try_from(params: PageQueryParams) -> Result<Self, Self::Error> {
        Pagination::parse(params.limit.as_deref(), params.page.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleListing {
    pub sort_by: SortBy,
    pub order: SortOrder,
    pub topic: Option<String>,
    pub author: Option<String>,
    pub pagination: Pagination,
}

impl TryFrom<ArticleQueryParams> for ArticleListing {
    type Error = RequestError;

    fn try_from(
        ArticleQueryParams {
            sort_by,
            order,
            topic,
            author,
            limit,
            page,
        }: ArticleQueryParams,
    ) -> Result<Self, Self::Error> {
        let sort_by = match sort_by.as_deref() {
            Some(value) => SortBy::parse(value).ok_or(RequestError::BadRequest)?,
            None => SortBy::CreatedAt,
        };
        let order = match order.as_deref() {
            Some(value) => SortOrder::parse(value).ok_or(RequestError::BadRequest)?,
            None => SortOrder::Desc,
        };
        let pagination = Pagination::parse(limit.as_deref(), page.as_deref())?;

        Ok(ArticleListing {
            sort_by,
            order,
            topic: topic.filter(|topic| !topic.is_empty()),
            author: author.filter(|author| !author.is_empty()),
            pagination,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> ArticleQueryParams {
        let mut params = ArticleQueryParams::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "sort_by" => params.sort_by = value,
                "order" => params.order = value,
                "topic" => params.topic = value,
                "author" => params.author = value,
                "limit" => params.limit = value,
                "page" => params.page = value,
                _ => unreachable!(),
            }
        }
        params
    }

    #[test]
    fn listing_defaults() {
        let listing = ArticleListing::try_from(params(&[])).unwrap();
        assert_eq!(listing.sort_by, SortBy::CreatedAt);
        assert_eq!(listing.order, SortOrder::Desc);
        assert_eq!(listing.pagination, Pagination { limit: 10, page: 1 });
        assert_eq!(listing.topic, None);
        assert_eq!(listing.author, None);
    }

    #[test]
    fn order_is_case_insensitive() {
        let listing = ArticleListing::try_from(params(&[("order", "ASC")])).unwrap();
        assert_eq!(listing.order, SortOrder::Asc);
        let listing = ArticleListing::try_from(params(&[("order", "Desc")])).unwrap();
        assert_eq!(listing.order, SortOrder::Desc);
    }

    #[test]
    fn sort_by_outside_the_allow_list_is_rejected() {
        for value in ["body", "article_img_url", "votes; DROP TABLE articles", ""] {
            let result = ArticleListing::try_from(params(&[("sort_by", value)]));
            assert!(matches!(result, Err(RequestError::BadRequest)), "{value}");
        }
    }

    #[test]
    fn every_allowed_sort_by_is_accepted() {
        for value in [
            "article_id",
            "topic",
            "author",
            "votes",
            "created_at",
            "comment_count",
            "title",
        ] {
            assert!(ArticleListing::try_from(params(&[("sort_by", value)])).is_ok());
        }
    }

    #[test]
    fn limit_bounds_are_inclusive() {
        assert_eq!(Pagination::parse(Some("3"), None).unwrap().limit, 3);
        assert_eq!(Pagination::parse(Some("25"), None).unwrap().limit, 25);
        for limit in ["2", "26", "-5", "ten", "4.5"] {
            assert!(Pagination::parse(Some(limit), None).is_err(), "{limit}");
        }
    }

    #[test]
    fn page_must_be_positive() {
        assert_eq!(Pagination::parse(None, Some("4")).unwrap().page, 4);
        for page in ["0", "-1", "two"] {
            assert!(Pagination::parse(None, Some(page)).is_err(), "{page}");
        }
    }

    #[test]
    fn empty_filters_are_dropped() {
        let listing =
            ArticleListing::try_from(params(&[("topic", ""), ("author", "rogersop")])).unwrap();
        assert_eq!(listing.topic, None);
        assert_eq!(listing.author.as_deref(), Some("rogersop"));
    }

    #[test]
    fn pagination_window() {
        let pagination = Pagination { limit: 5, page: 3 };
        assert_eq!(pagination.offset(), 10);
        assert_eq!(pagination.page_count(11), 3);
        assert_eq!(pagination.page_count(10), 2);
        assert!(!pagination.is_out_of_range(11));
        assert!(pagination.is_out_of_range(10));
        assert!(!pagination.is_out_of_range(0));
    }
}
