//! Booking filters and pagination.

use std::{fmt, str::FromStr};

use jiff::civil::Date;
use roomkeeper::status::BookingStatus;
use smallvec::SmallVec;
use thiserror::Error;

use crate::domain::{bookings::records::GuestUuid, rooms::records::RoomUuid};

/// Largest page size a caller may request.
pub const MAX_PER_PAGE: u32 = 100;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("page must be at least 1")]
    InvalidPage,

    #[error("per_page must be between 1 and {MAX_PER_PAGE}")]
    InvalidPerPage,

    #[error("at least one filter is required")]
    Empty,

    #[error("unknown comparison `{0}`: expected eq, gte or lte")]
    UnknownComparison(String),

    #[error("search term must not be empty")]
    EmptySearch,
}

/// One-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    page: u32,
    per_page: u32,
}

impl Page {
    /// Validate a page request.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError`] when `page` is zero or `per_page` is outside `1..=100`.
    pub fn new(page: u32, per_page: u32) -> Result<Self, FilterError> {
        if page == 0 {
            return Err(FilterError::InvalidPage);
        }

        if per_page == 0 || per_page > MAX_PER_PAGE {
            return Err(FilterError::InvalidPerPage);
        }

        Ok(Self { page, per_page })
    }

    pub const fn page(&self) -> u32 {
        self.page
    }

    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Rows to skip.
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.per_page)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
        }
    }
}

/// A page of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: u64, page: Page) -> Self {
        Self {
            items,
            total,
            page: page.page(),
            per_page: page.per_page(),
            total_pages: total.div_ceil(u64::from(page.per_page())),
        }
    }
}

/// Comparison operator of a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Gte,
    Lte,
}

impl Comparison {
    pub const fn as_sql(self) -> &'static str {
        match self {
            Comparison::Eq => " = ",
            Comparison::Gte => " >= ",
            Comparison::Lte => " <= ",
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Comparison::Eq => "eq",
            Comparison::Gte => "gte",
            Comparison::Lte => "lte",
        })
    }
}

impl FromStr for Comparison {
    type Err = FilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "eq" | "==" => Ok(Comparison::Eq),
            "gte" | ">=" => Ok(Comparison::Gte),
            "lte" | "<=" => Ok(Comparison::Lte),
            other => Err(FilterError::UnknownComparison(other.to_owned())),
        }
    }
}

/// A single typed condition on a booking column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingPredicate {
    CheckIn(Comparison, Date),
    CheckOut(Comparison, Date),
    TotalAmount(Comparison, u64),
    Status(BookingStatus),
    Room(RoomUuid),
    Guest(GuestUuid),
}

/// Conjunction of predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFilter {
    predicates: SmallVec<[BookingPredicate; 4]>,
}

impl BookingFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, predicate: BookingPredicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn push(&mut self, predicate: BookingPredicate) {
        self.predicates.push(predicate);
    }

    pub fn predicates(&self) -> &[BookingPredicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Reject filters that would match every booking.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Empty`] when no predicate was added.
    pub fn ensure_not_empty(&self) -> Result<(), FilterError> {
        if self.is_empty() {
            return Err(FilterError::Empty);
        }

        Ok(())
    }
}

/// Free-text booking search.
///
/// Matches the booking id, status and dates together with the guest's name and
/// email and the room number. A substring hit ranks first; otherwise a trigram
/// word similarity of at least [`BookingSearch::FUZZY_THRESHOLD`] is enough.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingSearch {
    term: String,
}

impl BookingSearch {
    pub const FUZZY_THRESHOLD: f32 = 0.4;

    /// # Errors
    ///
    /// Returns [`FilterError::EmptySearch`] when `term` is blank.
    pub fn new(term: &str) -> Result<Self, FilterError> {
        let term = term.trim();

        if term.is_empty() {
            return Err(FilterError::EmptySearch);
        }

        Ok(Self {
            term: term.to_owned(),
        })
    }

    pub fn term(&self) -> &str {
        &self.term
    }
}

impl FromIterator<BookingPredicate> for BookingFilter {
    fn from_iter<I: IntoIterator<Item = BookingPredicate>>(iter: I) -> Self {
        Self {
            predicates: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn page_validation() {
        assert_eq!(Page::new(0, 10), Err(FilterError::InvalidPage));
        assert_eq!(Page::new(1, 0), Err(FilterError::InvalidPerPage));
        assert_eq!(Page::new(1, 101), Err(FilterError::InvalidPerPage));
        assert!(Page::new(3, 100).is_ok());
    }

    #[test]
    fn offset_is_zero_based() -> TestResult {
        assert_eq!(Page::new(1, 20)?.offset(), 0);
        assert_eq!(Page::new(3, 20)?.offset(), 40);

        Ok(())
    }

    #[test]
    fn total_pages_rounds_up() -> TestResult {
        let page = Page::new(1, 10)?;

        assert_eq!(Paginated::<u8>::new(vec![], 0, page).total_pages, 0);
        assert_eq!(Paginated::<u8>::new(vec![], 10, page).total_pages, 1);
        assert_eq!(Paginated::<u8>::new(vec![], 11, page).total_pages, 2);

        Ok(())
    }

    #[test]
    fn comparisons_parse_names_and_symbols() -> TestResult {
        assert_eq!("gte".parse::<Comparison>()?, Comparison::Gte);
        assert_eq!("<=".parse::<Comparison>()?, Comparison::Lte);
        assert!("like".parse::<Comparison>().is_err());

        Ok(())
    }

    #[test]
    fn search_terms_are_trimmed() -> TestResult {
        assert_eq!(BookingSearch::new("  ada@example.com ")?.term(), "ada@example.com");
        assert_eq!(BookingSearch::new(" \t "), Err(FilterError::EmptySearch));

        Ok(())
    }

    #[test]
    fn empty_filter_is_rejected() {
        assert_eq!(
            BookingFilter::new().ensure_not_empty(),
            Err(FilterError::Empty)
        );

        let filter = BookingFilter::new().with(BookingPredicate::CheckIn(
            Comparison::Gte,
            date(2026, 1, 1),
        ));

        assert!(filter.ensure_not_empty().is_ok());
    }
}
