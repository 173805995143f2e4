//! Search parameters and the order predicate built from them
//!
//! A search is a sparse set of query parameters. Present, non-empty values
//! become clauses that must all hold; a query where every value is empty
//! matches nothing rather than everything.

use crate::core::error::ValidationError;
use crate::core::order::{Order, fields};
use chrono::Datelike;
use std::collections::HashMap;
use uuid::Uuid;

/// One condition on an order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// Status wire form equals the value
    StatusEquals(String),
    /// Receiver name contains the value, ignoring case
    ReceiverNameContains(String),
    /// Customer name contains the value, ignoring case
    CustomerNameContains(String),
    /// Id equals the value; `None` when the value is not an id at all
    IdEquals(Option<Uuid>),
    /// Order date falls on this day and month in any year
    DayMonth { day: u32, month: u32 },
}

impl Clause {
    pub fn matches(&self, order: &Order) -> bool {
        match self {
            Clause::StatusEquals(status) => order.status.as_str() == status,
            Clause::ReceiverNameContains(needle) => contains_ignore_case(&order.receiver_name, needle),
            Clause::CustomerNameContains(needle) => contains_ignore_case(&order.customer_name, needle),
            Clause::IdEquals(id) => id.is_some_and(|id| order.id == id),
            Clause::DayMonth { day, month } => order.date.day() == *day && order.date.month() == *month,
        }
    }
}

/// A filter over stored orders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderPredicate {
    /// Matches no order
    Nothing,
    /// Matches orders satisfying every clause; an empty list matches all
    All(Vec<Clause>),
}

impl OrderPredicate {
    pub fn matches(&self, order: &Order) -> bool {
        match self {
            OrderPredicate::Nothing => false,
            OrderPredicate::All(clauses) => clauses.iter().all(|c| c.matches(order)),
        }
    }

    pub fn is_nothing(&self) -> bool {
        matches!(self, OrderPredicate::Nothing)
    }
}

/// Raw search query parameters
///
/// All parameters are kept, including unknown ones, because any non-empty
/// value turns the search on.
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    params: HashMap<String, String>,
}

impl SearchParams {
    pub fn new(params: HashMap<String, String>) -> Self {
        Self { params }
    }

    /// Value of a parameter, treating empty as absent
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn has_any_value(&self) -> bool {
        self.params.values().any(|v| !v.is_empty())
    }
}

impl From<HashMap<String, String>> for SearchParams {
    fn from(params: HashMap<String, String>) -> Self {
        Self::new(params)
    }
}

impl<K, V> FromIterator<(K, V)> for SearchParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Translate search parameters into a predicate
///
/// # Errors
///
/// `InvalidDateFormat` when `date` is not two integers joined by `-`.
pub fn build_predicate(params: &SearchParams) -> Result<OrderPredicate, ValidationError> {
    if !params.has_any_value() {
        return Ok(OrderPredicate::Nothing);
    }

    let mut clauses = Vec::new();

    if let Some(status) = params.get(fields::STATUS) {
        clauses.push(Clause::StatusEquals(status.to_string()));
    }
    if let Some(name) = params.get(fields::RECEIVER_NAME) {
        clauses.push(Clause::ReceiverNameContains(name.to_string()));
    }
    if let Some(name) = params.get(fields::CUSTOMER_NAME) {
        clauses.push(Clause::CustomerNameContains(name.to_string()));
    }
    if let Some(id) = params.get(fields::ID) {
        clauses.push(Clause::IdEquals(Uuid::parse_str(id).ok()));
    }
    if let Some(date) = params.get(fields::DATE) {
        let (day, month) = parse_day_month(date)?;
        clauses.push(Clause::DayMonth { day, month });
    }

    Ok(OrderPredicate::All(clauses))
}

/// Parse `DD-MM` into `(day, month)`
///
/// Out-of-range numbers are accepted and simply match nothing.
pub fn parse_day_month(value: &str) -> Result<(u32, u32), ValidationError> {
    let invalid = || ValidationError::InvalidDateFormat {
        value: value.to_string(),
    };

    let mut parts = value.split('-');
    let (Some(day), Some(month), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };

    let day = day.trim().parse::<u32>().map_err(|_| invalid())?;
    let month = month.trim().parse::<u32>().map_err(|_| invalid())?;
    Ok((day, month))
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::PhoneNumber;
    use crate::core::order::{NewOrder, OrderStatus};
    use chrono::NaiveDate;

    fn order(receiver: &str, customer: &str, date: (i32, u32, u32), status: OrderStatus) -> Order {
        NewOrder {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            customer_name: customer.into(),
            customer_phone: None,
            receiver_name: receiver.into(),
            receiver_phone: Some(PhoneNumber::from(1)),
            product_name: "Box".into(),
            address: "Somewhere".into(),
            observations: String::new(),
            status,
        }
        .into_order(Uuid::new_v4())
    }

    fn params(pairs: &[(&str, &str)]) -> SearchParams {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        assert_eq!(
            build_predicate(&SearchParams::default()).unwrap(),
            OrderPredicate::Nothing
        );
        assert_eq!(
            build_predicate(&params(&[("status", ""), ("receiver_name", "")])).unwrap(),
            OrderPredicate::Nothing
        );
    }

    #[test]
    fn test_unknown_param_enables_search_without_constraint() {
        let predicate = build_predicate(&params(&[("page", "1")])).unwrap();
        assert_eq!(predicate, OrderPredicate::All(vec![]));
        assert!(predicate.matches(&order("A", "B", (2024, 1, 1), OrderStatus::Pending)));
    }

    #[test]
    fn test_receiver_name_is_case_insensitive_substring() {
        let predicate = build_predicate(&params(&[("receiver_name", "MAR")])).unwrap();
        assert!(predicate.matches(&order("Maria", "B", (2024, 1, 1), OrderStatus::Pending)));
        assert!(predicate.matches(&order("Omar", "B", (2024, 1, 1), OrderStatus::Pending)));
        assert!(!predicate.matches(&order("Luis", "B", (2024, 1, 1), OrderStatus::Pending)));
    }

    #[test]
    fn test_status_is_exact() {
        let predicate = build_predicate(&params(&[("status", "pending")])).unwrap();
        assert!(predicate.matches(&order("A", "B", (2024, 1, 1), OrderStatus::Pending)));
        assert!(!predicate.matches(&order("A", "B", (2024, 1, 1), OrderStatus::Processing)));

        let predicate = build_predicate(&params(&[("status", "pend")])).unwrap();
        assert!(!predicate.matches(&order("A", "B", (2024, 1, 1), OrderStatus::Pending)));
    }

    #[test]
    fn test_date_matches_day_and_month_in_any_year() {
        let predicate = build_predicate(&params(&[("date", "15-03")])).unwrap();
        assert!(predicate.matches(&order("A", "B", (2024, 3, 15), OrderStatus::Pending)));
        assert!(predicate.matches(&order("A", "B", (1999, 3, 15), OrderStatus::Pending)));
        assert!(!predicate.matches(&order("A", "B", (2024, 3, 16), OrderStatus::Pending)));
        assert!(!predicate.matches(&order("A", "B", (2024, 4, 15), OrderStatus::Pending)));
    }

    #[test]
    fn test_malformed_date_is_an_error() {
        for bad in ["15-3x", "15", "15-03-2024", "-", "a-b"] {
            assert_eq!(
                build_predicate(&params(&[("date", bad)])),
                Err(ValidationError::InvalidDateFormat { value: bad.into() }),
                "date {:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_id_clause() {
        let target = order("A", "B", (2024, 1, 1), OrderStatus::Pending);
        let id = target.id.to_string();
        let predicate = build_predicate(&params(&[("id", id.as_str())])).unwrap();
        assert!(predicate.matches(&target));
        assert!(!predicate.matches(&order("A", "B", (2024, 1, 1), OrderStatus::Pending)));

        let predicate = build_predicate(&params(&[("id", "42")])).unwrap();
        assert!(!predicate.matches(&target));
    }

    #[test]
    fn test_clauses_combine_with_and() {
        let predicate = build_predicate(&params(&[
            ("customer_name", "acme"),
            ("status", "processing"),
        ]))
        .unwrap();
        assert!(predicate.matches(&order("A", "ACME Ltd", (2024, 1, 1), OrderStatus::Processing)));
        assert!(!predicate.matches(&order("A", "ACME Ltd", (2024, 1, 1), OrderStatus::Pending)));
        assert!(!predicate.matches(&order("A", "Other", (2024, 1, 1), OrderStatus::Processing)));
    }

    #[test]
    fn test_nothing_matches_no_order() {
        let target = order("A", "B", (2024, 1, 1), OrderStatus::Pending);
        assert!(!OrderPredicate::Nothing.matches(&target));
    }

    #[test]
    fn test_text_values_are_matched_verbatim() {
        let target = order("A", "B", (2024, 1, 1), OrderStatus::Pending);
        let id = format!(" {} ", target.id);

        let predicate = build_predicate(&params(&[("id", id.as_str())])).unwrap();
        assert!(!predicate.matches(&target));

        let predicate = build_predicate(&params(&[("status", " pending")])).unwrap();
        assert!(!predicate.matches(&target));
    }
}
