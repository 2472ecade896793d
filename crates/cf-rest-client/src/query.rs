//! Query string encoding for list endpoints
//!
//! Every list endpoint accepts the same paging controls plus a set of
//! resource-specific filters. Option structs declare their filters with
//! [`list_options!`](crate::list_options) and get a deterministic query
//! string from [`ListOptions::to_query_string`]: resource filters first, in
//! declared order, then the paging controls.

use std::fmt::Display;

use chrono::{DateTime, SecondsFormat, Utc};
use url::form_urlencoded::byte_serialize;

/// Default number of results per page
pub const DEFAULT_PER_PAGE: u32 = 50;

/// A multi-valued filter, encoded as `key=v1,v2` or `key[not]=v1,v2`.
///
/// An empty filter is omitted from the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub values: Vec<String>,
    pub not: bool,
}

impl Filter {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            not: false,
        }
    }

    /// Match everything except the given values
    pub fn not<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            not: true,
            ..Self::new(values)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Filter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Relational operator for timestamp filters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampOperator {
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
}

impl TimestampOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimestampOperator::GreaterThan => "gt",
            TimestampOperator::GreaterThanOrEqual => "gte",
            TimestampOperator::LessThan => "lt",
            TimestampOperator::LessThanOrEqual => "lte",
        }
    }
}

/// Filter on `created_ats` / `updated_ats`.
///
/// Without an operator the timestamps are matched exactly
/// (`created_ats=t1,t2`); with one, a single bound is expressed as
/// `created_ats[gt]=t1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimestampFilter {
    pub timestamps: Vec<DateTime<Utc>>,
    pub operator: Option<TimestampOperator>,
}

impl TimestampFilter {
    pub fn exact<I: IntoIterator<Item = DateTime<Utc>>>(timestamps: I) -> Self {
        Self {
            timestamps: timestamps.into_iter().collect(),
            operator: None,
        }
    }

    pub fn with_operator(operator: TimestampOperator, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamps: vec![timestamp],
            operator: Some(operator),
        }
    }

    pub fn after(timestamp: DateTime<Utc>) -> Self {
        Self::with_operator(TimestampOperator::GreaterThan, timestamp)
    }

    pub fn before(timestamp: DateTime<Utc>) -> Self {
        Self::with_operator(TimestampOperator::LessThan, timestamp)
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// Ordered `key=value` pairs making up a query string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryBuilder {
    pairs: Vec<(String, String)>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a multi-valued filter; empty filters are skipped
    pub fn filter(&mut self, key: &str, filter: &Filter) -> &mut Self {
        if filter.is_empty() {
            return self;
        }
        let key = if filter.not {
            format!("{key}[not]")
        } else {
            key.to_string()
        };
        let value = join_encoded(filter.values.iter().map(String::as_str));
        self.pairs.push((key, value));
        self
    }

    /// Append a timestamp filter; empty filters are skipped
    pub fn timestamps(&mut self, key: &str, filter: &TimestampFilter) -> &mut Self {
        if filter.is_empty() {
            return self;
        }
        let key = match filter.operator {
            Some(op) => format!("{key}[{}]", op.as_str()),
            None => key.to_string(),
        };
        let formatted: Vec<String> = filter
            .timestamps
            .iter()
            .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Secs, true))
            .collect();
        let value = join_encoded(formatted.iter().map(String::as_str));
        self.pairs.push((key, value));
        self
    }

    /// Append a scalar value, only when present
    pub fn value<T: Display>(&mut self, key: &str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            let value = value.to_string();
            self.pairs.push((key.to_string(), join_encoded([value.as_str()])));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn build(&self) -> String {
        self.pairs
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

// Values are escaped individually; the separating commas stay literal.
fn join_encoded<'a>(values: impl IntoIterator<Item = &'a str>) -> String {
    values
        .into_iter()
        .map(|v| byte_serialize(v.as_bytes()).collect::<String>())
        .collect::<Vec<_>>()
        .join(",")
}

/// Something that can write itself into a query under a key
pub trait QueryValue {
    fn write_to(&self, key: &str, query: &mut QueryBuilder);
}

impl QueryValue for Filter {
    fn write_to(&self, key: &str, query: &mut QueryBuilder) {
        query.filter(key, self);
    }
}

impl QueryValue for TimestampFilter {
    fn write_to(&self, key: &str, query: &mut QueryBuilder) {
        query.timestamps(key, self);
    }
}

impl<T: Display> QueryValue for Option<T> {
    fn write_to(&self, key: &str, query: &mut QueryBuilder) {
        query.value(key, self.as_ref());
    }
}

/// Paging and ordering controls shared by every list endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
    /// 1-based page number
    pub page: u32,
    pub per_page: u32,
    /// Field to sort by; prefix with `-` for descending order
    pub order_by: Option<String>,
    pub label_selector: Option<String>,
    pub created_ats: TimestampFilter,
    pub updated_ats: TimestampFilter,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            order_by: None,
            label_selector: None,
            created_ats: TimestampFilter::default(),
            updated_ats: TimestampFilter::default(),
        }
    }
}

impl PageOptions {
    pub fn write_to(&self, query: &mut QueryBuilder) {
        query
            .value("page", Some(self.page))
            .value("per_page", Some(self.per_page))
            .value("order_by", self.order_by.as_deref())
            .value("label_selector", self.label_selector.as_deref())
            .timestamps("created_ats", &self.created_ats)
            .timestamps("updated_ats", &self.updated_ats);
    }
}

/// Query options of a list endpoint
pub trait ListOptions: Clone + Default + Send + Sync {
    fn page_options(&self) -> &PageOptions;

    fn page_options_mut(&mut self) -> &mut PageOptions;

    /// Write the resource-specific filters in declared order
    fn write_filters(&self, query: &mut QueryBuilder);

    fn to_query_string(&self) -> String {
        let mut query = QueryBuilder::new();
        self.write_filters(&mut query);
        self.page_options().write_to(&mut query);
        query.build()
    }
}

/// Declare a list options struct.
///
/// Each field is written under its query key in declaration order, followed
/// by the shared [`PageOptions`] held in the `page` field.
#[macro_export]
macro_rules! list_options {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$fmeta:meta])* $field:ident : $ty:ty => $key:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: $ty, )*
            pub page: $crate::query::PageOptions,
        }

        impl $crate::query::ListOptions for $name {
            fn page_options(&self) -> &$crate::query::PageOptions {
                &self.page
            }

            fn page_options_mut(&mut self) -> &mut $crate::query::PageOptions {
                &mut self.page
            }

            #[allow(unused_variables)]
            fn write_filters(&self, query: &mut $crate::query::QueryBuilder) {
                $( $crate::query::QueryValue::write_to(&self.$field, $key, query); )*
            }
        }
    };
}
