// Pagination and search query support
// Validates page/sort/search parameters and builds parameterized SQL.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::IntoParams;

use crate::error::ErrorDetails;

/// Columns that may be used for searching and sorting users
pub const USER_COLUMNS: &[&str] = &["id", "username", "name", "last_name", "email"];

const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("invalid search column: {0}")]
    InvalidSearchColumn(String),
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        tracing::debug!("Query parameter error: {}", self);
        ErrorDetails::new(self.to_string(), "Unsupported search or sort column")
            .into_response_with(StatusCode::BAD_REQUEST)
    }
}

/// Raw query-string parameters for paged endpoints
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Page number (0-based)
    pub page: Option<i64>,
    /// Records per page
    pub size: Option<i64>,
    /// Sorting criteria in the format `property,asc|desc`
    pub sort: Option<String>,
    /// Search term
    pub search: Option<String>,
    /// Column to search on
    pub search_column: Option<String>,
}

/// Validated pagination/sort/search settings
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
    pub sort_column: String,
    pub descending: bool,
    pub search: Option<(String, String)>,
}

impl PageRequest {
    /// Validate raw parameters against a column whitelist.
    ///
    /// Defaults: page 0, size 10, sort `name,asc`. A sort or search
    /// column outside the whitelist fails with `InvalidSearchColumn`.
    pub fn from_params(
        params: PageParams,
        columns: &[&str],
        default_sort: &str,
    ) -> Result<Self, QueryError> {
        let page = params.page.unwrap_or(0).max(0);
        let size = params
            .size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        let sort = params.sort.unwrap_or_else(|| default_sort.to_string());
        let (sort_column, descending) = match sort.split_once(',') {
            Some((column, direction)) => (column.trim(), direction.trim().eq_ignore_ascii_case("desc")),
            None => (sort.trim(), false),
        };
        if !columns.contains(&sort_column) {
            return Err(QueryError::InvalidSearchColumn(sort_column.to_string()));
        }

        let search = match (params.search, params.search_column) {
            (Some(term), Some(column)) => {
                let column = column.to_lowercase();
                if !columns.contains(&column.as_str()) {
                    return Err(QueryError::InvalidSearchColumn(column));
                }
                Some((column, term))
            }
            // A search term without a column (or vice versa) is ignored
            _ => None,
        };

        Ok(Self {
            page,
            size,
            sort_column: sort_column.to_string(),
            descending,
            search,
        })
    }

    pub fn offset(&self) -> i64 {
        self.page * self.size
    }
}

/// One page of results
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: i64) -> Self {
        let total_pages = if total_elements == 0 {
            0
        } else {
            (total_elements + request.size - 1) / request.size
        };
        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

/// SQL builder for paged, searchable SELECTs.
///
/// Filter clauses are either literal (no user input) or parameterized;
/// column names must be validated against a whitelist before they reach
/// this builder.
pub struct SqlQueryBuilder {
    base_query: String,
    where_clauses: Vec<String>,
    params: Vec<String>,
    order_clause: Option<String>,
    limit: Option<i64>,
    offset: i64,
}

impl SqlQueryBuilder {
    pub fn new(base_query: &str) -> Self {
        Self {
            base_query: base_query.to_string(),
            where_clauses: Vec::new(),
            params: Vec::new(),
            order_clause: None,
            limit: None,
            offset: 0,
        }
    }

    /// Adds a literal filter clause containing no user input
    pub fn add_filter(&mut self, clause: &str) {
        self.where_clauses.push(clause.to_string());
    }

    /// Adds a case-insensitive search on a whitelisted column.
    /// The column is cast to text so numeric columns can be searched too.
    pub fn add_search(&mut self, column: &str, term: &str) {
        let param_index = self.params.len() + 1;
        self.where_clauses
            .push(format!("CAST({} AS TEXT) ILIKE ${}", column, param_index));
        self.params.push(format!("%{}%", term));
    }

    /// Sets the sort order; the column must come from a whitelist
    pub fn set_sort(&mut self, column: &str, descending: bool) {
        let direction = if descending { "DESC" } else { "ASC" };
        self.order_clause = Some(format!("ORDER BY {} {}", column, direction));
    }

    pub fn set_pagination(&mut self, limit: i64, offset: i64) {
        self.limit = Some(limit);
        self.offset = offset;
    }

    fn where_sql(&self) -> String {
        if self.where_clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.where_clauses.join(" AND "))
        }
    }

    /// Builds the SELECT statement and its parameters
    pub fn build(&self) -> (String, Vec<String>) {
        let mut query = format!("{}{}", self.base_query, self.where_sql());
        if let Some(order) = &self.order_clause {
            query.push(' ');
            query.push_str(order);
        }
        if let Some(limit) = self.limit {
            query.push_str(&format!(" LIMIT {} OFFSET {}", limit, self.offset));
        }
        (query, self.params.clone())
    }

    /// Builds the matching COUNT statement (same filters, no paging)
    pub fn build_count(&self, from_clause: &str) -> (String, Vec<String>) {
        let query = format!("SELECT COUNT(*) FROM {}{}", from_clause, self.where_sql());
        (query, self.params.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(sort: Option<&str>, search: Option<(&str, &str)>) -> PageParams {
        PageParams {
            page: None,
            size: None,
            sort: sort.map(str::to_string),
            search: search.map(|(_, term)| term.to_string()),
            search_column: search.map(|(column, _)| column.to_string()),
        }
    }

    #[test]
    fn defaults_applied_when_params_absent() {
        let request = PageRequest::from_params(params(None, None), USER_COLUMNS, "name,asc")
            .expect("defaults should validate");
        assert_eq!(request.page, 0);
        assert_eq!(request.size, 10);
        assert_eq!(request.sort_column, "name");
        assert!(!request.descending);
        assert!(request.search.is_none());
    }

    #[test]
    fn sort_direction_parsed() {
        let request =
            PageRequest::from_params(params(Some("email,desc"), None), USER_COLUMNS, "name,asc")
                .unwrap();
        assert_eq!(request.sort_column, "email");
        assert!(request.descending);
    }

    #[test]
    fn invalid_sort_column_rejected() {
        let result =
            PageRequest::from_params(params(Some("password,asc"), None), USER_COLUMNS, "name,asc");
        assert!(matches!(result, Err(QueryError::InvalidSearchColumn(column)) if column == "password"));
    }

    #[test]
    fn invalid_search_column_rejected() {
        let result = PageRequest::from_params(
            params(None, Some(("phone", "555"))),
            USER_COLUMNS,
            "name,asc",
        );
        assert!(matches!(result, Err(QueryError::InvalidSearchColumn(column)) if column == "phone"));
    }

    #[test]
    fn search_column_is_case_insensitive() {
        let request = PageRequest::from_params(
            params(None, Some(("Username", "john"))),
            USER_COLUMNS,
            "name,asc",
        )
        .unwrap();
        assert_eq!(request.search, Some(("username".to_string(), "john".to_string())));
    }

    #[test]
    fn page_size_is_clamped() {
        let request = PageRequest::from_params(
            PageParams {
                page: Some(-3),
                size: Some(10_000),
                ..Default::default()
            },
            USER_COLUMNS,
            "name,asc",
        )
        .unwrap();
        assert_eq!(request.page, 0);
        assert_eq!(request.size, MAX_PAGE_SIZE);
    }

    #[test]
    fn builder_composes_filters_search_and_paging() {
        let mut builder = SqlQueryBuilder::new("SELECT * FROM app_user");
        builder.add_filter("status = TRUE");
        builder.add_search("username", "john");
        builder.set_sort("name", false);
        builder.set_pagination(10, 20);

        let (query, params) = builder.build();
        assert_eq!(
            query,
            "SELECT * FROM app_user WHERE status = TRUE AND CAST(username AS TEXT) ILIKE $1 \
             ORDER BY name ASC LIMIT 10 OFFSET 20"
        );
        assert_eq!(params, vec!["%john%".to_string()]);

        let (count_query, count_params) = builder.build_count("app_user");
        assert_eq!(
            count_query,
            "SELECT COUNT(*) FROM app_user WHERE status = TRUE AND CAST(username AS TEXT) ILIKE $1"
        );
        assert_eq!(count_params, vec!["%john%".to_string()]);
    }

    #[test]
    fn page_totals_computed() {
        let request = PageRequest::from_params(params(None, None), USER_COLUMNS, "name,asc").unwrap();
        let page = Page::new(vec![1, 2, 3], &request, 23);
        assert_eq!(page.total_elements, 23);
        assert_eq!(page.total_pages, 3);

        let empty: Page<i32> = Page::new(vec![], &request, 0);
        assert_eq!(empty.total_pages, 0);
    }
}
