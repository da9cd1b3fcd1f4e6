//! Generic tabular query builder for the hosted datastore's REST interface.
//!
//! Filters, ordering, and limits render as query-string parameters in the
//! store's `column=op.value` dialect. The builder only assembles parameter
//! pairs; percent-encoding happens when the client writes them into the URL.

use std::fmt::Display;

/// A query against one logical table.
#[derive(Debug, Clone)]
pub struct TableQuery {
    table: String,
    params: Vec<(String, String)>,
}

impl TableQuery {
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            params: Vec::new(),
        }
    }

    /// Restrict the returned columns. Defaults to every column when unset.
    #[must_use]
    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".to_string(), columns.to_string()));
        self
    }

    /// Equality filter: `column=eq.value`.
    #[must_use]
    pub fn eq(mut self, column: &str, value: impl Display) -> Self {
        self.params.push((column.to_string(), format!("eq.{value}")));
        self
    }

    /// Lower-bound filter: `column=gte.value`.
    #[must_use]
    pub fn gte(mut self, column: &str, value: impl Display) -> Self {
        self.params
            .push((column.to_string(), format!("gte.{value}")));
        self
    }

    /// Upper-bound filter: `column=lte.value`.
    #[must_use]
    pub fn lte(mut self, column: &str, value: impl Display) -> Self {
        self.params
            .push((column.to_string(), format!("lte.{value}")));
        self
    }

    /// Set-membership filter: `column=in.(a,b,c)`.
    #[must_use]
    pub fn in_list(mut self, column: &str, values: &[&str]) -> Self {
        self.params
            .push((column.to_string(), format!("in.({})", values.join(","))));
        self
    }

    /// Ascending order on `column`.
    #[must_use]
    pub fn order_asc(mut self, column: &str) -> Self {
        self.params
            .push(("order".to_string(), format!("{column}.asc")));
        self
    }

    /// Descending order on `column`.
    #[must_use]
    pub fn order_desc(mut self, column: &str) -> Self {
        self.params
            .push(("order".to_string(), format!("{column}.desc")));
        self
    }

    /// Cap the number of returned rows.
    #[must_use]
    pub fn limit(mut self, n: u32) -> Self {
        self.params.push(("limit".to_string(), n.to_string()));
        self
    }

    pub(crate) fn table(&self) -> &str {
        &self.table
    }

    pub(crate) fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(query: &TableQuery) -> Vec<(&str, &str)> {
        query
            .params()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn eq_and_order_render_store_dialect() {
        let query = TableQuery::new("ai_sites")
            .eq("status", "active")
            .order_desc("created_at");
        assert_eq!(query.table(), "ai_sites");
        assert_eq!(
            pairs(&query),
            vec![("status", "eq.active"), ("order", "created_at.desc")]
        );
    }

    #[test]
    fn range_filters_render_gte_and_lte() {
        let query = TableQuery::new("activity_history")
            .gte("record_date", "2025-07-01")
            .lte("record_date", "2025-07-31");
        assert_eq!(
            pairs(&query),
            vec![
                ("record_date", "gte.2025-07-01"),
                ("record_date", "lte.2025-07-31"),
            ]
        );
    }

    #[test]
    fn in_list_renders_parenthesized_set() {
        let query = TableQuery::new("rankings").in_list("region", &["global", "domestic"]);
        assert_eq!(pairs(&query), vec![("region", "in.(global,domestic)")]);
    }

    #[test]
    fn select_and_limit_render_verbatim() {
        let query = TableQuery::new("ai_sites").select("id").limit(1);
        assert_eq!(pairs(&query), vec![("select", "id"), ("limit", "1")]);
    }
}
