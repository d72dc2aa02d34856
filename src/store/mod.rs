use async_trait::async_trait;
use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;
use utoipa::ToSchema;

pub mod graph;
#[cfg(test)]
pub mod memory;

#[cfg(test)]
mod adapter_tests;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("workbook request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("workbook auth failed ({status}): {body}")]
    Auth { status: u16, body: String },
    #[error("workbook API error ({status}) on table {table}: {body}")]
    Api {
        table: String,
        status: u16,
        body: String,
    },
    #[error("unexpected workbook payload for table {table}: {detail}")]
    Shape { table: String, detail: String },
}

/// Raw tabular storage: ordered headers, positional rows (header excluded),
/// positional append. Backed by a Microsoft Graph workbook in production and
/// an in-memory map in tests.
#[async_trait]
pub trait RowStore: Send + Sync {
    async fn list_headers(&self, table: &str) -> Result<Vec<String>, StoreError>;
    async fn list_rows(&self, table: &str) -> Result<Vec<Vec<String>>, StoreError>;
    async fn append_row(&self, table: &str, values: Vec<String>) -> Result<(), StoreError>;
}

/// Outcome of a named append: which fields landed in a column and which had
/// no matching header. Callers can surface `dropped` instead of losing data
/// silently on schema drift.
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct AppendReport {
    pub written: Vec<String>,
    pub dropped: Vec<String>,
}

/// Named-column view over a [`RowStore`], with a TTL-bounded header cache per
/// table. Header shapes change rarely; row reads always hit the store.
#[derive(Clone)]
pub struct TableAdapter {
    store: Arc<dyn RowStore>,
    headers: Cache<String, Arc<Vec<String>>>,
}

impl TableAdapter {
    pub fn new(store: Arc<dyn RowStore>, header_ttl: Duration) -> Self {
        Self {
            store,
            headers: Cache::builder()
                .max_capacity(64)
                .time_to_live(header_ttl)
                .build(),
        }
    }

    /// Ordered column headers, cached until the TTL expires. Concurrent
    /// requests may race to fill an entry; the values are identical so the
    /// last write winning is harmless.
    pub async fn headers(&self, table: &str) -> Result<Arc<Vec<String>>, StoreError> {
        if let Some(cached) = self.headers.get(table).await {
            return Ok(cached);
        }
        let fresh = Arc::new(self.store.list_headers(table).await?);
        self.headers.insert(table.to_string(), fresh.clone()).await;
        Ok(fresh)
    }

    pub async fn rows(&self, table: &str) -> Result<Vec<Vec<String>>, StoreError> {
        self.store.list_rows(table).await
    }

    /// Append a row by column name. Lookup is a case-insensitive exact match;
    /// columns the table lacks are reported back as `dropped`, absent fields
    /// are written as empty strings.
    pub async fn append_named(
        &self,
        table: &str,
        fields: &[(&str, String)],
    ) -> Result<AppendReport, StoreError> {
        let headers = self.headers(table).await?;
        let mut values = vec![String::new(); headers.len()];
        let mut report = AppendReport::default();

        for (name, value) in fields {
            let slot = headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name.trim()));
            match slot {
                Some(idx) => {
                    values[idx] = value.clone();
                    report.written.push((*name).to_string());
                }
                None => report.dropped.push((*name).to_string()),
            }
        }

        if !report.dropped.is_empty() {
            warn!(table, dropped = ?report.dropped, "append fields without a matching column");
        }

        self.store.append_row(table, values).await?;
        Ok(report)
    }
}

/// Prime the header cache for the given tables so first requests skip the
/// extra round-trip. Failures are logged and left for request time.
pub async fn warmup_headers(adapter: TableAdapter, tables: Vec<String>) {
    for table in tables {
        match adapter.headers(&table).await {
            Ok(headers) => {
                log::info!("Header cache warm for {} ({} columns)", table, headers.len())
            }
            Err(e) => warn!(error = %e, table, "Header warmup failed"),
        }
    }
}
