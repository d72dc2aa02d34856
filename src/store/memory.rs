use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::{RowStore, StoreError};

/// In-memory [`RowStore`] for tests: named tables with a header row and
/// positional data rows.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, (Vec<String>, Vec<Vec<String>>)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(self, name: &str, headers: &[&str], rows: Vec<Vec<&str>>) -> Self {
        let headers = headers.iter().map(|h| h.to_string()).collect();
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|c| c.to_string()).collect())
            .collect();
        self.tables
            .lock()
            .unwrap()
            .insert(name.to_string(), (headers, rows));
        self
    }

    pub fn rows_of(&self, name: &str) -> Vec<Vec<String>> {
        self.tables
            .lock()
            .unwrap()
            .get(name)
            .map(|(_, rows)| rows.clone())
            .unwrap_or_default()
    }

    fn missing(table: &str) -> StoreError {
        StoreError::Api {
            table: table.to_string(),
            status: 404,
            body: "no such table".to_string(),
        }
    }
}

#[async_trait]
impl RowStore for MemoryStore {
    async fn list_headers(&self, table: &str) -> Result<Vec<String>, StoreError> {
        let tables = self.tables.lock().unwrap();
        let (headers, _) = tables.get(table).ok_or_else(|| Self::missing(table))?;
        Ok(headers.clone())
    }

    async fn list_rows(&self, table: &str) -> Result<Vec<Vec<String>>, StoreError> {
        let tables = self.tables.lock().unwrap();
        let (_, rows) = tables.get(table).ok_or_else(|| Self::missing(table))?;
        Ok(rows.clone())
    }

    async fn append_row(&self, table: &str, values: Vec<String>) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let (_, rows) = tables.get_mut(table).ok_or_else(|| Self::missing(table))?;
        rows.push(values);
        Ok(())
    }
}
