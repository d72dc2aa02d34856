use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use serde_json::Value;
use futures::lock::Mutex;
use tracing::debug;

use super::{RowStore, StoreError};

const GRAPH_BASE_URL: &str = "https://graph.microsoft.com/v1.0";
const LOGIN_BASE_URL: &str = "https://login.microsoftonline.com";

/// Refresh this long before the advertised expiry so in-flight requests never
/// carry a token that dies mid-call.
const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Clone)]
pub struct GraphConfig {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub drive_id: String,
    pub workbook_item_id: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

/// Microsoft Graph workbook-tables client. The access token is cached behind
/// a mutex and refetched on expiry; a stale value simply triggers the next
/// refetch, so concurrent refreshes are benign (last write wins).
pub struct GraphWorkbook {
    http: reqwest::Client,
    config: GraphConfig,
    token: Mutex<Option<CachedToken>>,
}

impl GraphWorkbook {
    pub fn new(config: GraphConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            token: Mutex::new(None),
        }
    }

    async fn bearer_token(&self) -> Result<String, StoreError> {
        {
            let guard = self.token.lock().await;
            if let Some(cached) = guard.as_ref() {
                if cached.expires_at > Utc::now() + Duration::seconds(TOKEN_EXPIRY_MARGIN_SECS) {
                    return Ok(cached.access_token.clone());
                }
            }
        }

        let token_url = format!(
            "{}/{}/oauth2/v2.0/token",
            LOGIN_BASE_URL, self.config.tenant_id
        );
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("scope", "https://graph.microsoft.com/.default"),
        ];

        let response = self.http.post(&token_url).form(&params).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Auth {
                status: status.as_u16(),
                body,
            });
        }

        let payload: TokenResponse = response.json().await?;
        let access_token = payload.access_token.clone();
        let expires_at = Utc::now() + Duration::seconds(payload.expires_in);
        debug!(%expires_at, "Graph token refreshed");

        *self.token.lock().await = Some(CachedToken {
            access_token: payload.access_token,
            expires_at,
        });
        Ok(access_token)
    }

    fn table_url(&self, table: &str, tail: &str) -> String {
        format!(
            "{}/drives/{}/items/{}/workbook/tables/{}/{}",
            GRAPH_BASE_URL, self.config.drive_id, self.config.workbook_item_id, table, tail
        )
    }

    async fn get_json(&self, table: &str, url: &str) -> Result<Value, StoreError> {
        let token = self.bearer_token().await?;
        let response = self.http.get(url).bearer_auth(token).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                table: table.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }

    fn shape_err(table: &str, detail: &str) -> StoreError {
        StoreError::Shape {
            table: table.to_string(),
            detail: detail.to_string(),
        }
    }
}

/// Worksheet cells come back as mixed JSON scalars; everything downstream
/// works on strings.
fn cell_to_string(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else {
                n.to_string()
            }
        }
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn values_row(table: &str, value: &Value) -> Result<Vec<String>, StoreError> {
    let cells = value
        .as_array()
        .ok_or_else(|| GraphWorkbook::shape_err(table, "row values is not an array"))?;
    Ok(cells.iter().map(cell_to_string).collect())
}

#[async_trait]
impl RowStore for GraphWorkbook {
    async fn list_headers(&self, table: &str) -> Result<Vec<String>, StoreError> {
        let url = self.table_url(table, "headerRowRange?$select=values");
        let payload = self.get_json(table, &url).await?;
        let first = payload
            .get("values")
            .and_then(|v| v.as_array())
            .and_then(|rows| rows.first())
            .ok_or_else(|| Self::shape_err(table, "headerRowRange has no values"))?;
        values_row(table, first)
    }

    async fn list_rows(&self, table: &str) -> Result<Vec<Vec<String>>, StoreError> {
        let url = self.table_url(table, "rows?$select=values");
        let payload = self.get_json(table, &url).await?;
        let items = payload
            .get("value")
            .and_then(|v| v.as_array())
            .ok_or_else(|| Self::shape_err(table, "rows response has no value array"))?;

        let mut rows = Vec::with_capacity(items.len());
        for item in items {
            // each table row wraps a single values row
            let values = item
                .get("values")
                .and_then(|v| v.as_array())
                .and_then(|v| v.first())
                .ok_or_else(|| Self::shape_err(table, "table row has no values"))?;
            rows.push(values_row(table, values)?);
        }
        Ok(rows)
    }

    async fn append_row(&self, table: &str, values: Vec<String>) -> Result<(), StoreError> {
        let token = self.bearer_token().await?;
        let url = self.table_url(table, "rows/add");
        let body = serde_json::json!({ "values": [values] });

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                table: table.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
