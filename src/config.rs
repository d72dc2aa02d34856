use crate::store::graph::GraphConfig;
use crate::utils::geo;
use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,

    // Microsoft Graph workbook access
    pub graph_tenant_id: String,
    pub graph_client_id: String,
    pub graph_client_secret: String,
    pub graph_drive_id: String,
    pub graph_item_id: String,

    // Worksheet table names
    pub checkin_table: String,
    pub checkout_table: String,
    pub leave_table: String,
    pub user_table: String,
    pub holiday_table: String,
    pub weekly_off_table: String,
    pub day_off_table: String,

    pub header_cache_ttl_secs: u64,
    pub max_checkout_distance_km: f64,

    // Rate limiting
    pub rate_submit_per_min: u32,
    pub rate_report_per_min: u32,

    pub api_prefix: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),

            graph_tenant_id: env::var("GRAPH_TENANT_ID").expect("GRAPH_TENANT_ID must be set"),
            graph_client_id: env::var("GRAPH_CLIENT_ID").expect("GRAPH_CLIENT_ID must be set"),
            graph_client_secret: env::var("GRAPH_CLIENT_SECRET")
                .expect("GRAPH_CLIENT_SECRET must be set"),
            graph_drive_id: env::var("GRAPH_DRIVE_ID").expect("GRAPH_DRIVE_ID must be set"),
            graph_item_id: env::var("GRAPH_ITEM_ID").expect("GRAPH_ITEM_ID must be set"),

            checkin_table: env::var("CHECKIN_TABLE").unwrap_or_else(|_| "CheckIn".to_string()),
            checkout_table: env::var("CHECKOUT_TABLE").unwrap_or_else(|_| "CheckOut".to_string()),
            leave_table: env::var("LEAVE_TABLE").unwrap_or_else(|_| "Leaves".to_string()),
            user_table: env::var("USER_TABLE").unwrap_or_else(|_| "Users".to_string()),
            holiday_table: env::var("HOLIDAY_TABLE").unwrap_or_else(|_| "Holidays".to_string()),
            weekly_off_table: env::var("WEEKLY_OFF_TABLE")
                .unwrap_or_else(|_| "WeeklyOff".to_string()),
            day_off_table: env::var("DAY_OFF_TABLE").unwrap_or_else(|_| "DayOffs".to_string()),

            header_cache_ttl_secs: env::var("HEADER_CACHE_TTL_SECS")
                .unwrap_or_else(|_| "1800".to_string()) // default 30 min
                .parse()
                .unwrap(),
            max_checkout_distance_km: env::var("MAX_CHECKOUT_DISTANCE_KM")
                .unwrap_or_else(|_| geo::DEFAULT_MAX_DISTANCE_KM.to_string())
                .parse()
                .unwrap(),

            rate_submit_per_min: env::var("RATE_SUBMIT_PER_MIN")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap(),
            rate_report_per_min: env::var("RATE_REPORT_PER_MIN")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .unwrap(),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api/v1".to_string()),
        }
    }

    pub fn graph(&self) -> GraphConfig {
        GraphConfig {
            tenant_id: self.graph_tenant_id.clone(),
            client_id: self.graph_client_id.clone(),
            client_secret: self.graph_client_secret.clone(),
            drive_id: self.graph_drive_id.clone(),
            workbook_item_id: self.graph_item_id.clone(),
        }
    }

    /// Every table the workbook is expected to carry, for header warmup.
    pub fn all_tables(&self) -> Vec<String> {
        vec![
            self.checkin_table.clone(),
            self.checkout_table.clone(),
            self.leave_table.clone(),
            self.user_table.clone(),
            self.holiday_table.clone(),
            self.weekly_off_table.clone(),
            self.day_off_table.clone(),
        ]
    }
}
