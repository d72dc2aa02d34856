use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Lifecycle of a reconciled visit.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ActivityStatus {
    /// Check-in recorded, no checkout yet.
    #[default]
    Ongoing,
    /// Checkout with no matching check-in ever recorded.
    Incomplete,
    /// Check-in completed by a matching checkout.
    Completed,
}

/// One visit to one location by one person on one date, reconciled from the
/// independently appended check-in and check-out tables. Never persisted;
/// rebuilt on every query.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "date": "2025-06-16",
    "checkinTime": "03:00",
    "checkoutTime": "04:00",
    "location": "Store1",
    "detail": "restock visit",
    "status": "completed",
    "name": "Anan K.",
    "email": "a@x.com",
    "district": "Bang Rak",
    "group": "BKK-1",
    "imageIn": "",
    "imageOut": "",
    "checkinGps": "13.7563, 100.5018",
    "checkoutGps": "13.7564, 100.5019",
    "distanceKm": 0.018
}))]
pub struct ActivityRecord {
    #[schema(example = "2025-06-16")]
    pub date: String,
    /// "HH:MM", empty when the row carried no parsable timestamp.
    #[schema(example = "03:00")]
    pub checkin_time: String,
    #[schema(example = "04:00")]
    pub checkout_time: String,
    #[schema(example = "Store1")]
    pub location: String,
    pub detail: String,
    pub status: ActivityStatus,
    pub name: String,
    pub email: String,
    pub district: String,
    pub group: String,
    pub image_in: String,
    pub image_out: String,
    pub checkin_gps: String,
    pub checkout_gps: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkin_lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkin_lon: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_lon: Option<f64>,
    /// Haversine distance between the two GPS fixes, 3 decimals.
    /// Only present when both fixes parse.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl ActivityRecord {
    pub fn checkin_coord(&self) -> Option<(f64, f64)> {
        Some((self.checkin_lat?, self.checkin_lon?))
    }

    pub fn checkout_coord(&self) -> Option<(f64, f64)> {
        Some((self.checkout_lat?, self.checkout_lon?))
    }
}
