//! Restaurant catalogue entity.
//!
//! Read-mostly: the aggregate rating and review count are maintained by an
//! external ingestion process and are never recomputed here.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A restaurant as listed in the catalogue.
#[derive(Debug, Clone, PartialEq)]
pub struct Restaurant {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    /// One or more category labels, e.g. "Coffee", "Ramen".
    pub categories: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Aggregate rating in `[0, 5]`, maintained externally.
    pub rating: f32,
    /// Aggregate review count, maintained externally.
    pub review_count: i64,
    pub image_path: String,
    /// Free-form operating-hours text, e.g. "10.00 - 22.00".
    pub opening_hours: String,
    pub created_at: DateTime<Utc>,
}
