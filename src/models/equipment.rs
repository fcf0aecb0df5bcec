//! Equipment inventory models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Equipment record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i32,
    /// Display name (e.g. "ThinkPad X1 Carbon")
    pub name: String,
    /// Unique inventory number / asset tag
    pub inventory_number: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub category_id: Option<i32>,
    /// Status (0=ready, 1=borrowed, 2=maintenance, 3=retired)
    pub status: i16,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// Equipment category
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: i32,
    pub name: String,
}

/// Create equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Inventory number is required"))]
    pub inventory_number: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub category_id: Option<i32>,
    pub location: Option<String>,
    pub image_url: Option<String>,
}

/// Update equipment request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateEquipment {
    pub name: Option<String>,
    pub inventory_number: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub category_id: Option<i32>,
    /// Status (0=ready, 1=borrowed, 2=maintenance, 3=retired)
    pub status: Option<i16>,
    pub location: Option<String>,
    pub image_url: Option<String>,
}

/// Batch equipment creation request: one record per inventory number,
/// all sharing the same name/brand/model template.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BatchCreateEquipment {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub category_id: Option<i32>,
    pub location: Option<String>,
    #[validate(length(min = 1, message = "At least one inventory number is required"))]
    pub inventory_numbers: Vec<String>,
}

/// Per-number rejection in a batch creation
#[derive(Debug, Serialize, ToSchema)]
pub struct BatchRejection {
    pub inventory_number: String,
    pub reason: String,
}

/// Batch creation outcome: created count plus per-number rejections
#[derive(Debug, Serialize, ToSchema)]
pub struct BatchCreateReport {
    pub created: usize,
    pub rejected: Vec<BatchRejection>,
}
