//! Equipment repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::EquipmentStatus,
        equipment::{Category, CreateEquipment, Equipment, UpdateEquipment},
    },
};

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all equipment, optionally filtered by status
    pub async fn list(&self, status: Option<i16>) -> AppResult<Vec<Equipment>> {
        let rows = match status {
            Some(s) => {
                sqlx::query_as::<_, Equipment>(
                    "SELECT * FROM equipment WHERE status = $1 ORDER BY name, inventory_number",
                )
                .bind(s)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Equipment>(
                    "SELECT * FROM equipment ORDER BY name, inventory_number",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Whether an inventory number is already registered
    pub async fn inventory_number_exists(&self, inventory_number: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM equipment WHERE inventory_number = $1)",
        )
        .bind(inventory_number)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Create equipment
    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        let row = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (name, inventory_number, brand, model, category_id, status, location, image_url, crea_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.inventory_number)
        .bind(&data.brand)
        .bind(&data.model)
        .bind(data.category_id)
        .bind(i16::from(EquipmentStatus::Ready))
        .bind(&data.location)
        .bind(&data.image_url)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update equipment
    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        let now = Utc::now();
        let mut sets = vec!["modif_date = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.inventory_number, "inventory_number");
        add_field!(data.brand, "brand");
        add_field!(data.model, "model");
        add_field!(data.category_id, "category_id");
        add_field!(data.status, "status");
        add_field!(data.location, "location");
        add_field!(data.image_url, "image_url");

        let query = format!(
            "UPDATE equipment SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Equipment>(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.inventory_number);
        bind_field!(data.brand);
        bind_field!(data.model);
        bind_field!(data.category_id);
        bind_field!(data.status);
        bind_field!(data.location);
        bind_field!(data.image_url);

        builder = builder.bind(id);

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Set equipment status (loan/return/maintenance actions)
    pub async fn set_status(&self, id: i32, status: EquipmentStatus) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE equipment SET status = $1, modif_date = $2 WHERE id = $3",
        )
        .bind(i16::from(status))
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment {} not found", id)));
        }
        Ok(())
    }

    /// Delete equipment
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment {} not found", id)));
        }
        Ok(())
    }

    /// List categories
    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Count equipment by status (for stats)
    pub async fn count_by_status(&self, status: EquipmentStatus) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM equipment WHERE status = $1")
            .bind(i16::from(status))
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
