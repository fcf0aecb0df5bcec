//! Equipment service

use std::collections::HashSet;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::equipment::{
        BatchCreateEquipment, BatchCreateReport, BatchRejection, Category, CreateEquipment,
        Equipment, UpdateEquipment,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, status: Option<i16>) -> AppResult<Vec<Equipment>> {
        self.repository.equipment.list(status).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        data.validate()?;
        if self
            .repository
            .equipment
            .inventory_number_exists(&data.inventory_number)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Inventory number '{}' already exists",
                data.inventory_number
            )));
        }
        self.repository.equipment.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        self.repository.equipment.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.equipment.delete(id).await
    }

    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.repository.equipment.list_categories().await
    }

    /// Create one record per inventory number from a shared template.
    ///
    /// Duplicates (against existing records or earlier numbers in the same
    /// batch) are rejected individually; the batch continues past failures
    /// and reports a success count plus per-number rejection reasons.
    pub async fn batch_create(&self, data: &BatchCreateEquipment) -> AppResult<BatchCreateReport> {
        data.validate()?;

        let mut created = 0;
        let mut rejected = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for raw in &data.inventory_numbers {
            let number = raw.trim();
            if number.is_empty() {
                rejected.push(BatchRejection {
                    inventory_number: raw.clone(),
                    reason: "Empty inventory number".to_string(),
                });
                continue;
            }
            if !seen.insert(number.to_string()) {
                rejected.push(BatchRejection {
                    inventory_number: number.to_string(),
                    reason: "Duplicate within batch".to_string(),
                });
                continue;
            }
            if self
                .repository
                .equipment
                .inventory_number_exists(number)
                .await?
            {
                rejected.push(BatchRejection {
                    inventory_number: number.to_string(),
                    reason: "Inventory number already exists".to_string(),
                });
                continue;
            }

            let item = CreateEquipment {
                name: data.name.clone(),
                inventory_number: number.to_string(),
                brand: data.brand.clone(),
                model: data.model.clone(),
                category_id: data.category_id,
                location: data.location.clone(),
                image_url: None,
            };
            match self.repository.equipment.create(&item).await {
                Ok(_) => created += 1,
                Err(e) => {
                    // Keep going: the batch is at-least-once, not atomic
                    tracing::warn!("Batch create failed for '{}': {}", number, e);
                    rejected.push(BatchRejection {
                        inventory_number: number.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(BatchCreateReport { created, rejected })
    }
}
