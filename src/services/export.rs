//! CSV export service
//!
//! Exports are plain comma-joined rows prefixed with a UTF-8 BOM so
//! spreadsheet tools detect the encoding.

use crate::{
    error::{AppError, AppResult},
    models::{enums::EquipmentStatus, equipment::Equipment, loan::LoanDetails},
};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Clone)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// Export the equipment inventory as CSV bytes
    pub fn equipment_csv(&self, equipment: &[Equipment]) -> AppResult<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record([
                "id",
                "name",
                "inventory_number",
                "brand",
                "model",
                "status",
                "location",
            ])
            .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;

        for item in equipment {
            writer
                .write_record([
                    item.id.to_string(),
                    item.name.clone(),
                    item.inventory_number.clone(),
                    item.brand.clone().unwrap_or_default(),
                    item.model.clone().unwrap_or_default(),
                    EquipmentStatus::from(item.status).to_string(),
                    item.location.clone().unwrap_or_default(),
                ])
                .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;
        }

        Self::finish(writer)
    }

    /// Export loans (with overdue decoration) as CSV bytes
    pub fn loans_csv(&self, loans: &[LoanDetails]) -> AppResult<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record([
                "id",
                "borrower",
                "equipment",
                "inventory_number",
                "start_date",
                "end_date",
                "status",
                "overdue",
                "days_overdue",
            ])
            .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;

        for loan in loans {
            writer
                .write_record([
                    loan.id.to_string(),
                    loan.user_name.clone(),
                    loan.equipment_name.clone(),
                    loan.inventory_number.clone(),
                    loan.start_date.to_string(),
                    loan.end_date.to_string(),
                    crate::models::enums::LoanStatus::from(loan.status).to_string(),
                    loan.is_overdue.to_string(),
                    loan.days_overdue.map(|d| d.to_string()).unwrap_or_default(),
                ])
                .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;
        }

        Self::finish(writer)
    }

    fn finish(writer: csv::Writer<Vec<u8>>) -> AppResult<Vec<u8>> {
        let data = writer
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;
        let mut out = Vec::with_capacity(UTF8_BOM.len() + data.len());
        out.extend_from_slice(UTF8_BOM);
        out.extend_from_slice(&data);
        Ok(out)
    }
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_equipment() -> Equipment {
        Equipment {
            id: 1,
            name: "ThinkPad X1".to_string(),
            inventory_number: "NB-0001".to_string(),
            brand: Some("Lenovo".to_string()),
            model: Some("X1 Carbon".to_string()),
            category_id: None,
            status: 0,
            location: Some("Room 101".to_string()),
            image_url: None,
            crea_date: None,
            modif_date: None,
        }
    }

    #[test]
    fn equipment_csv_starts_with_bom() {
        let out = ExportService::new()
            .equipment_csv(&[sample_equipment()])
            .unwrap();
        assert!(out.starts_with(b"\xEF\xBB\xBF"));
    }

    #[test]
    fn equipment_csv_contains_rows() {
        let out = ExportService::new()
            .equipment_csv(&[sample_equipment()])
            .unwrap();
        let text = String::from_utf8(out[3..].to_vec()).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "id,name,inventory_number,brand,model,status,location"
        );
        assert_eq!(
            lines.next().unwrap(),
            "1,ThinkPad X1,NB-0001,Lenovo,X1 Carbon,ready,Room 101"
        );
    }
}
