//! CSV export endpoints

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
};

use crate::error::AppResult;

use super::AuthenticatedUser;

fn csv_headers(filename: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    if let Ok(value) =
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
    {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }
    headers
}

/// Export the equipment inventory as CSV
#[utoipa::path(
    get,
    path = "/export/equipment.csv",
    tag = "export",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "CSV file", content_type = "text/csv")
    )
)]
pub async fn export_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<(HeaderMap, Vec<u8>)> {
    claims.require_staff()?;
    let equipment = state.services.equipment.list(None).await?;
    let csv = state.services.export.equipment_csv(&equipment)?;
    Ok((csv_headers("equipment.csv"), csv))
}

/// Export all loans as CSV
#[utoipa::path(
    get,
    path = "/export/loans.csv",
    tag = "export",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "CSV file", content_type = "text/csv")
    )
)]
pub async fn export_loans(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<(HeaderMap, Vec<u8>)> {
    claims.require_staff()?;
    let loans = state.services.loans.list(None).await?;
    let csv = state.services.export.loans_csv(&loans)?;
    Ok((csv_headers("loans.csv"), csv))
}
