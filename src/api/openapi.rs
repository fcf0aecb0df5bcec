//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    equipment, evaluations, export, health, loans, reservations, special_loans, stats, users,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Equiplend API",
        version = "1.0.0",
        description = "University Equipment Loan and Reservation REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::batch_create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        equipment::list_categories,
        // Loans
        loans::list_loans,
        loans::list_overdue_loans,
        loans::get_user_loans,
        loans::create_loan,
        loans::approve_loan,
        loans::reject_loan,
        loans::return_loan,
        // Reservations
        reservations::list_reservations,
        reservations::get_reservation,
        reservations::create_reservation,
        reservations::approve_reservation,
        reservations::reject_reservation,
        reservations::mark_reservation_ready,
        reservations::convert_reservation,
        reservations::cancel_reservation,
        reservations::expire_sweep,
        // Special loans
        special_loans::list_special_loans,
        special_loans::get_special_loan,
        special_loans::check_conflicts,
        special_loans::create_special_loan,
        special_loans::return_special_loan,
        special_loans::cancel_special_loan,
        // Evaluations
        evaluations::list_evaluations,
        evaluations::evaluation_summary,
        evaluations::create_evaluation,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        // Export
        export::export_equipment,
        export::export_loans,
        // Stats
        stats::get_stats,
    ),
    components(
        schemas(
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::Category,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            crate::models::equipment::BatchCreateEquipment,
            crate::models::equipment::BatchRejection,
            crate::models::equipment::BatchCreateReport,
            // Loans
            crate::models::loan::LoanRequest,
            crate::models::loan::LoanDetails,
            crate::models::loan::CreateLoanRequest,
            crate::models::loan::RejectLoan,
            crate::models::loan::ReturnLoan,
            // Reservations
            crate::models::reservation::Reservation,
            crate::models::reservation::CreateReservation,
            crate::models::reservation::RejectReservation,
            crate::models::reservation::CancelReservation,
            reservations::ConvertResponse,
            reservations::ExpireSweepResponse,
            // Special loans
            crate::models::special_loan::SpecialLoan,
            crate::models::special_loan::CreateSpecialLoan,
            crate::models::special_loan::ConflictCheckRequest,
            crate::models::special_loan::ConflictCheckResponse,
            crate::models::special_loan::SpecialLoanConflict,
            // Evaluations
            crate::models::evaluation::Evaluation,
            crate::models::evaluation::CreateEvaluation,
            crate::models::evaluation::EvaluationSummary,
            // Users
            crate::models::user::User,
            crate::models::user::CreateUser,
            // Stats
            crate::services::stats::StatsResponse,
            crate::services::stats::EquipmentStats,
            crate::services::stats::LoanStats,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "equipment", description = "Equipment inventory management"),
        (name = "loans", description = "Loan request management"),
        (name = "reservations", description = "Reservation lifecycle"),
        (name = "special-loans", description = "Bulk lecturer loans"),
        (name = "evaluations", description = "Loan evaluations"),
        (name = "users", description = "User management"),
        (name = "export", description = "CSV exports"),
        (name = "stats", description = "Statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
