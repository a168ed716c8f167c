//! CSV export for the report collaborator

use rust_decimal::Decimal;

use core_kernel::Role;
use domain_claims::ReportRow;
use domain_users::User;

use crate::error::ApiError;

/// Renders the approved-claims report with a grand-total line
pub fn report_rows_csv(rows: &[ReportRow]) -> Result<Vec<u8>, ApiError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["Lecturer", "Email", "Total Hours", "Total Amount"])
        .map_err(csv_fault)?;

    let mut grand_hours: u64 = 0;
    let mut grand_amount = Decimal::ZERO;
    for row in rows {
        writer
            .write_record(&[
                row.lecturer_name.clone(),
                row.email.clone(),
                row.total_hours.to_string(),
                row.total_amount.to_string(),
            ])
            .map_err(csv_fault)?;
        grand_hours += row.total_hours;
        grand_amount += row.total_amount;
    }

    writer
        .write_record(&[
            "TOTAL".to_string(),
            String::new(),
            grand_hours.to_string(),
            grand_amount.to_string(),
        ])
        .map_err(csv_fault)?;

    finish(writer)
}

/// Renders the lecturer directory listing
pub fn lecturers_csv(users: &[User]) -> Result<Vec<u8>, ApiError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["Name", "Email", "Role", "HourlyRate"])
        .map_err(csv_fault)?;

    for user in users.iter().filter(|u| u.role == Role::Lecturer) {
        writer
            .write_record(&[
                user.name.clone(),
                user.email.clone(),
                user.role.to_string(),
                user.hourly_rate.to_string(),
            ])
            .map_err(csv_fault)?;
    }

    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>, ApiError> {
    writer
        .into_inner()
        .map_err(|e| ApiError::Internal(format!("csv export failed: {e}")))
}

fn csv_fault(err: csv::Error) -> ApiError {
    ApiError::Internal(format!("csv export failed: {err}"))
}
