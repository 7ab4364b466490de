use std::fmt;

use actix_web::{body, http::{header::ContentType, StatusCode}, HttpResponse};
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::entity::sea_orm_active_enums::SalaryStatus;

#[derive(Debug, Error)]
pub enum PayrollError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("cannot {operation} salary record {id} while it is {status:?}")]
    InvalidState {
        id: Uuid,
        status: SalaryStatus,
        operation: RecordOperation,
    },

    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl PayrollError {
    pub(crate) fn not_found(what: impl fmt::Display) -> Self {
        Self::NotFound(format!("{what} not found"))
    }

    pub(crate) fn validation(reason: impl Into<String>) -> Self {
        Self::Validation(reason.into())
    }
}

/// Mutations a salary record can go through, checked against its status before they happen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOperation {
    Recalculate,
    Update,
    Approve,
    Pay,
    Delete,
}

impl fmt::Display for RecordOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RecordOperation::Recalculate => "recalculate",
            RecordOperation::Update => "update",
            RecordOperation::Approve => "approve",
            RecordOperation::Pay => "pay",
            RecordOperation::Delete => "delete",
        })
    }
}

impl actix_web::error::ResponseError for PayrollError {
    fn error_response(&self) -> HttpResponse<body::BoxBody> {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::plaintext())
            .body(self.to_string())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            PayrollError::NotFound(_) => StatusCode::NOT_FOUND,
            PayrollError::Validation(_) => StatusCode::BAD_REQUEST,
            PayrollError::InvalidState { .. } => StatusCode::CONFLICT,
            PayrollError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::ResponseError as _;

    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(PayrollError::not_found("staff member x@y.com").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(PayrollError::validation("bad range").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            PayrollError::InvalidState { id: Uuid::nil(), status: SalaryStatus::Paid, operation: RecordOperation::Delete }.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(PayrollError::from(DbErr::Custom("boom".into())).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_invalid_state_message() {
        let error = PayrollError::InvalidState {
            id: Uuid::nil(),
            status: SalaryStatus::Paid,
            operation: RecordOperation::Approve,
        };

        assert_eq!(error.to_string(), format!("cannot approve salary record {} while it is Paid", Uuid::nil()));
    }
}
