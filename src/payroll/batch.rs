//! Best-effort runs over every staff member
//!
//! One staff member failing never aborts the run: the failure is logged, kept in the
//! outcome next to the successes, and the loop moves on.

use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{entity::{prelude::*, salary_record, staff}, utils};

use super::{
    calculation::{breakdown_for, find_identity}, record::upsert_for_staff, PayPeriod, PayrollError, SalaryBreakdown,
    SalaryRates,
};

#[derive(Debug, Serialize)]
pub struct BatchOutcome<T> {
    pub succeeded: Vec<T>,
    pub failed: Vec<BatchFailure>,
}

#[derive(Debug, Serialize)]
pub struct BatchFailure {
    pub staff_email: String,
    #[serde(rename = "reason", serialize_with = "utils::serialize_display")]
    pub error: PayrollError,
}

impl<T> BatchOutcome<T> {
    /// Every staff member produced a result
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

impl<T> FromIterator<(String, Result<T, PayrollError>)> for BatchOutcome<T> {
    fn from_iter<I: IntoIterator<Item = (String, Result<T, PayrollError>)>>(iter: I) -> Self {
        let mut outcome = BatchOutcome { succeeded: Vec::new(), failed: Vec::new() };

        for (staff_email, result) in iter {
            match result {
                Ok(value) => outcome.succeeded.push(value),
                Err(error) => outcome.failed.push(BatchFailure { staff_email, error }),
            }
        }

        outcome
    }
}

/// Previews every staff member's salary for `period`
///
/// Staff without an account identity are reported as failures, since no record could be
/// stored for them.
pub async fn calculate_all(
    db: &DatabaseConnection,
    rates: &SalaryRates,
    period: PayPeriod,
) -> Result<BatchOutcome<SalaryBreakdown>, PayrollError> {
    let all_staff = all_staff(db).await?;
    let mut results = Vec::with_capacity(all_staff.len());

    for staff in all_staff {
        let result = match find_identity(db, &staff.email).await {
            Ok(_) => breakdown_for(db, rates, &staff, period).await,
            Err(error) => Err(error),
        };

        if let Err(error) = &result {
            warn!(staff = %staff.email, %error, "skipping salary calculation");
        }

        results.push((staff.email, result));
    }

    let outcome = results.into_iter().collect::<BatchOutcome<_>>();
    info!(attempted = outcome.attempted(), failed = outcome.failed.len(), complete = outcome.is_complete(), "calculated salaries for all staff");

    Ok(outcome)
}

/// Creates or recalculates the salary record of every staff member for `period`
///
/// Re-running it for the same period updates the existing drafts instead of duplicating them.
pub async fn create_all_records(
    db: &DatabaseConnection,
    rates: &SalaryRates,
    period: PayPeriod,
    actor: Uuid,
) -> Result<BatchOutcome<salary_record::Model>, PayrollError> {
    let all_staff = all_staff(db).await?;
    let mut results = Vec::with_capacity(all_staff.len());

    for staff in all_staff {
        let result = upsert_for_staff(db, rates, &staff, period, actor).await;

        if let Err(error) = &result {
            warn!(staff = %staff.email, %error, "skipping salary record");
        }

        results.push((staff.email, result));
    }

    let outcome = results.into_iter().collect::<BatchOutcome<_>>();
    info!(attempted = outcome.attempted(), failed = outcome.failed.len(), complete = outcome.is_complete(), "stored salary records for all staff");

    Ok(outcome)
}

async fn all_staff(db: &DatabaseConnection) -> Result<Vec<staff::Model>, PayrollError> {
    let all_staff = Staff::find()
        .order_by_asc(staff::Column::Email)
        .all(db).await?;

    Ok(all_staff)
}
