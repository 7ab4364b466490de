//! Write side of the attendance store and the extra-work ledger
//!
//! At most one attendance record exists per staff member and day. Any change to its check-in or
//! check-out sends it back to `pending` approval.

use chrono::{DateTime, FixedOffset, Local, NaiveDate};
use sea_orm::{ActiveValue::{Set, Unchanged}, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{
    entity::{attendance_record, extra_work_entry, prelude::*, sea_orm_active_enums::ApprovalStatus, staff},
    payroll::{find_staff, PayrollError},
    utils,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExtraWork {
    pub description: String,
    pub hours: f64,
    #[serde(deserialize_with = "utils::deserialize_day")]
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    Approve,
    Reject,
}

impl From<ReviewDecision> for ApprovalStatus {
    fn from(decision: ReviewDecision) -> Self {
        match decision {
            ReviewDecision::Approve => ApprovalStatus::Approved,
            ReviewDecision::Reject => ApprovalStatus::Rejected,
        }
    }
}

/// Fractional hours between check-in and check-out
pub fn hours_between(check_in: &DateTime<FixedOffset>, check_out: &DateTime<FixedOffset>) -> Result<f64, PayrollError> {
    if check_out < check_in {
        return Err(PayrollError::validation("check-out time is earlier than check-in time"))
    }

    Ok((*check_out - *check_in).num_milliseconds() as f64 / (1000.0 * 60.0 * 60.0))
}

/// Validates an extra-work entry against `today`, trimming its description
pub fn validate_extra_work(mut work: NewExtraWork, today: NaiveDate) -> Result<NewExtraWork, PayrollError> {
    work.description = work.description.trim().to_string();

    if work.description.is_empty() {
        return Err(PayrollError::validation("description is required"))
    }

    if !work.hours.is_finite() || work.hours <= 0.0 {
        return Err(PayrollError::validation("valid hours must be provided"))
    }

    if work.date > today {
        return Err(PayrollError::validation("cannot record extra work for future dates"))
    }

    Ok(work)
}

async fn find_day_record(
    db: &DatabaseConnection,
    staff: &staff::Model,
    date: NaiveDate,
) -> Result<Option<attendance_record::Model>, PayrollError> {
    let record = AttendanceRecord::find()
        .filter(attendance_record::Column::StaffId.eq(staff.id))
        .filter(attendance_record::Column::Date.eq(date))
        .one(db).await?;

    Ok(record)
}

/// Opens the attendance record for the day of `at`, restarting it if one already exists
pub async fn check_in(
    db: &DatabaseConnection,
    staff_email: &str,
    at: DateTime<FixedOffset>,
) -> Result<attendance_record::Model, PayrollError> {
    let staff = find_staff(db, staff_email).await?;
    let date = utils::day_of(&at);
    let now = Local::now().fixed_offset();

    let record = match find_day_record(db, &staff, date).await? {
        Some(existing) => {
            AttendanceRecord::update(attendance_record::ActiveModel {
                id: Unchanged(existing.id),
                updated_at: Set(now),
                check_in_time: Set(Some(at)),
                check_out_time: Set(None),
                hours_worked: Set(0.0),
                approval_status: Set(ApprovalStatus::Pending),
                approved_by: Set(None),
                approval_note: Set(None),
                ..Default::default()
            }).exec(db).await?
        },
        None => {
            AttendanceRecord::insert(attendance_record::ActiveModel {
                created_at: Set(now),
                updated_at: Set(now),
                staff_id: Set(staff.id),
                date: Set(date),
                check_in_time: Set(Some(at)),
                check_out_time: Set(None),
                hours_worked: Set(0.0),
                approval_status: Set(ApprovalStatus::Pending),
                approved_by: Set(None),
                approval_note: Set(None),
                ..Default::default()
            }).exec_with_returning(db).await?
        },
    };

    info!(staff = %staff.email, %date, "checked in");

    Ok(record)
}

/// Closes the attendance record for the day of `at`
///
/// `hours_override`, when positive, replaces the hours derived from the timestamps.
pub async fn check_out(
    db: &DatabaseConnection,
    staff_email: &str,
    at: DateTime<FixedOffset>,
    hours_override: Option<f64>,
) -> Result<attendance_record::Model, PayrollError> {
    let staff = find_staff(db, staff_email).await?;
    let date = utils::day_of(&at);

    let Some(record) = find_day_record(db, &staff, date).await? else {
        return Err(PayrollError::validation("no check-in record found for today"))
    };

    let Some(check_in_time) = record.check_in_time else {
        return Err(PayrollError::validation("no check-in time found for today"))
    };

    if record.check_out_time.is_some() {
        return Err(PayrollError::validation("already checked out for today"))
    }

    let hours_worked = match hours_override {
        Some(hours) if !hours.is_finite() || hours < 0.0 => {
            return Err(PayrollError::validation("hours worked must be a non-negative number"))
        },
        Some(hours) if hours > 0.0 => hours,
        _ => hours_between(&check_in_time, &at)?,
    };

    let record = AttendanceRecord::update(attendance_record::ActiveModel {
        id: Unchanged(record.id),
        updated_at: Set(Local::now().fixed_offset()),
        check_out_time: Set(Some(at)),
        hours_worked: Set(hours_worked),
        approval_status: Set(ApprovalStatus::Pending),
        approved_by: Set(None),
        approval_note: Set(None),
        ..Default::default()
    }).exec(db).await?;

    info!(staff = %staff.email, %date, hours_worked, "checked out");

    Ok(record)
}

pub async fn add_extra_work(
    db: &DatabaseConnection,
    staff_email: &str,
    work: NewExtraWork,
    today: NaiveDate,
) -> Result<extra_work_entry::Model, PayrollError> {
    let work = validate_extra_work(work, today)?;
    let staff = find_staff(db, staff_email).await?;
    let now = Local::now().fixed_offset();

    let entry = ExtraWorkEntry::insert(extra_work_entry::ActiveModel {
        created_at: Set(now),
        updated_at: Set(now),
        staff_id: Set(staff.id),
        description: Set(work.description),
        hours: Set(work.hours),
        date: Set(work.date),
        ..Default::default()
    }).exec_with_returning(db).await?;

    info!(staff = %staff.email, hours = entry.hours, date = %entry.date, "extra work recorded");

    Ok(entry)
}

/// Manager decision on an attendance record
pub async fn review_attendance(
    db: &DatabaseConnection,
    record_id: Uuid,
    reviewer: Uuid,
    decision: ReviewDecision,
    note: Option<String>,
) -> Result<attendance_record::Model, PayrollError> {
    let Some(record) = AttendanceRecord::find_by_id(record_id).one(db).await? else {
        return Err(PayrollError::not_found(format!("attendance record {record_id}")))
    };

    let record = AttendanceRecord::update(attendance_record::ActiveModel {
        id: Unchanged(record.id),
        updated_at: Set(Local::now().fixed_offset()),
        approval_status: Set(decision.into()),
        approved_by: Set(Some(reviewer)),
        approval_note: Set(note),
        ..Default::default()
    }).exec(db).await?;

    info!(record = %record.id, %reviewer, status = ?record.approval_status, "attendance reviewed");

    Ok(record)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;
    use sea_orm::{DatabaseBackend, MockDatabase};

    use crate::payroll::fixtures::{self, day};

    use super::*;

    fn at(hour: u32, minute: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2025, 1, 15, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_hours_between() {
        assert_eq!(hours_between(&at(8, 0), &at(17, 0)).unwrap(), 9.0);
        assert_eq!(hours_between(&at(8, 15), &at(16, 45)).unwrap(), 8.5);
        assert!(matches!(hours_between(&at(17, 0), &at(8, 0)), Err(PayrollError::Validation(_))));
    }

    #[test]
    fn test_validate_extra_work() {
        let today = day(2025, 1, 20);
        let work = NewExtraWork {
            description: "  Overtime diagnostic work ".to_string(),
            hours: 1.5,
            date: day(2025, 1, 18),
        };

        let valid = validate_extra_work(work.clone(), today).unwrap();
        assert_eq!(valid.description, "Overtime diagnostic work");

        assert!(validate_extra_work(NewExtraWork { date: today, ..work.clone() }, today).is_ok());
        assert!(validate_extra_work(NewExtraWork { date: day(2025, 1, 21), ..work.clone() }, today).is_err());
        assert!(validate_extra_work(NewExtraWork { hours: 0.0, ..work.clone() }, today).is_err());
        assert!(validate_extra_work(NewExtraWork { hours: -2.0, ..work.clone() }, today).is_err());
        assert!(validate_extra_work(NewExtraWork { hours: f64::NAN, ..work.clone() }, today).is_err());
        assert!(validate_extra_work(NewExtraWork { description: "   ".to_string(), ..work }, today).is_err());
    }

    #[actix_web::test]
    async fn test_check_out_computes_hours() {
        let john = fixtures::staff("John", "john@x.com");
        let open = attendance_record::Model {
            check_in_time: Some(at(8, 0)),
            check_out_time: None,
            hours_worked: 0.0,
            ..fixtures::attendance(john.id, day(2025, 1, 15), 0.0)
        };
        let closed = attendance_record::Model {
            check_out_time: Some(at(16, 30)),
            hours_worked: 8.5,
            ..open.clone()
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![john.clone()]])
            .append_query_results([vec![open.clone()]])
            .append_query_results([vec![closed.clone()]])
            .into_connection();

        let record = check_out(&db, &john.email, at(16, 30), None).await.unwrap();
        assert_eq!(record.hours_worked, 8.5);
        assert_eq!(record.approval_status, ApprovalStatus::Pending);
    }

    #[actix_web::test]
    async fn test_check_out_twice() {
        let john = fixtures::staff("John", "john@x.com");
        let closed = fixtures::attendance(john.id, day(2025, 1, 15), 8.0);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![john.clone()]])
            .append_query_results([vec![closed.clone()]])
            .into_connection();

        let result = check_out(&db, &john.email, at(17, 0), None).await;
        assert!(matches!(result, Err(PayrollError::Validation(_))));
    }

    #[actix_web::test]
    async fn test_check_out_without_check_in() {
        let john = fixtures::staff("John", "john@x.com");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![john.clone()]])
            .append_query_results([Vec::<attendance_record::Model>::new()])
            .into_connection();

        let result = check_out(&db, &john.email, at(17, 0), None).await;
        assert!(matches!(result, Err(PayrollError::Validation(_))));
    }

    #[actix_web::test]
    async fn test_check_in_restarts_existing_day() {
        let john = fixtures::staff("John", "john@x.com");
        let approved = attendance_record::Model {
            approval_status: ApprovalStatus::Approved,
            ..fixtures::attendance(john.id, day(2025, 1, 15), 8.0)
        };
        let restarted = attendance_record::Model {
            check_in_time: Some(at(9, 0)),
            check_out_time: None,
            hours_worked: 0.0,
            approval_status: ApprovalStatus::Pending,
            ..approved.clone()
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![john.clone()]])
            .append_query_results([vec![approved.clone()]])
            .append_query_results([vec![restarted.clone()]])
            .into_connection();

        let record = check_in(&db, &john.email, at(9, 0)).await.unwrap();
        assert_eq!(record.id, approved.id);
        assert_eq!(record.approval_status, ApprovalStatus::Pending);

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("UPDATE"));
        assert!(!log.contains("INSERT"));
    }

    #[actix_web::test]
    async fn test_add_extra_work_rejects_before_touching_store() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let work = NewExtraWork {
            description: "Weekend service planning".to_string(),
            hours: 2.0,
            date: day(2025, 1, 25),
        };
        let result = add_extra_work(&db, "john@x.com", work, day(2025, 1, 20)).await;

        assert!(matches!(result, Err(PayrollError::Validation(_))));
        assert!(db.into_transaction_log().is_empty());
    }
}
