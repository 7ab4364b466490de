//! Persisted salary records and their draft → approved → paid lifecycle

use chrono::Local;
use sea_orm::{
    ActiveValue::{Set, Unchanged}, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::{
    consts::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT},
    entity::{prelude::*, salary_record, sea_orm_active_enums::SalaryStatus, staff},
};

use super::{
    calculation::{breakdown_for, find_identity, find_staff}, ledger, BankDetails, PayPeriod, Pagination, Payment,
    PayrollError, RecordOperation, SalaryBreakdown, SalaryRates, SalaryRecordFilter, SalaryRecordPage,
    SalaryRecordUpdate,
};

impl RecordOperation {
    pub fn permitted_from(self, status: SalaryStatus) -> bool {
        match self {
            RecordOperation::Recalculate | RecordOperation::Approve => status == SalaryStatus::Draft,
            RecordOperation::Pay => status == SalaryStatus::Approved,
            RecordOperation::Update | RecordOperation::Delete => status != SalaryStatus::Paid,
        }
    }
}

pub(super) fn ensure_permitted(record: &salary_record::Model, operation: RecordOperation) -> Result<(), PayrollError> {
    if operation.permitted_from(record.status) {
        return Ok(())
    }

    Err(PayrollError::InvalidState {
        id: record.id,
        status: record.status,
        operation,
    })
}

/// Calculates and stores a staff member's salary for `period`
///
/// One record exists per staff identity and period. Recalculating overwrites the figures of a
/// draft record and leaves its status and audit fields alone.
pub async fn create_or_update_record(
    db: &DatabaseConnection,
    rates: &SalaryRates,
    staff_email: &str,
    period: PayPeriod,
    actor: Uuid,
) -> Result<salary_record::Model, PayrollError> {
    let staff = find_staff(db, staff_email).await?;

    upsert_for_staff(db, rates, &staff, period, actor).await
}

pub(super) async fn upsert_for_staff(
    db: &DatabaseConnection,
    rates: &SalaryRates,
    staff: &staff::Model,
    period: PayPeriod,
    actor: Uuid,
) -> Result<salary_record::Model, PayrollError> {
    let breakdown = breakdown_for(db, rates, staff, period).await?;
    let identity = find_identity(db, &staff.email).await?;

    let existing = SalaryRecord::find()
        .filter(salary_record::Column::StaffId.eq(identity.id))
        .filter(salary_record::Column::PeriodStart.eq(period.start_date))
        .filter(salary_record::Column::PeriodEnd.eq(period.end_date))
        .one(db).await?;

    let now = Local::now().fixed_offset();

    match existing {
        Some(record) => {
            ensure_permitted(&record, RecordOperation::Recalculate)?;

            let mut model = salary_record::ActiveModel {
                id: Unchanged(record.id),
                updated_at: Set(now),
                ..Default::default()
            };
            apply_breakdown(&mut model, &breakdown);

            let record = update_guarded(db, &record, RecordOperation::Recalculate, model).await?;
            info!(record = %record.id, staff = %staff.email, "salary record recalculated");

            Ok(record)
        },
        None => {
            let mut model = salary_record::ActiveModel {
                created_at: Set(now),
                updated_at: Set(now),
                created_by: Set(Some(actor)),
                staff_id: Set(identity.id),
                staff_name: Set(staff.name.clone()),
                staff_role: Set(staff.role.clone()),
                period_start: Set(period.start_date),
                period_end: Set(period.end_date),
                status: Set(SalaryStatus::Draft),
                notes: Set(Some(calculation_note(&breakdown))),
                ..Default::default()
            };
            apply_breakdown(&mut model, &breakdown);

            let record = SalaryRecord::insert(model)
                .exec_with_returning(db).await?;
            info!(record = %record.id, staff = %staff.email, "salary record created");

            Ok(record)
        },
    }
}

fn apply_breakdown(model: &mut salary_record::ActiveModel, breakdown: &SalaryBreakdown) {
    model.hourly_rate = Set(breakdown.rates.regular_hourly_rate);
    model.overtime_rate = Set(breakdown.rates.overtime_multiplier());
    model.regular_hours = Set(breakdown.hours.regular_hours);
    model.overtime_hours = Set(breakdown.hours.overtime_hours);
    model.regular_pay = Set(breakdown.earnings.regular_pay);
    model.overtime_pay = Set(breakdown.earnings.overtime_pay);
    model.gross_salary = Set(breakdown.earnings.gross_salary);
    model.epf_employee = Set(breakdown.deductions.epf_employee);
    model.epf_employer = Set(breakdown.deductions.epf_employer);
    model.etf = Set(breakdown.deductions.etf);
    model.total_deductions = Set(breakdown.deductions.total_deductions);
    model.net_salary = Set(breakdown.net_salary);
}

fn apply_bank_details(model: &mut salary_record::ActiveModel, bank_details: BankDetails) {
    model.bank_account_number = Set(bank_details.account_number);
    model.bank_name = Set(bank_details.bank_name);
    model.bank_branch = Set(bank_details.branch);
}

fn calculation_note(breakdown: &SalaryBreakdown) -> String {
    format!(
        "Calculated from attendance and extra work data. Regular hours: {}h @ {}/h, Overtime hours: {}h @ {}/h",
        breakdown.hours.regular_hours,
        breakdown.rates.regular_hourly_rate,
        breakdown.hours.overtime_hours,
        breakdown.rates.overtime_hourly_rate,
    )
}

pub async fn get_record(db: &DatabaseConnection, id: Uuid) -> Result<salary_record::Model, PayrollError> {
    SalaryRecord::find_by_id(id)
        .one(db).await?
        .ok_or_else(|| PayrollError::not_found(format!("salary record {id}")))
}

pub async fn list_records(
    db: &DatabaseConnection,
    filter: &SalaryRecordFilter,
) -> Result<SalaryRecordPage<salary_record::Model>, PayrollError> {
    let page = filter.page.unwrap_or(1).max(1);
    let limit = filter.limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT);
    if (page - 1).checked_mul(limit).is_none() {
        return Err(PayrollError::validation(format!("page {page} is out of range")))
    }

    let mut condition = Condition::all();
    if let Some(status) = filter.status {
        condition = condition.add(salary_record::Column::Status.eq(status));
    }
    if let Some(staff_id) = filter.staff_id {
        condition = condition.add(salary_record::Column::StaffId.eq(staff_id));
    }
    if let Some(period_start) = filter.period_start {
        condition = condition.add(salary_record::Column::PeriodStart.gte(period_start));
    }
    if let Some(period_end) = filter.period_end {
        condition = condition.add(salary_record::Column::PeriodEnd.lte(period_end));
    }

    let paginator = SalaryRecord::find()
        .filter(condition)
        .order_by_desc(salary_record::Column::CreatedAt)
        .paginate(db, limit);

    let total = paginator.num_items().await?;
    let records = paginator.fetch_page(page - 1).await?;

    Ok(SalaryRecordPage {
        records,
        pagination: Pagination {
            current: page,
            pages: page_count(total, limit),
            total,
        },
    })
}

pub(super) fn page_count(total: u64, limit: u64) -> u64 {
    total.div_ceil(limit.max(1))
}

/// Reads a record and holds its row lock until the surrounding transaction ends
async fn lock_record<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<salary_record::Model, PayrollError> {
    SalaryRecord::find_by_id(id)
        .lock_exclusive()
        .one(db).await?
        .ok_or_else(|| PayrollError::not_found(format!("salary record {id}")))
}

/// Writes `model` only while the row still has the status `record` was read with
async fn update_guarded<C: ConnectionTrait>(
    db: &C,
    record: &salary_record::Model,
    operation: RecordOperation,
    model: salary_record::ActiveModel,
) -> Result<salary_record::Model, PayrollError> {
    SalaryRecord::update(model)
        .filter(salary_record::Column::Status.eq(record.status))
        .exec(db).await
        .map_err(|error| match error {
            DbErr::RecordNotUpdated => PayrollError::InvalidState {
                id: record.id,
                status: record.status,
                operation,
            },
            error => error.into(),
        })
}

pub async fn update_record(
    db: &DatabaseConnection,
    id: Uuid,
    update: SalaryRecordUpdate,
) -> Result<salary_record::Model, PayrollError> {
    let txn = db.begin().await?;
    let record = lock_record(&txn, id).await?;
    ensure_permitted(&record, RecordOperation::Update)?;

    let mut model = salary_record::ActiveModel {
        id: Unchanged(record.id),
        updated_at: Set(Local::now().fixed_offset()),
        ..Default::default()
    };
    if let Some(notes) = update.notes {
        model.notes = Set(Some(notes));
    }
    if let Some(payment_method) = update.payment_method {
        model.payment_method = Set(Some(payment_method));
    }
    if let Some(bank_details) = update.bank_details {
        apply_bank_details(&mut model, bank_details);
    }

    let record = update_guarded(&txn, &record, RecordOperation::Update, model).await?;
    txn.commit().await?;
    info!(record = %record.id, "salary record updated");

    Ok(record)
}

pub async fn approve_record(db: &DatabaseConnection, id: Uuid, actor: Uuid) -> Result<salary_record::Model, PayrollError> {
    let txn = db.begin().await?;
    let record = lock_record(&txn, id).await?;
    ensure_permitted(&record, RecordOperation::Approve)?;

    let now = Local::now().fixed_offset();
    let record = update_guarded(&txn, &record, RecordOperation::Approve, salary_record::ActiveModel {
        id: Unchanged(record.id),
        status: Set(SalaryStatus::Approved),
        approved_by: Set(Some(actor)),
        approved_at: Set(Some(now)),
        updated_at: Set(now),
        ..Default::default()
    }).await?;
    txn.commit().await?;
    info!(record = %record.id, %actor, "salary record approved");

    Ok(record)
}

/// Marks an approved record as paid and posts the payment to the ledger in one transaction
///
/// The record stays locked from the status check until the ledger postings commit, so a
/// record is paid, and booked, at most once.
pub async fn pay_record(
    db: &DatabaseConnection,
    id: Uuid,
    actor: Uuid,
    payment: Payment,
) -> Result<salary_record::Model, PayrollError> {
    let txn = db.begin().await?;
    let record = lock_record(&txn, id).await?;
    ensure_permitted(&record, RecordOperation::Pay)?;

    let now = Local::now().fixed_offset();
    let mut model = salary_record::ActiveModel {
        id: Unchanged(record.id),
        status: Set(SalaryStatus::Paid),
        paid_by: Set(Some(actor)),
        paid_at: Set(Some(now)),
        payment_method: Set(Some(payment.payment_method.unwrap_or_default())),
        updated_at: Set(now),
        ..Default::default()
    };
    apply_bank_details(&mut model, payment.bank_details.unwrap_or_default());

    let record = update_guarded(&txn, &record, RecordOperation::Pay, model).await?;
    let posted = ledger::post_salary_payment(&txn, &record, now).await?;
    txn.commit().await?;

    info!(record = %record.id, %actor, ledger_entries = posted, "salary record paid");

    Ok(record)
}

pub async fn delete_record(db: &DatabaseConnection, id: Uuid) -> Result<(), PayrollError> {
    let txn = db.begin().await?;
    let record = lock_record(&txn, id).await?;
    ensure_permitted(&record, RecordOperation::Delete)?;

    SalaryRecord::delete_by_id(record.id)
        .exec(&txn).await?;
    txn.commit().await?;
    info!(record = %record.id, "salary record deleted");

    Ok(())
}
