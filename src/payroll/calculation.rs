use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::debug;

use crate::entity::{attendance_record, extra_work_entry, prelude::*, staff, user};

use super::{
    AttendanceDetail, BreakdownDeductions, BreakdownEarnings, BreakdownHours, ExtraWorkDetail, PayPeriod,
    PayrollError, SalaryBreakdown, SalaryRates, StaffInfo,
};

/// Reduces attendance and extra work inside `period` into a pay breakdown
///
/// Records outside the period are ignored, so callers may pass a staff member's full history.
/// EPF and ETF are rounded to whole units; pay, gross and net keep their fractional part.
pub fn calculate(
    staff: &staff::Model,
    attendance: &[attendance_record::Model],
    extra_work: &[extra_work_entry::Model],
    period: PayPeriod,
    rates: &SalaryRates,
) -> SalaryBreakdown {
    let attendance_details = attendance.iter()
        .filter(|record| period.contains(record.date))
        .map(|record| AttendanceDetail {
            date: record.date,
            check_in: record.check_in_time,
            check_out: record.check_out_time,
            hours_worked: record.hours_worked,
            pay: record.hours_worked * rates.regular_hourly_rate,
        })
        .collect::<Vec<_>>();

    let extra_work_details = extra_work.iter()
        .filter(|work| period.contains(work.date))
        .map(|work| ExtraWorkDetail {
            date: work.date,
            description: work.description.clone(),
            hours: work.hours,
            pay: work.hours * rates.overtime_hourly_rate,
        })
        .collect::<Vec<_>>();

    let regular_hours: f64 = attendance_details.iter().map(|a| a.hours_worked).sum();
    let overtime_hours: f64 = extra_work_details.iter().map(|w| w.hours).sum();

    let regular_pay = regular_hours * rates.regular_hourly_rate;
    let overtime_pay = overtime_hours * rates.overtime_hourly_rate;
    let gross_salary = regular_pay + overtime_pay;

    let epf_employee = (gross_salary * rates.epf_employee_rate).round() as i64;
    let epf_employer = (gross_salary * rates.epf_employer_rate).round() as i64;
    let etf = (gross_salary * rates.etf_rate).round() as i64;
    let total_deductions = epf_employee + etf;

    SalaryBreakdown {
        staff: StaffInfo {
            name: staff.name.clone(),
            email: staff.email.clone(),
            role: staff.role.clone(),
        },
        pay_period: period.into(),
        hours: BreakdownHours {
            regular_hours,
            overtime_hours,
            total_hours: regular_hours + overtime_hours,
        },
        earnings: BreakdownEarnings {
            regular_pay,
            overtime_pay,
            gross_salary,
        },
        deductions: BreakdownDeductions {
            epf_employee,
            epf_employer,
            etf,
            total_deductions,
        },
        net_salary: gross_salary - total_deductions as f64,
        rates: *rates,
        attendance_details,
        extra_work_details,
    }
}

/// Preview a staff member's salary without persisting anything
pub async fn calculate_salary(
    db: &DatabaseConnection,
    rates: &SalaryRates,
    staff_email: &str,
    period: PayPeriod,
) -> Result<SalaryBreakdown, PayrollError> {
    let staff = find_staff(db, staff_email).await?;

    breakdown_for(db, rates, &staff, period).await
}

pub(super) async fn breakdown_for(
    db: &DatabaseConnection,
    rates: &SalaryRates,
    staff: &staff::Model,
    period: PayPeriod,
) -> Result<SalaryBreakdown, PayrollError> {
    let attendance = AttendanceRecord::find()
        .filter(attendance_record::Column::StaffId.eq(staff.id))
        .filter(attendance_record::Column::Date.between(period.start_date, period.end_date))
        .order_by_asc(attendance_record::Column::Date)
        .all(db).await?;

    let extra_work = ExtraWorkEntry::find()
        .filter(extra_work_entry::Column::StaffId.eq(staff.id))
        .filter(extra_work_entry::Column::Date.between(period.start_date, period.end_date))
        .order_by_asc(extra_work_entry::Column::Date)
        .all(db).await?;

    debug!(
        staff = %staff.email,
        start = %period.start_date,
        end = %period.end_date,
        attendance = attendance.len(),
        extra_work = extra_work.len(),
        "calculating salary"
    );

    Ok(calculate(staff, &attendance, &extra_work, period, rates))
}

pub(crate) async fn find_staff(db: &DatabaseConnection, email: &str) -> Result<staff::Model, PayrollError> {
    Staff::find()
        .filter(staff::Column::Email.eq(email))
        .one(db).await?
        .ok_or_else(|| PayrollError::not_found(format!("staff member with email {email}")))
}

/// Account identity linked to a staff member, required before anything is persisted for them
pub(super) async fn find_identity(db: &DatabaseConnection, email: &str) -> Result<user::Model, PayrollError> {
    User::find()
        .filter(user::Column::Email.eq(email))
        .one(db).await?
        .ok_or_else(|| PayrollError::validation(format!("user record not found for {email}")))
}
