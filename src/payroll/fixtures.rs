use chrono::{FixedOffset, Local, NaiveDate, TimeZone as _};
use uuid::Uuid;

use crate::entity::{attendance_record, extra_work_entry, salary_record, sea_orm_active_enums::{ApprovalStatus, SalaryStatus}, staff, user};

pub(crate) fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub(crate) fn staff(name: &str, email: &str) -> staff::Model {
    staff::Model {
        id: Uuid::new_v4(),
        created_at: Local::now().into(),
        updated_at: Local::now().into(),
        name: name.to_string(),
        email: email.to_string(),
        role: "staff_member".to_string(),
    }
}

pub(crate) fn identity(staff: &staff::Model) -> user::Model {
    user::Model {
        id: Uuid::new_v4(),
        created_at: Local::now().into(),
        updated_at: Local::now().into(),
        name: staff.name.clone(),
        email: staff.email.clone(),
        role: staff.role.clone(),
    }
}

pub(crate) fn attendance(staff_id: Uuid, date: NaiveDate, hours_worked: f64) -> attendance_record::Model {
    let offset = FixedOffset::east_opt(0).unwrap();
    let check_in = offset.from_local_datetime(&date.and_hms_opt(8, 0, 0).unwrap()).unwrap();

    attendance_record::Model {
        id: Uuid::new_v4(),
        created_at: Local::now().into(),
        updated_at: Local::now().into(),
        staff_id,
        date,
        check_in_time: Some(check_in),
        check_out_time: Some(check_in + chrono::Duration::minutes((hours_worked * 60.0) as i64)),
        hours_worked,
        approval_status: ApprovalStatus::Pending,
        approved_by: None,
        approval_note: None,
    }
}

pub(crate) fn extra_work(staff_id: Uuid, date: NaiveDate, hours: f64) -> extra_work_entry::Model {
    extra_work_entry::Model {
        id: Uuid::new_v4(),
        created_at: Local::now().into(),
        updated_at: Local::now().into(),
        staff_id,
        description: "Emergency brake repair".to_string(),
        hours,
        date,
    }
}

pub(crate) fn salary_record(staff_id: Uuid, status: SalaryStatus) -> salary_record::Model {
    salary_record::Model {
        id: Uuid::new_v4(),
        created_at: Local::now().into(),
        updated_at: Local::now().into(),
        created_by: None,
        staff_id,
        staff_name: "John Smith".to_string(),
        staff_role: "staff_member".to_string(),
        period_start: day(2025, 1, 15),
        period_end: day(2025, 1, 21),
        hourly_rate: 80.0,
        overtime_rate: 1.25,
        regular_hours: 40.0,
        overtime_hours: 5.0,
        regular_pay: 3200.0,
        overtime_pay: 500.0,
        gross_salary: 3700.0,
        epf_employee: 296,
        epf_employer: 444,
        etf: 111,
        total_deductions: 407,
        net_salary: 3293.0,
        status,
        notes: None,
        approved_by: None,
        approved_at: None,
        paid_by: None,
        paid_at: None,
        payment_method: None,
        bank_account_number: None,
        bank_name: None,
        bank_branch: None,
    }
}
