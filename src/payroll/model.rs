use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{consts, entity::sea_orm_active_enums::{PaymentMethod, SalaryStatus}, utils};

use super::PayrollError;

/// Rate table a calculation runs against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalaryRates {
    pub regular_hourly_rate: f64,
    pub overtime_hourly_rate: f64,
    pub epf_employee_rate: f64,
    pub epf_employer_rate: f64,
    pub etf_rate: f64,
}

impl Default for SalaryRates {
    fn default() -> Self {
        Self {
            regular_hourly_rate: consts::REGULAR_HOURLY_RATE,
            overtime_hourly_rate: consts::OVERTIME_HOURLY_RATE,
            epf_employee_rate: consts::EPF_EMPLOYEE_RATE,
            epf_employer_rate: consts::EPF_EMPLOYER_RATE,
            etf_rate: consts::ETF_RATE,
        }
    }
}

impl SalaryRates {
    /// Overtime rate expressed as a multiple of the regular rate, as stored on salary records
    pub fn overtime_multiplier(&self) -> f64 {
        if self.regular_hourly_rate == 0.0 {
            return 0.0
        }

        self.overtime_hourly_rate / self.regular_hourly_rate
    }
}

/// Inclusive range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl PayPeriod {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, PayrollError> {
        if end_date < start_date {
            return Err(PayrollError::validation("end date is earlier than start date"))
        }

        Ok(Self { start_date, end_date })
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }

    pub fn duration_days(&self) -> i64 {
        utils::count_days(self.start_date, self.end_date)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    pub staff: StaffInfo,
    pub pay_period: BreakdownPeriod,
    pub hours: BreakdownHours,
    pub earnings: BreakdownEarnings,
    pub deductions: BreakdownDeductions,
    pub net_salary: f64,
    pub rates: SalaryRates,
    pub attendance_details: Vec<AttendanceDetail>,
    pub extra_work_details: Vec<ExtraWorkDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffInfo {
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: i64,
}

impl From<PayPeriod> for BreakdownPeriod {
    fn from(period: PayPeriod) -> Self {
        Self {
            start_date: period.start_date,
            end_date: period.end_date,
            duration_days: period.duration_days(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakdownHours {
    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub total_hours: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEarnings {
    pub regular_pay: f64,
    pub overtime_pay: f64,
    pub gross_salary: f64,
}

/// Statutory contributions, each rounded to a whole unit
///
/// `epf_employer` is an employer liability and is not part of `total_deductions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownDeductions {
    pub epf_employee: i64,
    pub epf_employer: i64,
    pub etf: i64,
    pub total_deductions: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceDetail {
    pub date: NaiveDate,
    pub check_in: Option<DateTime<FixedOffset>>,
    pub check_out: Option<DateTime<FixedOffset>>,
    pub hours_worked: f64,
    pub pay: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraWorkDetail {
    pub date: NaiveDate,
    pub description: String,
    pub hours: f64,
    pub pay: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankDetails {
    pub account_number: Option<String>,
    pub bank_name: Option<String>,
    pub branch: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub payment_method: Option<PaymentMethod>,
    pub bank_details: Option<BankDetails>,
}

/// Fields of a salary record that may be edited by hand before it is paid
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRecordUpdate {
    pub notes: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub bank_details: Option<BankDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRecordFilter {
    pub status: Option<SalaryStatus>,
    pub staff_id: Option<Uuid>,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRecordPage<T> {
    pub records: Vec<T>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current: u64,
    pub pages: u64,
    pub total: u64,
}
