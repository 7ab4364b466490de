use chrono::{DateTime, FixedOffset, Local, NaiveDate};
use sea_orm::{sea_query::Expr, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter, QuerySelect};
use serde::{Deserialize, Serialize};

use crate::{entity::{prelude::*, salary_record, sea_orm_active_enums::SalaryStatus}, utils};

use super::{calculate_salary, PayPeriod, PayrollError, SalaryBreakdown, SalaryRates};

/// Totals over a set of salary records
///
/// `total_epf` is the employer share, the figure finance books as a liability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalarySummary {
    pub total_salaries: u64,
    pub total_net_salary: f64,
    pub total_gross_salary: f64,
    pub total_epf: i64,
    pub total_epf_employee: i64,
    pub total_etf: i64,
    pub total_deductions: i64,
    pub total_regular_hours: f64,
    pub total_overtime_hours: f64,
    pub total_hours: f64,
    pub average_salary: f64,
}

/// One aggregate row. Sums over no rows come back as NULL
#[derive(Debug, Default, FromQueryResult)]
struct SummaryTotals {
    total_salaries: i64,
    total_net_salary: Option<f64>,
    total_gross_salary: Option<f64>,
    total_epf: Option<i64>,
    total_epf_employee: Option<i64>,
    total_etf: Option<i64>,
    total_deductions: Option<i64>,
    total_regular_hours: Option<f64>,
    total_overtime_hours: Option<f64>,
}

impl From<SummaryTotals> for SalarySummary {
    fn from(totals: SummaryTotals) -> Self {
        let total_salaries = u64::try_from(totals.total_salaries).unwrap_or_default();
        let total_net_salary = totals.total_net_salary.unwrap_or_default();
        let total_regular_hours = totals.total_regular_hours.unwrap_or_default();
        let total_overtime_hours = totals.total_overtime_hours.unwrap_or_default();

        Self {
            total_salaries,
            total_net_salary,
            total_gross_salary: totals.total_gross_salary.unwrap_or_default(),
            total_epf: totals.total_epf.unwrap_or_default(),
            total_epf_employee: totals.total_epf_employee.unwrap_or_default(),
            total_etf: totals.total_etf.unwrap_or_default(),
            total_deductions: totals.total_deductions.unwrap_or_default(),
            total_regular_hours,
            total_overtime_hours,
            total_hours: total_regular_hours + total_overtime_hours,
            average_salary: if total_salaries > 0 {
                total_net_salary / total_salaries as f64
            } else {
                0.0
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<SalaryStatus>,
}

impl SummaryFilter {
    /// Defaults: from the first of `today`'s month, up to `today`, paid records only
    pub fn resolve(&self, today: NaiveDate) -> Result<(PayPeriod, SalaryStatus), PayrollError> {
        let period = PayPeriod::new(
            self.start_date.unwrap_or_else(|| utils::first_day_of_month(today)),
            self.end_date.unwrap_or(today),
        )?;

        Ok((period, self.status.unwrap_or(SalaryStatus::Paid)))
    }
}

/// Summarises the records whose period starts inside the filter range, in one aggregate query
pub async fn salary_summary(db: &DatabaseConnection, filter: &SummaryFilter) -> Result<SalarySummary, PayrollError> {
    use salary_record::Column;

    let (range, status) = filter.resolve(Local::now().date_naive())?;

    // Postgres sums bigint into numeric
    let sum_bigint = |column: Column| Expr::col(column).sum().cast_as("bigint");

    let totals = SalaryRecord::find()
        .select_only()
        .column_as(Expr::col(Column::Id).count(), "total_salaries")
        .column_as(Expr::col(Column::NetSalary).sum(), "total_net_salary")
        .column_as(Expr::col(Column::GrossSalary).sum(), "total_gross_salary")
        .column_as(sum_bigint(Column::EpfEmployer), "total_epf")
        .column_as(sum_bigint(Column::EpfEmployee), "total_epf_employee")
        .column_as(sum_bigint(Column::Etf), "total_etf")
        .column_as(sum_bigint(Column::TotalDeductions), "total_deductions")
        .column_as(Expr::col(Column::RegularHours).sum(), "total_regular_hours")
        .column_as(Expr::col(Column::OvertimeHours).sum(), "total_overtime_hours")
        .filter(Column::PeriodStart.between(range.start_date, range.end_date))
        .filter(Column::Status.eq(status))
        .into_model::<SummaryTotals>()
        .one(db).await?
        .unwrap_or_default();

    Ok(totals.into())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryReport {
    #[serde(flatten)]
    pub breakdown: SalaryBreakdown,
    pub generated_at: DateTime<FixedOffset>,
    pub report_period: String,
    pub summary: ReportSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_days: i64,
    pub average_hours_per_day: f64,
    pub hourly_efficiency: f64,
}

impl SalaryReport {
    pub fn new(breakdown: SalaryBreakdown, generated_at: DateTime<FixedOffset>) -> Self {
        let total_days = breakdown.pay_period.duration_days;
        let total_hours = breakdown.hours.total_hours;

        let summary = ReportSummary {
            total_days,
            average_hours_per_day: utils::round_2(total_hours / total_days.max(1) as f64),
            hourly_efficiency: if total_hours > 0.0 {
                utils::round_2(breakdown.earnings.gross_salary / total_hours)
            } else {
                0.0
            },
        };

        Self {
            report_period: format!(
                "{} to {}",
                breakdown.pay_period.start_date.format("%a %b %d %Y"),
                breakdown.pay_period.end_date.format("%a %b %d %Y"),
            ),
            breakdown,
            generated_at,
            summary,
        }
    }
}

pub async fn generate_report(
    db: &DatabaseConnection,
    rates: &SalaryRates,
    staff_email: &str,
    period: PayPeriod,
) -> Result<SalaryReport, PayrollError> {
    let breakdown = calculate_salary(db, rates, staff_email, period).await?;

    Ok(SalaryReport::new(breakdown, Local::now().fixed_offset()))
}
