//! Salary engine
//!
//! Attendance and extra work go through [`calculate`] to become a [`SalaryBreakdown`]. The
//! breakdown is only ever stored by the record functions, which own the
//! draft → approved → paid lifecycle of a salary record. Summaries and reports read from both.

mod batch;
mod calculation;
mod error;
mod ledger;
mod model;
mod record;
mod summary;

#[cfg(test)]
pub(crate) mod fixtures;

pub use batch::{calculate_all, create_all_records};
pub use calculation::{calculate, calculate_salary};
pub(crate) use calculation::find_staff;
pub use error::{PayrollError, RecordOperation};
pub use model::*;
pub use record::{
    approve_record, create_or_update_record, delete_record, get_record, list_records, pay_record, update_record,
};
pub use summary::{generate_report, salary_summary, SalarySummary, SummaryFilter};
