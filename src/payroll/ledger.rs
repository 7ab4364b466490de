//! Bookkeeping side of a salary payment

use chrono::{DateTime, FixedOffset};
use sea_orm::{ActiveValue::Set, ConnectionTrait, EntityTrait};

use crate::entity::{ledger_entry, prelude::*, salary_record, sea_orm_active_enums::{LedgerAccount, LedgerReferenceType}};

use super::PayrollError;

#[derive(Debug, Clone, PartialEq)]
pub(super) struct LedgerPosting {
    pub(super) description: String,
    pub(super) debit: f64,
    pub(super) reference_type: LedgerReferenceType,
}

/// Net salary is always posted, employer contributions only when non-zero
pub(super) fn payment_postings(record: &salary_record::Model) -> Vec<LedgerPosting> {
    let mut postings = vec![
        LedgerPosting {
            description: format!(
                "Salary payment for {} - {} to {}",
                record.staff_name,
                record.period_start.format("%a %b %d %Y"),
                record.period_end.format("%a %b %d %Y"),
            ),
            debit: record.net_salary,
            reference_type: LedgerReferenceType::SalaryPayment,
        },
    ];

    if record.epf_employer > 0 {
        postings.push(LedgerPosting {
            description: format!("EPF contribution for {}", record.staff_name),
            debit: record.epf_employer as f64,
            reference_type: LedgerReferenceType::EpfContribution,
        });
    }

    if record.etf > 0 {
        postings.push(LedgerPosting {
            description: format!("ETF contribution for {}", record.staff_name),
            debit: record.etf as f64,
            reference_type: LedgerReferenceType::EtfContribution,
        });
    }

    postings
}

pub(super) async fn post_salary_payment<C: ConnectionTrait>(
    db: &C,
    record: &salary_record::Model,
    at: DateTime<FixedOffset>,
) -> Result<u64, PayrollError> {
    let entries = payment_postings(record).into_iter()
        .map(|posting| ledger_entry::ActiveModel {
            created_at: Set(at),
            updated_at: Set(at),
            date: Set(at),
            description: Set(posting.description),
            debit: Set(posting.debit),
            account: Set(LedgerAccount::Expenses),
            reference: Set(record.id),
            reference_type: Set(posting.reference_type),
            ..Default::default()
        });

    let posted = LedgerEntry::insert_many(entries)
        .exec_without_returning(db).await?;

    Ok(posted)
}
