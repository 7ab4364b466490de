use sea_orm_migration::prelude::*;

use crate::{
    m20250701_090000_create_payroll_tables::{AttendanceRecord, ExtraWorkEntry, Staff, User},
    util::seed_uuid,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

struct SampleStaff {
    id: u128,
    name: &'static str,
    email: &'static str,
    role: &'static str,
    /// date, check-in, check-out, hours worked
    attendance: &'static [(&'static str, &'static str, &'static str, f64)],
    /// description, hours, date
    extra_work: &'static [(&'static str, f64, &'static str)],
}

const SAMPLE_STAFF: &[SampleStaff] = &[
    SampleStaff {
        id: 1,
        name: "John Smith",
        email: "john.smith@autoelite.com",
        role: "mechanic",
        attendance: &[
            ("2025-01-15", "2025-01-15T08:00:00Z", "2025-01-15T17:00:00Z", 9.0),
            ("2025-01-16", "2025-01-16T08:30:00Z", "2025-01-16T17:30:00Z", 9.0),
            ("2025-01-17", "2025-01-17T08:00:00Z", "2025-01-17T16:30:00Z", 8.5),
            ("2025-01-18", "2025-01-18T08:15:00Z", "2025-01-18T17:15:00Z", 9.0),
            ("2025-01-19", "2025-01-19T08:00:00Z", "2025-01-19T17:00:00Z", 9.0),
        ],
        extra_work: &[
            ("Emergency brake repair for customer", 2.5, "2025-01-16"),
            ("Overtime diagnostic work", 1.5, "2025-01-18"),
        ],
    },
    SampleStaff {
        id: 2,
        name: "Sarah Johnson",
        email: "sarah.johnson@autoelite.com",
        role: "advisor",
        attendance: &[
            ("2025-01-15", "2025-01-15T09:00:00Z", "2025-01-15T18:00:00Z", 9.0),
            ("2025-01-16", "2025-01-16T09:00:00Z", "2025-01-16T18:00:00Z", 9.0),
            ("2025-01-17", "2025-01-17T09:00:00Z", "2025-01-17T17:30:00Z", 8.5),
            ("2025-01-18", "2025-01-18T09:00:00Z", "2025-01-18T18:00:00Z", 9.0),
            ("2025-01-19", "2025-01-19T09:00:00Z", "2025-01-19T18:00:00Z", 9.0),
        ],
        extra_work: &[
            ("Customer consultation after hours", 1.0, "2025-01-17"),
            ("Weekend service planning", 2.0, "2025-01-19"),
        ],
    },
    SampleStaff {
        id: 3,
        name: "Mike Wilson",
        email: "mike.wilson@autoelite.com",
        role: "mechanic",
        attendance: &[
            ("2025-01-15", "2025-01-15T07:30:00Z", "2025-01-15T16:30:00Z", 9.0),
            ("2025-01-16", "2025-01-16T07:30:00Z", "2025-01-16T16:30:00Z", 9.0),
            ("2025-01-17", "2025-01-17T07:30:00Z", "2025-01-17T16:00:00Z", 8.5),
            ("2025-01-18", "2025-01-18T07:30:00Z", "2025-01-18T16:30:00Z", 9.0),
            ("2025-01-19", "2025-01-19T07:30:00Z", "2025-01-19T16:30:00Z", 9.0),
        ],
        extra_work: &[
            ("Engine overhaul project", 4.0, "2025-01-16"),
            ("Equipment maintenance", 1.5, "2025-01-18"),
        ],
    },
];

/// Staff ids are 1..=n, their identities are offset by this
const IDENTITY_OFFSET: u128 = 1000;

fn timestamp(value: &str) -> SimpleExpr {
    Expr::val(value).cast_as("timestamptz")
}

fn date(value: &str) -> SimpleExpr {
    Expr::val(value).cast_as("date")
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let time = timestamp("2025-01-20T06:00:00Z");

        for sample in SAMPLE_STAFF {
            manager
                .exec_stmt(Query::insert()
                    .into_table(Staff::Table)
                    .columns(["id", "created_at", "updated_at", "name", "email", "role"])
                    .values_panic([seed_uuid(sample.id), time.clone(), time.clone(), sample.name.into(), sample.email.into(), sample.role.into()])
                    .to_owned()
            ).await?;

            manager
                .exec_stmt(Query::insert()
                    .into_table(User::Table)
                    .columns(["id", "created_at", "updated_at", "name", "email", "role"])
                    .values_panic([seed_uuid(IDENTITY_OFFSET + sample.id), time.clone(), time.clone(), sample.name.into(), sample.email.into(), sample.role.into()])
                    .to_owned()
            ).await?;

            let mut attendance = Query::insert()
                .into_table(AttendanceRecord::Table)
                .columns(["created_at", "updated_at", "staff_id", "date", "check_in_time", "check_out_time", "hours_worked"])
                .to_owned();
            for &(day, check_in, check_out, hours) in sample.attendance {
                attendance.values_panic([time.clone(), time.clone(), seed_uuid(sample.id), date(day), timestamp(check_in), timestamp(check_out), hours.into()]);
            }
            manager.exec_stmt(attendance).await?;

            let mut extra_work = Query::insert()
                .into_table(ExtraWorkEntry::Table)
                .columns(["created_at", "updated_at", "staff_id", "description", "hours", "date"])
                .to_owned();
            for &(description, hours, day) in sample.extra_work {
                extra_work.values_panic([time.clone(), time.clone(), seed_uuid(sample.id), description.into(), hours.into(), date(day)]);
            }
            manager.exec_stmt(extra_work).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for sample in SAMPLE_STAFF {
            // Attendance and extra work cascade with the staff row
            manager
                .exec_stmt(Query::delete()
                    .from_table(Staff::Table)
                    .and_where(Expr::col("id").eq(seed_uuid(sample.id)))
                    .to_owned()
            ).await?;

            manager
                .exec_stmt(Query::delete()
                    .from_table(User::Table)
                    .and_where(Expr::col("id").eq(seed_uuid(IDENTITY_OFFSET + sample.id)))
                    .to_owned()
            ).await?;
        }

        Ok(())
    }
}
