use sea_orm_migration::{prelude::{extension::postgres::TypeDropStatement, *}, sea_orm::{ActiveEnum, DbBackend, DeriveActiveEnum, EnumIter, Schema}};

use crate::util::{default_table_statement, foreign_key};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(DbBackend::Postgres);

        manager.create_type(schema.create_enum_from_active_enum::<ApprovalStatus>()).await?;
        manager.create_type(schema.create_enum_from_active_enum::<SalaryStatus>()).await?;
        manager.create_type(schema.create_enum_from_active_enum::<PaymentMethod>()).await?;
        manager.create_type(schema.create_enum_from_active_enum::<LedgerAccount>()).await?;
        manager.create_type(schema.create_enum_from_active_enum::<LedgerReferenceType>()).await?;

        manager
            .create_table(default_table_statement()
                .table(Staff::Table)
                .col(ColumnDef::new(Staff::Name)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Staff::Email)
                    .text()
                    .unique_key()
                    .not_null())
                .col(ColumnDef::new(Staff::Role)
                    .text()
                    .not_null())
                .take()
            ).await?;

        // Account identities. Salary records hang off these, not off `staff`
        manager
            .create_table(default_table_statement()
                .table(User::Table)
                .col(ColumnDef::new(User::Name)
                    .text()
                    .not_null())
                .col(ColumnDef::new(User::Email)
                    .text()
                    .unique_key()
                    .not_null())
                .col(ColumnDef::new(User::Role)
                    .text()
                    .not_null())
                .take()
            ).await?;

        manager
            .create_table(default_table_statement()
                .table(AttendanceRecord::Table)
                .col(ColumnDef::new(AttendanceRecord::StaffId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(AttendanceRecord::Date)
                    .date()
                    .not_null())
                .col(ColumnDef::new(AttendanceRecord::CheckInTime)
                    .timestamp_with_time_zone())
                .col(ColumnDef::new(AttendanceRecord::CheckOutTime)
                    .timestamp_with_time_zone())
                .col(ColumnDef::new(AttendanceRecord::HoursWorked)
                    .double()
                    .not_null()
                    .default(0.0))
                .col(ColumnDef::new(AttendanceRecord::ApprovalStatus)
                    .custom(ApprovalStatus::name())
                    .not_null()
                    .default(Expr::val("pending").cast_as(ApprovalStatus::name())))
                .col(ColumnDef::new(AttendanceRecord::ApprovedBy)
                    .uuid())
                .col(ColumnDef::new(AttendanceRecord::ApprovalNote)
                    .text())
                .take()
            ).await?;
        manager.create_foreign_key(foreign_key(AttendanceRecord::Table, AttendanceRecord::StaffId, Staff::Table, ForeignKeyAction::Cascade)).await?;
        manager.create_foreign_key(foreign_key(AttendanceRecord::Table, AttendanceRecord::ApprovedBy, User::Table, ForeignKeyAction::SetNull)).await?;
        manager
            .create_index(Index::create()
                .name("idx_attendance_record_staff_date")
                .table(AttendanceRecord::Table)
                .col(AttendanceRecord::StaffId)
                .col(AttendanceRecord::Date)
                .unique()
                .to_owned()
            ).await?;

        manager
            .create_table(default_table_statement()
                .table(ExtraWorkEntry::Table)
                .col(ColumnDef::new(ExtraWorkEntry::StaffId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(ExtraWorkEntry::Description)
                    .text()
                    .not_null())
                .col(ColumnDef::new(ExtraWorkEntry::Hours)
                    .double()
                    .not_null())
                .col(ColumnDef::new(ExtraWorkEntry::Date)
                    .date()
                    .not_null())
                .take()
            ).await?;
        manager.create_foreign_key(foreign_key(ExtraWorkEntry::Table, ExtraWorkEntry::StaffId, Staff::Table, ForeignKeyAction::Cascade)).await?;
        manager
            .create_index(Index::create()
                .name("idx_extra_work_entry_staff_date")
                .table(ExtraWorkEntry::Table)
                .col(ExtraWorkEntry::StaffId)
                .col(ExtraWorkEntry::Date)
                .to_owned()
            ).await?;

        manager
            .create_table(default_table_statement()
                .table(SalaryRecord::Table)
                .col(ColumnDef::new(SalaryRecord::CreatedBy)
                    .uuid())
                .col(ColumnDef::new(SalaryRecord::StaffId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(SalaryRecord::StaffName)
                    .text()
                    .not_null())
                .col(ColumnDef::new(SalaryRecord::StaffRole)
                    .text()
                    .not_null())
                .col(ColumnDef::new(SalaryRecord::PeriodStart)
                    .date()
                    .not_null())
                .col(ColumnDef::new(SalaryRecord::PeriodEnd)
                    .date()
                    .not_null())
                .col(ColumnDef::new(SalaryRecord::HourlyRate).double().not_null())
                .col(ColumnDef::new(SalaryRecord::OvertimeRate).double().not_null())
                .col(ColumnDef::new(SalaryRecord::RegularHours).double().not_null())
                .col(ColumnDef::new(SalaryRecord::OvertimeHours).double().not_null())
                .col(ColumnDef::new(SalaryRecord::RegularPay).double().not_null())
                .col(ColumnDef::new(SalaryRecord::OvertimePay).double().not_null())
                .col(ColumnDef::new(SalaryRecord::GrossSalary).double().not_null())
                .col(ColumnDef::new(SalaryRecord::EpfEmployee).big_integer().not_null())
                .col(ColumnDef::new(SalaryRecord::EpfEmployer).big_integer().not_null())
                .col(ColumnDef::new(SalaryRecord::Etf).big_integer().not_null())
                .col(ColumnDef::new(SalaryRecord::TotalDeductions).big_integer().not_null())
                .col(ColumnDef::new(SalaryRecord::NetSalary).double().not_null())
                .col(ColumnDef::new(SalaryRecord::Status)
                    .custom(SalaryStatus::name())
                    .not_null()
                    .default(Expr::val("draft").cast_as(SalaryStatus::name())))
                .col(ColumnDef::new(SalaryRecord::Notes)
                    .text())
                .col(ColumnDef::new(SalaryRecord::ApprovedBy)
                    .uuid())
                .col(ColumnDef::new(SalaryRecord::ApprovedAt)
                    .timestamp_with_time_zone())
                .col(ColumnDef::new(SalaryRecord::PaidBy)
                    .uuid())
                .col(ColumnDef::new(SalaryRecord::PaidAt)
                    .timestamp_with_time_zone())
                .col(ColumnDef::new(SalaryRecord::PaymentMethod)
                    .custom(PaymentMethod::name()))
                .col(ColumnDef::new(SalaryRecord::BankAccountNumber)
                    .text())
                .col(ColumnDef::new(SalaryRecord::BankName)
                    .text())
                .col(ColumnDef::new(SalaryRecord::BankBranch)
                    .text())
                .take()
            ).await?;
        manager.create_foreign_key(foreign_key(SalaryRecord::Table, SalaryRecord::StaffId, User::Table, ForeignKeyAction::Restrict)).await?;
        for column in [SalaryRecord::CreatedBy, SalaryRecord::ApprovedBy, SalaryRecord::PaidBy] {
            manager.create_foreign_key(foreign_key(SalaryRecord::Table, column, User::Table, ForeignKeyAction::SetNull)).await?;
        }
        // Last writer wins on recalculation, but never two records for one period
        manager
            .create_index(Index::create()
                .name("idx_salary_record_staff_period")
                .table(SalaryRecord::Table)
                .col(SalaryRecord::StaffId)
                .col(SalaryRecord::PeriodStart)
                .col(SalaryRecord::PeriodEnd)
                .unique()
                .to_owned()
            ).await?;

        manager
            .create_table(default_table_statement()
                .table(LedgerEntry::Table)
                .col(ColumnDef::new(LedgerEntry::Date)
                    .timestamp_with_time_zone()
                    .not_null())
                .col(ColumnDef::new(LedgerEntry::Description)
                    .text()
                    .not_null())
                .col(ColumnDef::new(LedgerEntry::Debit)
                    .double()
                    .not_null())
                .col(ColumnDef::new(LedgerEntry::Account)
                    .custom(LedgerAccount::name())
                    .not_null())
                .col(ColumnDef::new(LedgerEntry::Reference)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(LedgerEntry::ReferenceType)
                    .custom(LedgerReferenceType::name())
                    .not_null())
                .take()
            ).await?;
        manager.create_foreign_key(foreign_key(LedgerEntry::Table, LedgerEntry::Reference, SalaryRecord::Table, ForeignKeyAction::Restrict)).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            LedgerEntry::Table.into_iden(),
            SalaryRecord::Table.into_iden(),
            ExtraWorkEntry::Table.into_iden(),
            AttendanceRecord::Table.into_iden(),
            User::Table.into_iden(),
            Staff::Table.into_iden(),
        ] {
            manager
                .drop_table(TableDropStatement::new()
                    .table(table)
                    .if_exists()
                    .take()
                ).await?;
        }

        for name in [
            LedgerReferenceType::name(),
            LedgerAccount::name(),
            PaymentMethod::name(),
            SalaryStatus::name(),
            ApprovalStatus::name(),
        ] {
            manager
                .drop_type(TypeDropStatement::new()
                    .name(name)
                    .if_exists()
                    .to_owned()
                ).await?;
        }

        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Staff {
    Table,
    Name,
    Email,
    Role,
}

#[derive(DeriveIden)]
pub(crate) enum User {
    Table,
    Name,
    Email,
    Role,
}

#[derive(DeriveIden)]
pub(crate) enum AttendanceRecord {
    Table,
    StaffId,
    Date,
    CheckInTime,
    CheckOutTime,
    HoursWorked,
    ApprovalStatus,
    ApprovedBy,
    ApprovalNote,
}

#[derive(DeriveIden)]
pub(crate) enum ExtraWorkEntry {
    Table,
    StaffId,
    Description,
    Hours,
    Date,
}

#[derive(DeriveIden)]
enum SalaryRecord {
    Table,
    CreatedBy,
    StaffId,
    StaffName,
    StaffRole,
    PeriodStart,
    PeriodEnd,
    HourlyRate,
    OvertimeRate,
    RegularHours,
    OvertimeHours,
    RegularPay,
    OvertimePay,
    GrossSalary,
    EpfEmployee,
    EpfEmployer,
    Etf,
    TotalDeductions,
    NetSalary,
    Status,
    Notes,
    ApprovedBy,
    ApprovedAt,
    PaidBy,
    PaidAt,
    PaymentMethod,
    BankAccountNumber,
    BankName,
    BankBranch,
}

#[derive(DeriveIden)]
enum LedgerEntry {
    Table,
    Date,
    Description,
    Debit,
    Account,
    Reference,
    ReferenceType,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "approval_status")]
enum ApprovalStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "salary_status")]
enum SalaryStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "paid")]
    Paid,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_method")]
enum PaymentMethod {
    #[sea_orm(string_value = "bank_transfer")]
    BankTransfer,
    #[sea_orm(string_value = "cash")]
    Cash,
    #[sea_orm(string_value = "cheque")]
    Cheque,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ledger_account")]
enum LedgerAccount {
    #[sea_orm(string_value = "expenses")]
    Expenses,
    #[sea_orm(string_value = "cash")]
    Cash,
    #[sea_orm(string_value = "bank")]
    Bank,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ledger_reference_type")]
enum LedgerReferenceType {
    #[sea_orm(string_value = "salary_payment")]
    SalaryPayment,
    #[sea_orm(string_value = "epf_contribution")]
    EpfContribution,
    #[sea_orm(string_value = "etf_contribution")]
    EtfContribution,
}
