pub use sea_orm_migration::prelude::*;

mod util;
mod m20250701_090000_create_payroll_tables;
mod m20250701_091500_seed_sample_staff;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250701_090000_create_payroll_tables::Migration),
            Box::new(m20250701_091500_seed_sample_staff::Migration),
        ]
    }
}
