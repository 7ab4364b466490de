/// Pay for one hour of attended work
pub const REGULAR_HOURLY_RATE: f64 = 80.0;
/// Pay for one hour of recorded extra work
pub const OVERTIME_HOURLY_RATE: f64 = 100.0;

/// Employee Provident Fund, employee share of gross
pub const EPF_EMPLOYEE_RATE: f64 = 0.08;
/// Employee Provident Fund, employer share of gross. Booked as a liability, never deducted from net
pub const EPF_EMPLOYER_RATE: f64 = 0.12;
/// Employee Trust Fund share of gross
pub const ETF_RATE: f64 = 0.03;

pub const DEFAULT_PAGE_LIMIT: u64 = 10;
pub const MAX_PAGE_LIMIT: u64 = 100;

pub const ACTOR_HEADER: &str = "X-Actor-Id";
