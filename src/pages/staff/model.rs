use super::*;

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct CheckIn {
    pub(super) staff_email: String,
    pub(super) at: Option<DateTimeWithTimeZone>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct CheckOut {
    pub(super) staff_email: String,
    pub(super) at: Option<DateTimeWithTimeZone>,
    pub(super) hours_worked: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct ReviewAttendance {
    pub(super) decision: ReviewDecision,
    pub(super) note: Option<String>,
}
