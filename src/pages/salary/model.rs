use super::*;

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct CalculateSalary {
    pub(super) staff_email: String,
    #[serde(flatten)]
    pub(super) period: PeriodRange,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub(super) struct PeriodRange {
    #[serde(deserialize_with = "utils::deserialize_day")]
    pub(super) start_date: NaiveDate,
    #[serde(deserialize_with = "utils::deserialize_day")]
    pub(super) end_date: NaiveDate,
}

impl PeriodRange {
    pub(super) fn period(&self) -> Result<PayPeriod, PayrollError> {
        PayPeriod::new(self.start_date, self.end_date)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(super) struct SummaryQuery {
    #[serde(default, deserialize_with = "utils::deserialize_optional_day")]
    pub(super) start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "utils::deserialize_optional_day")]
    pub(super) end_date: Option<NaiveDate>,
    pub(super) status: Option<SalaryStatus>,
}

impl From<SummaryQuery> for SummaryFilter {
    fn from(query: SummaryQuery) -> Self {
        SummaryFilter {
            start_date: query.start_date,
            end_date: query.end_date,
            status: query.status,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(super) struct RecordQuery {
    pub(super) status: Option<SalaryStatus>,
    pub(super) staff_id: Option<Uuid>,
    #[serde(default, deserialize_with = "utils::deserialize_optional_day")]
    pub(super) period_start: Option<NaiveDate>,
    #[serde(default, deserialize_with = "utils::deserialize_optional_day")]
    pub(super) period_end: Option<NaiveDate>,
    pub(super) page: Option<u64>,
    pub(super) limit: Option<u64>,
}

impl From<RecordQuery> for SalaryRecordFilter {
    fn from(query: RecordQuery) -> Self {
        SalaryRecordFilter {
            status: query.status,
            staff_id: query.staff_id,
            period_start: query.period_start,
            period_end: query.period_end,
            page: query.page,
            limit: query.limit,
        }
    }
}
