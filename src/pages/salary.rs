use std::str::FromStr;

use actix_web::{delete, dev, get, post, put, web, FromRequest, HttpRequest, HttpResponse, Responder};
use chrono::NaiveDate;
use futures_util::future::LocalBoxFuture;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    actor::Actor,
    entity::{salary_record, sea_orm_active_enums::SalaryStatus},
    payroll::{
        self, PayPeriod, Payment, PayrollError, SalaryRates, SalaryRecordFilter, SalaryRecordUpdate, SalarySummary,
        SummaryFilter,
    },
    utils,
};

use model::*;

mod extractor;
mod model;

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(calculate_salary)
        .service(calculate_all)
        .service(create_record)
        .service(create_all_records)
        .service(list_records)
        .service(get_record)
        .service(update_record)
        .service(approve_record)
        .service(pay_record)
        .service(delete_record)
        .service(get_summary)
        .service(get_report);
}

#[post("/calculate")]
async fn calculate_salary(
    db: web::Data<DatabaseConnection>,
    rates: web::Data<SalaryRates>,
    payload: web::Json<CalculateSalary>,
) -> Result<impl Responder, PayrollError> {
    let breakdown = payroll::calculate_salary(&db, &rates, &payload.staff_email, payload.period.period()?).await?;

    Ok(web::Json(breakdown))
}

#[post("/calculate-all")]
async fn calculate_all(
    db: web::Data<DatabaseConnection>,
    rates: web::Data<SalaryRates>,
    payload: web::Json<PeriodRange>,
) -> Result<impl Responder, PayrollError> {
    let outcome = payroll::calculate_all(&db, &rates, payload.period()?).await?;

    Ok(web::Json(outcome))
}

#[post("/records")]
async fn create_record(
    db: web::Data<DatabaseConnection>,
    rates: web::Data<SalaryRates>,
    actor: Actor,
    payload: web::Json<CalculateSalary>,
) -> Result<impl Responder, PayrollError> {
    let record = payroll::create_or_update_record(&db, &rates, &payload.staff_email, payload.period.period()?, *actor).await?;

    Ok(HttpResponse::Ok().json(web::Json(record)))
}

#[post("/records/batch")]
async fn create_all_records(
    db: web::Data<DatabaseConnection>,
    rates: web::Data<SalaryRates>,
    actor: Actor,
    payload: web::Json<PeriodRange>,
) -> Result<impl Responder, PayrollError> {
    let outcome = payroll::create_all_records(&db, &rates, payload.period()?, *actor).await?;

    Ok(web::Json(outcome))
}

#[get("/records")]
async fn list_records(db: web::Data<DatabaseConnection>, query: web::Query<RecordQuery>) -> Result<impl Responder, PayrollError> {
    let filter = SalaryRecordFilter::from(query.into_inner());
    let page = payroll::list_records(&db, &filter).await?;

    Ok(web::Json(page))
}

#[get("/records/{record_id}")]
async fn get_record(record: salary_record::Model) -> impl Responder {
    web::Json(record)
}

#[put("/records/{record_id}")]
async fn update_record(
    db: web::Data<DatabaseConnection>,
    record_id: web::Path<Uuid>,
    payload: web::Json<SalaryRecordUpdate>,
) -> Result<impl Responder, PayrollError> {
    let record = payroll::update_record(&db, *record_id, payload.into_inner()).await?;

    Ok(web::Json(record))
}

#[put("/records/{record_id}/approve")]
async fn approve_record(db: web::Data<DatabaseConnection>, actor: Actor, record_id: web::Path<Uuid>) -> Result<impl Responder, PayrollError> {
    let record = payroll::approve_record(&db, *record_id, *actor).await?;

    Ok(web::Json(record))
}

#[put("/records/{record_id}/pay")]
async fn pay_record(
    db: web::Data<DatabaseConnection>,
    actor: Actor,
    record_id: web::Path<Uuid>,
    payload: web::Json<Payment>,
) -> Result<impl Responder, PayrollError> {
    let record = payroll::pay_record(&db, *record_id, *actor, payload.into_inner()).await?;

    Ok(web::Json(record))
}

#[delete("/records/{record_id}")]
async fn delete_record(db: web::Data<DatabaseConnection>, record_id: web::Path<Uuid>) -> Result<impl Responder, PayrollError> {
    payroll::delete_record(&db, *record_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

#[get("/summary")]
async fn get_summary(db: web::Data<DatabaseConnection>, query: web::Query<SummaryQuery>) -> Result<impl Responder, PayrollError> {
    let summary: SalarySummary = payroll::salary_summary(&db, &SummaryFilter::from(query.into_inner())).await?;

    Ok(web::Json(summary))
}

#[get("/report/{email}")]
async fn get_report(
    db: web::Data<DatabaseConnection>,
    rates: web::Data<SalaryRates>,
    email: web::Path<String>,
    query: web::Query<PeriodRange>,
) -> Result<impl Responder, PayrollError> {
    let report = payroll::generate_report(&db, &rates, &email, query.period()?).await?;

    Ok(web::Json(report))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test, App};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use serde_json::json;

    use crate::{
        consts::ACTOR_HEADER,
        entity::{extra_work_entry, staff},
        payroll::{fixtures::{self, day}, SalaryBreakdown},
    };

    use super::*;

    macro_rules! app {
        ($db:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($db.into_connection()))
                    .app_data(web::Data::new(SalaryRates::default()))
                    .configure(config)
            )
        };
    }

    #[actix_web::test]
    async fn test_calculate_salary() {
        let john = fixtures::staff("John Smith", "john.smith@autoelite.com");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![ john.clone() ]])
            .append_query_results([vec![
                fixtures::attendance(john.id, day(2025, 1, 15), 8.0),
                fixtures::attendance(john.id, day(2025, 1, 16), 8.0),
            ]])
            .append_query_results([vec![
                fixtures::extra_work(john.id, day(2025, 1, 16), 2.5),
            ]]);

        let app = app!(db).await;

        let req = test::TestRequest::post()
            .uri("/calculate")
            .set_json(json!({
                "staff_email": john.email,
                "start_date": "2025-01-15",
                "end_date": "2025-01-21T23:59:59+05:30",
            }))
            .to_request();

        let breakdown: SalaryBreakdown = test::call_and_read_body_json(&app, req).await;
        assert_eq!(breakdown.pay_period.end_date, day(2025, 1, 21));
        assert_eq!(breakdown.hours.regular_hours, 16.0);
        assert_eq!(breakdown.hours.overtime_hours, 2.5);
        assert_eq!(breakdown.earnings.gross_salary, 1530.0);
        assert_eq!(breakdown.deductions.epf_employee, 122);
        assert_eq!(breakdown.deductions.etf, 46);
    }

    #[actix_web::test]
    async fn test_calculate_rejects_inverted_period() {
        let db = MockDatabase::new(DatabaseBackend::Postgres);

        let app = app!(db).await;

        let req = test::TestRequest::post()
            .uri("/calculate")
            .set_json(json!({
                "staff_email": "john.smith@autoelite.com",
                "start_date": "2025-01-21",
                "end_date": "2025-01-15",
            }))
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_calculate_unknown_staff() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<staff::Model>::new()]);

        let app = app!(db).await;

        let req = test::TestRequest::post()
            .uri("/calculate")
            .set_json(json!({
                "staff_email": "ghost@autoelite.com",
                "start_date": "2025-01-15",
                "end_date": "2025-01-21",
            }))
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_create_record_requires_actor() {
        let db = MockDatabase::new(DatabaseBackend::Postgres);

        let app = app!(db).await;

        let req = test::TestRequest::post()
            .uri("/records")
            .set_json(json!({
                "staff_email": "john.smith@autoelite.com",
                "start_date": "2025-01-15",
                "end_date": "2025-01-21",
            }))
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_approve_record() {
        let manager = Uuid::new_v4();
        let draft = fixtures::salary_record(Uuid::new_v4(), SalaryStatus::Draft);
        let approved = salary_record::Model {
            status: SalaryStatus::Approved,
            approved_by: Some(manager),
            ..draft.clone()
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![ draft.clone() ]])
            .append_query_results([vec![ approved.clone() ]]);

        let app = app!(db).await;

        let req = test::TestRequest::put()
            .uri(&format!("/records/{}/approve", draft.id))
            .insert_header((ACTOR_HEADER, manager.to_string()))
            .to_request();

        let record: salary_record::Model = test::call_and_read_body_json(&app, req).await;
        assert_eq!(record.status, SalaryStatus::Approved);
        assert_eq!(record.approved_by, Some(manager));
    }

    #[actix_web::test]
    async fn test_pay_draft_is_conflict() {
        let draft = fixtures::salary_record(Uuid::new_v4(), SalaryStatus::Draft);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![ draft.clone() ]]);

        let app = app!(db).await;

        let req = test::TestRequest::put()
            .uri(&format!("/records/{}/pay", draft.id))
            .insert_header((ACTOR_HEADER, Uuid::new_v4().to_string()))
            .set_json(json!({}))
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_pay_rejects_malformed_payment() {
        let approved = fixtures::salary_record(Uuid::new_v4(), SalaryStatus::Approved);

        let db = web::Data::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![ approved.clone() ]])
                .into_connection()
        );
        let app = test::init_service(
            App::new()
                .app_data(db.clone())
                .app_data(web::Data::new(SalaryRates::default()))
                .configure(config)
        ).await;

        let req = test::TestRequest::put()
            .uri(&format!("/records/{}/pay", approved.id))
            .insert_header((ACTOR_HEADER, Uuid::new_v4().to_string()))
            .set_json(json!({
                "payment_method": "bitcoin",
                "bank_details": { "account_number": 12345 },
            }))
            .to_request();

        let status = test::call_service(&app, req).await.status();
        assert_eq!(status, StatusCode::BAD_REQUEST);

        drop(app);
        let db = match Arc::try_unwrap(db.into_inner()) {
            Ok(db) => db,
            Err(_) => panic!("connection is still shared"),
        };
        assert!(db.into_transaction_log().is_empty(), "a rejected payment must not touch the record");
    }

    #[actix_web::test]
    async fn test_delete_record() {
        let draft = fixtures::salary_record(Uuid::new_v4(), SalaryStatus::Draft);
        let paid = fixtures::salary_record(Uuid::new_v4(), SalaryStatus::Paid);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![ draft.clone() ]])
            .append_exec_results([MockExecResult { last_insert_id: 0, rows_affected: 1 }])
            .append_query_results([vec![ paid.clone() ]]);

        let app = app!(db).await;

        let req = test::TestRequest::delete()
            .uri(&format!("/records/{}", draft.id))
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::delete()
            .uri(&format!("/records/{}", paid.id))
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_list_records() {
        let staff_id = Uuid::new_v4();
        let records = vec![
            fixtures::salary_record(staff_id, SalaryStatus::Draft),
            fixtures::salary_record(staff_id, SalaryStatus::Draft),
        ];

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![ std::collections::BTreeMap::from([("num_items", sea_orm::Value::BigInt(Some(12)))]) ]])
            .append_query_results([records.clone()]);

        let app = app!(db).await;

        let req = test::TestRequest::get()
            .uri("/records?status=draft&page=2&limit=10")
            .to_request();

        let page: payroll::SalaryRecordPage<salary_record::Model> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(page.records, records);
        assert_eq!(page.pagination.current, 2);
        assert_eq!(page.pagination.pages, 2);
        assert_eq!(page.pagination.total, 12);
    }

    #[actix_web::test]
    async fn test_list_records_rejects_page_out_of_range() {
        let db = MockDatabase::new(DatabaseBackend::Postgres);

        let app = app!(db).await;

        let req = test::TestRequest::get()
            .uri("/records?page=18446744073709551615&limit=10")
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_summary_of_empty_range() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<salary_record::Model>::new()]);

        let app = app!(db).await;

        let req = test::TestRequest::get()
            .uri("/summary?start_date=2025-01-01&end_date=2025-01-31")
            .to_request();

        let summary: SalarySummary = test::call_and_read_body_json(&app, req).await;
        assert_eq!(summary.total_salaries, 0);
        assert_eq!(summary.total_net_salary, 0.0);
        assert_eq!(summary.average_salary, 0.0);
    }

    #[actix_web::test]
    async fn test_report() {
        let john = fixtures::staff("John Smith", "john.smith@autoelite.com");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![ john.clone() ]])
            .append_query_results([vec![ fixtures::attendance(john.id, day(2025, 1, 15), 8.0) ]])
            .append_query_results([Vec::<extra_work_entry::Model>::new()]);

        let app = app!(db).await;

        let req = test::TestRequest::get()
            .uri(&format!("/report/{}?start_date=2025-01-15&end_date=2025-01-18", john.email))
            .to_request();

        let report: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(report["report_period"], "Wed Jan 15 2025 to Sat Jan 18 2025");
        assert_eq!(report["summary"]["total_days"], 4);
        assert_eq!(report["summary"]["average_hours_per_day"], 2.0);
        assert_eq!(report["summary"]["hourly_efficiency"], 80.0);
        assert_eq!(report["earnings"]["gross_salary"], 640.0);
    }

    #[actix_web::test]
    async fn test_missing_record() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<salary_record::Model>::new()]);

        let app = app!(db).await;

        let req = test::TestRequest::get()
            .uri(&format!("/records/{}", Uuid::new_v4()))
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
