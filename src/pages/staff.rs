use actix_web::{post, put, web, HttpResponse, Responder};
use chrono::Local;
use sea_orm::{prelude::DateTimeWithTimeZone, DatabaseConnection};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    actor::Actor,
    payroll::PayrollError,
    timesheet::{self, NewExtraWork, ReviewDecision},
};

use model::*;

mod model;

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(check_in)
        .service(check_out)
        .service(review_attendance)
        .service(add_extra_work);
}

#[post("/attendance/check-in")]
async fn check_in(db: web::Data<DatabaseConnection>, payload: web::Json<CheckIn>) -> Result<impl Responder, PayrollError> {
    let at = payload.at.unwrap_or_else(|| Local::now().fixed_offset());
    let record = timesheet::check_in(&db, &payload.staff_email, at).await?;

    Ok(web::Json(record))
}

#[post("/attendance/check-out")]
async fn check_out(db: web::Data<DatabaseConnection>, payload: web::Json<CheckOut>) -> Result<impl Responder, PayrollError> {
    let at = payload.at.unwrap_or_else(|| Local::now().fixed_offset());
    let record = timesheet::check_out(&db, &payload.staff_email, at, payload.hours_worked).await?;

    Ok(web::Json(record))
}

#[put("/attendance/{record_id}/review")]
async fn review_attendance(
    db: web::Data<DatabaseConnection>,
    actor: Actor,
    record_id: web::Path<Uuid>,
    payload: web::Json<ReviewAttendance>,
) -> Result<impl Responder, PayrollError> {
    let ReviewAttendance { decision, note } = payload.into_inner();
    let record = timesheet::review_attendance(&db, *record_id, *actor, decision, note).await?;

    Ok(web::Json(record))
}

#[post("/{email}/extra-work")]
async fn add_extra_work(
    db: web::Data<DatabaseConnection>,
    email: web::Path<String>,
    payload: web::Json<NewExtraWork>,
) -> Result<impl Responder, PayrollError> {
    let entry = timesheet::add_extra_work(&db, &email, payload.into_inner(), Local::now().date_naive()).await?;

    Ok(HttpResponse::Created().json(web::Json(entry)))
}
