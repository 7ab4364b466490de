use super::*;

impl FromRequest for salary_record::Model {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut dev::Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let Ok(record_id) = Uuid::from_str(req.match_info().get("record_id").unwrap_or_default()) else {
                return Err(actix_web::error::ErrorBadRequest("invalid `record_id`"))
            };

            let Some(db) = req.app_data::<web::Data<DatabaseConnection>>() else {
                return Err(actix_web::error::ErrorInternalServerError("database connection is not attached"))
            };

            let record = payroll::get_record(db, record_id).await?;

            Ok(record)
        })
    }
}
