use actix_web::web;

mod salary;
mod staff;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(web::scope("/salaries")
            .configure(salary::config))
        .service(web::scope("/staff")
            .configure(staff::config));
}
