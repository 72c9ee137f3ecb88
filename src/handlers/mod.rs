pub mod employee;

use actix_web::web;
use crate::errors::json_error_handler;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(
            web::resource(employee::EMPLOYEE_ROUTE)
                .route(web::get().to(employee::get_employees))
                .route(web::post().to(employee::create_employee)),
        );
}
