use actix_web::{http::header, web, HttpResponse};
use crate::errors::AppError;
use crate::models::employee::NewEmployee;
use crate::services::employee::EmployeeService;

pub const EMPLOYEE_ROUTE: &str = "/api/employee";

pub async fn get_employees(
    service: web::Data<dyn EmployeeService>,
) -> Result<HttpResponse, AppError> {
    let employees = service.get_all().await?;
    Ok(HttpResponse::Ok().json(employees))
}

pub async fn create_employee(
    service: web::Data<dyn EmployeeService>,
    new_employee: web::Json<NewEmployee>,
) -> Result<HttpResponse, AppError> {
    let employee = service.add(new_employee.into_inner()).await?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("{}?id={}", EMPLOYEE_ROUTE, employee.id)))
        .json(employee))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{initializer, DbContext};
    use crate::models::employee::Employee;
    use crate::repositories::employee::DbEmployeeRepository;
    use crate::services::employee::DefaultEmployeeService;
    use actix_web::{http::StatusCode, test, App};
    use chrono::NaiveDate;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn service_for(ctx: DbContext) -> web::Data<dyn EmployeeService> {
        let repository = Arc::new(DbEmployeeRepository::new(ctx));
        let service: Arc<dyn EmployeeService> = Arc::new(DefaultEmployeeService::new(repository));
        web::Data::from(service)
    }

    #[actix_web::test]
    async fn list_is_empty_array_without_rows() {
        let app = test::init_service(
            App::new()
                .app_data(service_for(DbContext::in_memory()))
                .configure(crate::handlers::configure),
        )
        .await;

        let req = test::TestRequest::get().uri(EMPLOYEE_ROUTE).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!([]));
    }

    #[actix_web::test]
    async fn seeded_store_lists_five_employees() {
        let ctx = DbContext::in_memory();
        initializer::initialize(&ctx).await.unwrap();
        let app = test::init_service(
            App::new()
                .app_data(service_for(ctx))
                .configure(crate::handlers::configure),
        )
        .await;

        let req = test::TestRequest::get().uri(EMPLOYEE_ROUTE).to_request();
        let body: Vec<Employee> = test::call_and_read_body_json(&app, req).await;
        let names: Vec<&str> = body.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Charlie", "Diana", "Eve"]);
        assert_eq!(body[3].joining_date, NaiveDate::from_ymd_opt(2014, 4, 4).unwrap());
    }

    #[actix_web::test]
    async fn create_with_name_only_defaults_the_date() {
        let app = test::init_service(
            App::new()
                .app_data(service_for(DbContext::in_memory()))
                .configure(crate::handlers::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(EMPLOYEE_ROUTE)
            .set_json(json!({ "name": "Zoe" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/api/employee?id=1"
        );
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "id": 1, "name": "Zoe", "joiningDate": "0001-01-01" }));
    }

    #[actix_web::test]
    async fn created_employee_round_trips_through_list() {
        let ctx = DbContext::in_memory();
        initializer::initialize(&ctx).await.unwrap();
        let app = test::init_service(
            App::new()
                .app_data(service_for(ctx))
                .configure(crate::handlers::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(EMPLOYEE_ROUTE)
            .set_json(json!({ "id": 1, "name": "Frank", "joiningDate": "2016-06-06" }))
            .to_request();
        let created: Employee = test::call_and_read_body_json(&app, req).await;
        assert_eq!(created.id, 6);

        let req = test::TestRequest::get().uri(EMPLOYEE_ROUTE).to_request();
        let listed: Vec<Employee> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed.len(), 6);
        assert_eq!(listed.iter().filter(|e| e.id == 1).count(), 1);
        assert!(listed.contains(&created));
    }

    #[actix_web::test]
    async fn malformed_body_is_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(service_for(DbContext::in_memory()))
                .configure(crate::handlers::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(EMPLOYEE_ROUTE)
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{ not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }
}
