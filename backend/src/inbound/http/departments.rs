//! Department HTTP handlers.
//!
//! ```text
//! GET  /grocery/departments            Department list
//! GET  /grocery/department/create      Blank create form
//! POST /grocery/department/create      Create (idempotent by name)
//! GET  /grocery/department/{id}        Detail with dependent products
//! GET  /grocery/department/{id}/delete Deletion confirmation
//! POST /grocery/department/{id}/delete Guarded delete
//! GET  /grocery/department/{id}/update Populated form
//! POST /grocery/department/{id}/update Update in place
//! ```
//!
//! Successful mutations answer `303 See Other` with the affected entity's
//! canonical path in `Location`; validation failures answer `200` with the
//! form view so the submitted values can be redrawn.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    DepartmentDeleteOutcome, DepartmentDetailView, DepartmentFields, DepartmentFormValues,
    DepartmentFormView, DepartmentSubmitOutcome, Redirect,
};
use crate::domain::validation::FieldError;
use crate::domain::{DepartmentId, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{DepartmentView, ProductView};
use crate::inbound::http::state::HttpState;

/// Form payload for department create and update submissions.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct DepartmentForm {
    /// Submitted department name.
    pub name: Option<String>,
}

/// Form payload accompanying a delete submission. The entity to remove is
/// named by the path; the body field is legacy and ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct DepartmentDeleteForm {
    /// Redundant copy of the department id.
    pub departmentid: Option<String>,
}

/// Echoed form values in a form response.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentFormValuesResponse {
    /// Identifier, present when editing an existing department.
    pub id: Option<String>,
    /// Sanitised name as submitted or stored.
    pub name: String,
}

impl From<DepartmentFormValues> for DepartmentFormValuesResponse {
    fn from(value: DepartmentFormValues) -> Self {
        Self {
            id: value.id.map(|id| id.to_string()),
            name: value.name,
        }
    }
}

/// Form view response: echoed values plus per-field errors.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentFormResponse {
    /// Values to redraw, absent for a blank create form.
    pub department: Option<DepartmentFormValuesResponse>,
    /// Ordered validation failures.
    pub errors: Vec<FieldError>,
}

impl From<DepartmentFormView> for DepartmentFormResponse {
    fn from(value: DepartmentFormView) -> Self {
        Self {
            department: value.department.map(DepartmentFormValuesResponse::from),
            errors: value.errors,
        }
    }
}

/// Detail response joining a department with its dependent products.
///
/// Doubles as the deletion-confirmation body: when a delete is refused
/// the dependents listed here are the reason.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentDetailResponse {
    /// The department, absent when a blocked delete outlived its parent.
    pub department: Option<DepartmentView>,
    /// Every product referencing the department.
    pub products: Vec<ProductView>,
}

impl From<DepartmentDetailView> for DepartmentDetailResponse {
    fn from(value: DepartmentDetailView) -> Self {
        Self {
            department: value.department.as_ref().map(DepartmentView::from),
            products: value.products.iter().map(ProductView::from).collect(),
        }
    }
}

fn parse_department_id(raw: &str) -> Result<DepartmentId, Error> {
    DepartmentId::parse(raw)
        .map_err(|_| Error::invalid_request("department id must be a valid id"))
}

fn see_other(redirect: Redirect) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", redirect.to))
        .finish()
}

/// List all departments, ascending by name.
#[utoipa::path(
    get,
    path = "/grocery/departments",
    responses(
        (status = 200, description = "Departments ordered by name", body = [DepartmentView]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["departments"],
    operation_id = "listDepartments"
)]
#[get("/departments")]
pub async fn list_departments(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<DepartmentView>>> {
    let departments = state.departments_query.list().await?;
    Ok(web::Json(
        departments.into_iter().map(DepartmentView::from).collect(),
    ))
}

/// Blank department create form.
#[utoipa::path(
    get,
    path = "/grocery/department/create",
    responses((status = 200, description = "Empty form view", body = DepartmentFormResponse)),
    tags = ["departments"],
    operation_id = "departmentCreateForm"
)]
#[get("/department/create")]
pub async fn create_department_form() -> web::Json<DepartmentFormResponse> {
    web::Json(DepartmentFormResponse::from(DepartmentFormView::default()))
}

/// Create a department; an existing name redirects to the original.
#[utoipa::path(
    post,
    path = "/grocery/department/create",
    request_body(content = DepartmentForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created or already existing; Location carries the canonical path"),
        (status = 200, description = "Validation failed", body = DepartmentFormResponse),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["departments"],
    operation_id = "createDepartment"
)]
#[post("/department/create")]
pub async fn create_department(
    state: web::Data<HttpState>,
    form: web::Form<DepartmentForm>,
) -> ApiResult<HttpResponse> {
    let fields = DepartmentFields {
        name: form.into_inner().name,
    };
    match state.departments.create(fields).await? {
        DepartmentSubmitOutcome::Redirect(redirect) => Ok(see_other(redirect)),
        DepartmentSubmitOutcome::Invalid(view) => {
            Ok(HttpResponse::Ok().json(DepartmentFormResponse::from(view)))
        }
    }
}

/// Department detail with its dependent products.
#[utoipa::path(
    get,
    path = "/grocery/department/{id}",
    params(("id" = String, Path, description = "Department identifier")),
    responses(
        (status = 200, description = "Department with dependents", body = DepartmentDetailResponse),
        (status = 400, description = "Malformed identifier", body = Error),
        (status = 404, description = "No such department", body = Error)
    ),
    tags = ["departments"],
    operation_id = "departmentDetail"
)]
#[get("/department/{id}")]
pub async fn department_detail(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DepartmentDetailResponse>> {
    let id = parse_department_id(&path.into_inner())?;
    let view = state.departments_query.detail(&id).await?;
    if view.department.is_none() {
        return Err(Error::not_found("department not found"));
    }
    Ok(web::Json(DepartmentDetailResponse::from(view)))
}

/// Deletion-confirmation view: the department and the dependents that
/// would block its removal.
#[utoipa::path(
    get,
    path = "/grocery/department/{id}/delete",
    params(("id" = String, Path, description = "Department identifier")),
    responses(
        (status = 200, description = "Confirmation data", body = DepartmentDetailResponse),
        (status = 404, description = "No such department", body = Error)
    ),
    tags = ["departments"],
    operation_id = "departmentDeleteForm"
)]
#[get("/department/{id}/delete")]
pub async fn delete_department_form(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DepartmentDetailResponse>> {
    let id = parse_department_id(&path.into_inner())?;
    let view = state.departments_query.delete_confirmation(&id).await?;
    if view.department.is_none() {
        return Err(Error::not_found("department not found"));
    }
    Ok(web::Json(DepartmentDetailResponse::from(view)))
}

/// Delete a department unless dependent products block it.
#[utoipa::path(
    post,
    path = "/grocery/department/{id}/delete",
    params(("id" = String, Path, description = "Department identifier")),
    request_body(content = DepartmentDeleteForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Deleted; Location carries the department listing"),
        (status = 200, description = "Refused: dependent products exist", body = DepartmentDetailResponse)
    ),
    tags = ["departments"],
    operation_id = "deleteDepartment"
)]
#[post("/department/{id}/delete")]
pub async fn delete_department(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    _form: web::Form<DepartmentDeleteForm>,
) -> ApiResult<HttpResponse> {
    let id = parse_department_id(&path.into_inner())?;
    match state.departments.delete(&id).await? {
        DepartmentDeleteOutcome::Redirect(redirect) => Ok(see_other(redirect)),
        DepartmentDeleteOutcome::Blocked(view) => {
            Ok(HttpResponse::Ok().json(DepartmentDetailResponse::from(view)))
        }
    }
}

/// Populated form for editing an existing department.
#[utoipa::path(
    get,
    path = "/grocery/department/{id}/update",
    params(("id" = String, Path, description = "Department identifier")),
    responses(
        (status = 200, description = "Populated form view", body = DepartmentFormResponse),
        (status = 404, description = "No such department", body = Error)
    ),
    tags = ["departments"],
    operation_id = "departmentUpdateForm"
)]
#[get("/department/{id}/update")]
pub async fn update_department_form(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DepartmentFormResponse>> {
    let id = parse_department_id(&path.into_inner())?;
    let view = state.departments_query.update_form(&id).await?;
    if view.department.is_none() {
        return Err(Error::not_found("department not found"));
    }
    Ok(web::Json(DepartmentFormResponse::from(view)))
}

/// Overwrite a department's name, preserving its id.
#[utoipa::path(
    post,
    path = "/grocery/department/{id}/update",
    params(("id" = String, Path, description = "Department identifier")),
    request_body(content = DepartmentForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated; Location carries the canonical path"),
        (status = 200, description = "Validation failed", body = DepartmentFormResponse),
        (status = 404, description = "No such department", body = Error)
    ),
    tags = ["departments"],
    operation_id = "updateDepartment"
)]
#[post("/department/{id}/update")]
pub async fn update_department(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    form: web::Form<DepartmentForm>,
) -> ApiResult<HttpResponse> {
    let id = parse_department_id(&path.into_inner())?;
    let fields = DepartmentFields {
        name: form.into_inner().name,
    };
    match state.departments.update(&id, fields).await? {
        DepartmentSubmitOutcome::Redirect(redirect) => Ok(see_other(redirect)),
        DepartmentSubmitOutcome::Invalid(view) => {
            Ok(HttpResponse::Ok().json(DepartmentFormResponse::from(view)))
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use rstest::rstest;
    use serde_json::Value;

    use crate::inbound::http::state::test_support::fixture_state;

    use super::*;

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(fixture_state()))
            .service(
                web::scope("/grocery")
                    .service(create_department_form)
                    .service(create_department)
                    .service(list_departments)
                    .service(delete_department_form)
                    .service(delete_department)
                    .service(update_department_form)
                    .service(update_department)
                    .service(department_detail),
            )
    }

    #[rstest]
    #[actix_rt::test]
    async fn listing_answers_an_empty_array_over_the_fixture() {
        let app = actix_test::init_service(test_app()).await;
        let req = actix_test::TestRequest::get()
            .uri("/grocery/departments")
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, serde_json::json!([]));
    }

    #[rstest]
    #[actix_rt::test]
    async fn blank_create_form_has_no_values_or_errors() {
        let app = actix_test::init_service(test_app()).await;
        let req = actix_test::TestRequest::get()
            .uri("/grocery/department/create")
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["department"], Value::Null);
        assert_eq!(body["errors"], serde_json::json!([]));
    }

    #[rstest]
    #[actix_rt::test]
    async fn create_submission_redirects_with_a_location() {
        let app = actix_test::init_service(test_app()).await;
        let req = actix_test::TestRequest::post()
            .uri("/grocery/department/create")
            .set_form(DepartmentForm {
                name: Some("Produce".to_owned()),
            })
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert!(res.headers().contains_key("Location"));
    }

    #[rstest]
    #[actix_rt::test]
    async fn detail_of_a_missing_department_is_not_found() {
        let app = actix_test::init_service(test_app()).await;
        let req = actix_test::TestRequest::get()
            .uri(&format!(
                "/grocery/department/{}",
                crate::domain::DepartmentId::random()
            ))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[actix_rt::test]
    async fn a_malformed_identifier_is_rejected() {
        let app = actix_test::init_service(test_app()).await;
        let req = actix_test::TestRequest::get()
            .uri("/grocery/department/not-a-uuid")
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    fn detail_response_maps_domain_values() {
        let department = crate::domain::Department::new("Produce").expect("valid department");
        let product = crate::domain::Product::new("Apple", "AP-1", 10, department.id)
            .expect("valid product");
        let view = DepartmentDetailView {
            department: Some(department.clone()),
            products: vec![product],
        };
        let response = DepartmentDetailResponse::from(view);
        assert_eq!(
            response.department.map(|d| d.name),
            Some("Produce".to_owned())
        );
        assert_eq!(response.products.len(), 1);
    }
}
