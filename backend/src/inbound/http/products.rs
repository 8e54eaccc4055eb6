//! Product HTTP handlers.
//!
//! ```text
//! GET  /grocery/products            Product list with departments resolved
//! GET  /grocery/product/create      Blank create form with selection list
//! POST /grocery/product/create      Create
//! GET  /grocery/product/{id}        Detail
//! GET  /grocery/product/{id}/delete Deletion confirmation
//! POST /grocery/product/{id}/delete Unconditional delete
//! GET  /grocery/product/{id}/update Populated form
//! POST /grocery/product/{id}/update Update in place
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    ProductFields, ProductFormValues, ProductFormView, ProductListEntry, ProductSubmitOutcome,
    Redirect,
};
use crate::domain::validation::FieldError;
use crate::domain::{Error, ProductId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{DepartmentView, ProductView};
use crate::inbound::http::state::HttpState;

/// Form payload for product create and update submissions.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct ProductForm {
    /// Submitted product name.
    pub name: Option<String>,
    /// Submitted SKU.
    pub sku: Option<String>,
    /// Submitted quantity text.
    pub quantity: Option<String>,
    /// Submitted department reference.
    pub department: Option<String>,
}

/// Form payload accompanying a delete submission. The entity to remove is
/// named by the path; the body field is legacy and ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct ProductDeleteForm {
    /// Redundant copy of the product id.
    pub productid: Option<String>,
}

/// One row of the product listing.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductListEntryResponse {
    /// Product identifier.
    pub id: String,
    /// Product display name.
    pub name: String,
    /// Canonical path of the product's detail page.
    pub url: String,
    /// Resolved department, absent when the reference dangles.
    pub department: Option<DepartmentView>,
}

impl From<ProductListEntry> for ProductListEntryResponse {
    fn from(value: ProductListEntry) -> Self {
        Self {
            id: value.id.to_string(),
            url: crate::domain::product::canonical_path(&value.id),
            name: value.name,
            department: value.department.as_ref().map(DepartmentView::from),
        }
    }
}

/// Echoed form values in a form response.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductFormValuesResponse {
    /// Identifier, present when editing an existing product.
    pub id: Option<String>,
    /// Sanitised name as submitted or stored.
    pub name: String,
    /// Sanitised SKU as submitted or stored.
    pub sku: String,
    /// Sanitised quantity text as submitted or stored.
    pub quantity: String,
    /// Sanitised department reference as submitted or stored.
    pub department: String,
}

impl From<ProductFormValues> for ProductFormValuesResponse {
    fn from(value: ProductFormValues) -> Self {
        Self {
            id: value.id.map(|id| id.to_string()),
            name: value.name,
            sku: value.sku,
            quantity: value.quantity,
            department: value.department,
        }
    }
}

/// Form view response: selection list, echoed values, per-field errors.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductFormResponse {
    /// Departments available for selection, ordered by name.
    pub departments: Vec<DepartmentView>,
    /// Values to redraw, absent for a blank create form.
    pub product: Option<ProductFormValuesResponse>,
    /// Ordered validation failures.
    pub errors: Vec<FieldError>,
}

impl From<ProductFormView> for ProductFormResponse {
    fn from(value: ProductFormView) -> Self {
        Self {
            departments: value.departments.iter().map(DepartmentView::from).collect(),
            product: value.product.map(ProductFormValuesResponse::from),
            errors: value.errors,
        }
    }
}

fn parse_product_id(raw: &str) -> Result<ProductId, Error> {
    ProductId::parse(raw).map_err(|_| Error::invalid_request("product id must be a valid id"))
}

fn see_other(redirect: Redirect) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", redirect.to))
        .finish()
}

/// List all products with department references resolved.
#[utoipa::path(
    get,
    path = "/grocery/products",
    responses(
        (status = 200, description = "Products with resolved departments", body = [ProductListEntryResponse]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["products"],
    operation_id = "listProducts"
)]
#[get("/products")]
pub async fn list_products(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ProductListEntryResponse>>> {
    let products = state.products_query.list().await?;
    Ok(web::Json(
        products
            .into_iter()
            .map(ProductListEntryResponse::from)
            .collect(),
    ))
}

/// Blank product create form with the department selection list.
#[utoipa::path(
    get,
    path = "/grocery/product/create",
    responses((status = 200, description = "Empty form view", body = ProductFormResponse)),
    tags = ["products"],
    operation_id = "productCreateForm"
)]
#[get("/product/create")]
pub async fn create_product_form(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<ProductFormResponse>> {
    let view = state.products_query.create_form().await?;
    Ok(web::Json(ProductFormResponse::from(view)))
}

/// Create a product. The department reference is stored unverified.
#[utoipa::path(
    post,
    path = "/grocery/product/create",
    request_body(content = ProductForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created; Location carries the canonical path"),
        (status = 200, description = "Validation failed", body = ProductFormResponse),
        (status = 400, description = "Malformed department reference", body = Error)
    ),
    tags = ["products"],
    operation_id = "createProduct"
)]
#[post("/product/create")]
pub async fn create_product(
    state: web::Data<HttpState>,
    form: web::Form<ProductForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let fields = ProductFields {
        name: form.name,
        sku: form.sku,
        quantity: form.quantity,
        department: form.department,
    };
    match state.products.create(fields).await? {
        ProductSubmitOutcome::Redirect(redirect) => Ok(see_other(redirect)),
        ProductSubmitOutcome::Invalid(view) => {
            Ok(HttpResponse::Ok().json(ProductFormResponse::from(view)))
        }
    }
}

/// Product detail.
#[utoipa::path(
    get,
    path = "/grocery/product/{id}",
    params(("id" = String, Path, description = "Product identifier")),
    responses(
        (status = 200, description = "The product", body = ProductView),
        (status = 400, description = "Malformed identifier", body = Error),
        (status = 404, description = "No such product", body = Error)
    ),
    tags = ["products"],
    operation_id = "productDetail"
)]
#[get("/product/{id}")]
pub async fn product_detail(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProductView>> {
    let id = parse_product_id(&path.into_inner())?;
    let product = state
        .products_query
        .detail(&id)
        .await?
        .ok_or_else(|| Error::not_found("product not found"))?;
    Ok(web::Json(ProductView::from(product)))
}

/// Deletion-confirmation view: the product to be removed.
#[utoipa::path(
    get,
    path = "/grocery/product/{id}/delete",
    params(("id" = String, Path, description = "Product identifier")),
    responses(
        (status = 200, description = "Confirmation data", body = ProductView),
        (status = 404, description = "No such product", body = Error)
    ),
    tags = ["products"],
    operation_id = "productDeleteForm"
)]
#[get("/product/{id}/delete")]
pub async fn delete_product_form(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProductView>> {
    let id = parse_product_id(&path.into_inner())?;
    let product = state
        .products_query
        .delete_confirmation(&id)
        .await?
        .ok_or_else(|| Error::not_found("product not found"))?;
    Ok(web::Json(ProductView::from(product)))
}

/// Delete a product unconditionally; nothing depends on a product.
#[utoipa::path(
    post,
    path = "/grocery/product/{id}/delete",
    params(("id" = String, Path, description = "Product identifier")),
    request_body(content = ProductDeleteForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Deleted; Location carries the product listing")
    ),
    tags = ["products"],
    operation_id = "deleteProduct"
)]
#[post("/product/{id}/delete")]
pub async fn delete_product(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    _form: web::Form<ProductDeleteForm>,
) -> ApiResult<HttpResponse> {
    let id = parse_product_id(&path.into_inner())?;
    let redirect = state.products.delete(&id).await?;
    Ok(see_other(redirect))
}

/// Populated form for editing an existing product.
#[utoipa::path(
    get,
    path = "/grocery/product/{id}/update",
    params(("id" = String, Path, description = "Product identifier")),
    responses(
        (status = 200, description = "Populated form view", body = ProductFormResponse),
        (status = 404, description = "No such product", body = Error)
    ),
    tags = ["products"],
    operation_id = "productUpdateForm"
)]
#[get("/product/{id}/update")]
pub async fn update_product_form(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProductFormResponse>> {
    let id = parse_product_id(&path.into_inner())?;
    let view = state.products_query.update_form(&id).await?;
    if view.product.is_none() {
        return Err(Error::not_found("product not found"));
    }
    Ok(web::Json(ProductFormResponse::from(view)))
}

/// Overwrite a product, preserving its id.
#[utoipa::path(
    post,
    path = "/grocery/product/{id}/update",
    params(("id" = String, Path, description = "Product identifier")),
    request_body(content = ProductForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated; Location carries the canonical path"),
        (status = 200, description = "Validation failed", body = ProductFormResponse),
        (status = 404, description = "No such product", body = Error)
    ),
    tags = ["products"],
    operation_id = "updateProduct"
)]
#[post("/product/{id}/update")]
pub async fn update_product(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    form: web::Form<ProductForm>,
) -> ApiResult<HttpResponse> {
    let id = parse_product_id(&path.into_inner())?;
    let form = form.into_inner();
    let fields = ProductFields {
        name: form.name,
        sku: form.sku,
        quantity: form.quantity,
        department: form.department,
    };
    match state.products.update(&id, fields).await? {
        ProductSubmitOutcome::Redirect(redirect) => Ok(see_other(redirect)),
        ProductSubmitOutcome::Invalid(view) => {
            Ok(HttpResponse::Ok().json(ProductFormResponse::from(view)))
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use rstest::rstest;
    use serde_json::Value;

    use crate::domain::{Department, DepartmentId};
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
                    .service(create_product_form)
                    .service(create_product)
                    .service(list_products)
                    .service(delete_product_form)
                    .service(delete_product)
                    .service(update_product_form)
                    .service(update_product)
                    .service(product_detail),
            )
    }

    #[rstest]
    #[actix_rt::test]
    async fn listing_answers_an_empty_array_over_the_fixture() {
        let app = actix_test::init_service(test_app()).await;
        let req = actix_test::TestRequest::get()
            .uri("/grocery/products")
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, serde_json::json!([]));
    }

    #[rstest]
    #[actix_rt::test]
    async fn delete_submission_redirects_to_the_listing() {
        let app = actix_test::init_service(test_app()).await;
        let req = actix_test::TestRequest::post()
            .uri(&format!(
                "/grocery/product/{}/delete",
                crate::domain::ProductId::random()
            ))
            .set_form(ProductDeleteForm::default())
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        let location = res
            .headers()
            .get("Location")
            .and_then(|value| value.to_str().ok());
        assert_eq!(location, Some("/grocery/products"));
    }

    #[rstest]
    #[actix_rt::test]
    async fn detail_of_a_missing_product_is_not_found() {
        let app = actix_test::init_service(test_app()).await;
        let req = actix_test::TestRequest::get()
            .uri(&format!(
                "/grocery/product/{}",
                crate::domain::ProductId::random()
            ))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    fn list_entry_response_resolves_the_department() {
        let department = Department::new("Produce").expect("valid department");
        let entry = ProductListEntry {
            id: crate::domain::ProductId::random(),
            name: "Apple".to_owned(),
            department: Some(department),
        };
        let response = ProductListEntryResponse::from(entry);
        assert_eq!(
            response.department.map(|d| d.name),
            Some("Produce".to_owned())
        );
        assert!(response.url.starts_with("/grocery/product/"));
    }

    #[rstest]
    fn form_response_keeps_the_selection_list_ordered() {
        let bakery = Department::new("Bakery").expect("valid department");
        let produce = Department::new("Produce").expect("valid department");
        let view = ProductFormView {
            departments: vec![bakery, produce],
            product: None,
            errors: Vec::new(),
        };
        let response = ProductFormResponse::from(view);
        let names: Vec<&str> = response
            .departments
            .iter()
            .map(|department| department.name.as_str())
            .collect();
        assert_eq!(names, vec!["Bakery", "Produce"]);
    }

    #[rstest]
    fn form_values_echo_the_submitted_text() {
        let values = ProductFormValues {
            id: None,
            name: "Apple".to_owned(),
            sku: "AP-1".to_owned(),
            quantity: "ten".to_owned(),
            department: DepartmentId::random().to_string(),
        };
        let response = ProductFormValuesResponse::from(values);
        assert_eq!(response.quantity, "ten");
        assert!(response.id.is_none());
    }
}
