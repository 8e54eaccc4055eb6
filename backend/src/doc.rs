//! OpenAPI document aggregating the HTTP surface.

use utoipa::OpenApi;

use crate::domain::Error;
use crate::domain::validation::FieldError;
use crate::inbound::http::departments::{
    DepartmentDeleteForm, DepartmentDetailResponse, DepartmentForm, DepartmentFormResponse,
    DepartmentFormValuesResponse,
};
use crate::inbound::http::home::InventoryCountsResponse;
use crate::inbound::http::products::{
    ProductDeleteForm, ProductForm, ProductFormResponse, ProductFormValuesResponse,
    ProductListEntryResponse,
};
use crate::inbound::http::schemas::{DepartmentView, ProductView};

/// Public OpenAPI surface used by Swagger UI and tooling.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::inbound::http::home::index,
        crate::inbound::http::departments::list_departments,
        crate::inbound::http::departments::create_department_form,
        crate::inbound::http::departments::create_department,
        crate::inbound::http::departments::department_detail,
        crate::inbound::http::departments::delete_department_form,
        crate::inbound::http::departments::delete_department,
        crate::inbound::http::departments::update_department_form,
        crate::inbound::http::departments::update_department,
        crate::inbound::http::products::list_products,
        crate::inbound::http::products::create_product_form,
        crate::inbound::http::products::create_product,
        crate::inbound::http::products::product_detail,
        crate::inbound::http::products::delete_product_form,
        crate::inbound::http::products::delete_product,
        crate::inbound::http::products::update_product_form,
        crate::inbound::http::products::update_product,
    ),
    components(schemas(
        Error,
        FieldError,
        DepartmentView,
        ProductView,
        DepartmentForm,
        DepartmentDeleteForm,
        DepartmentFormValuesResponse,
        DepartmentFormResponse,
        DepartmentDetailResponse,
        ProductForm,
        ProductDeleteForm,
        ProductFormValuesResponse,
        ProductFormResponse,
        ProductListEntryResponse,
        InventoryCountsResponse,
    )),
    tags(
        (name = "home", description = "Inventory summary"),
        (name = "departments", description = "Department CRUD workflows"),
        (name = "products", description = "Product CRUD workflows"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use utoipa::OpenApi;

    use super::ApiDoc;

    #[rstest]
    #[case("/grocery/departments")]
    #[case("/grocery/department/create")]
    #[case("/grocery/department/{id}/delete")]
    #[case("/grocery/products")]
    #[case("/grocery/product/{id}/update")]
    #[case("/grocery/")]
    fn documents_the_route_table(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(
            doc.paths.paths.contains_key(path),
            "missing path: {path}"
        );
    }
}
