//! Product domain services.
//!
//! Implements the driving ports for product reads and mutations. Product
//! writes never verify that the referenced department exists; listing and
//! form views resolve department references for display, fetching the
//! independent reads concurrently.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::try_join;

use crate::domain::ports::{
    DepartmentStore, DepartmentStoreError, InventoryCounts, ProductCommand, ProductFields,
    ProductFormValues, ProductFormView, ProductListEntry, ProductQuery, ProductStore,
    ProductStoreError, ProductSubmitOutcome, Redirect,
};
use crate::domain::validation::{FieldError, FormValidator};
use crate::domain::{Department, DepartmentId, Error, Product, ProductId};

/// Product service implementing the driving ports.
#[derive(Clone)]
pub struct ProductService<P, D> {
    products: Arc<P>,
    departments: Arc<D>,
}

impl<P, D> ProductService<P, D> {
    /// Create a new service over the given stores.
    pub fn new(products: Arc<P>, departments: Arc<D>) -> Self {
        Self {
            products,
            departments,
        }
    }
}

/// Sanitised product form fields with the parsed quantity, produced by
/// one validation pass.
struct ValidatedFields {
    name: String,
    sku: String,
    quantity_text: String,
    quantity: Option<i64>,
    department: String,
    errors: Vec<FieldError>,
}

impl ValidatedFields {
    fn into_form_values(self, id: Option<ProductId>) -> (ProductFormValues, Vec<FieldError>) {
        (
            ProductFormValues {
                id,
                name: self.name,
                sku: self.sku,
                quantity: self.quantity_text,
                department: self.department,
            },
            self.errors,
        )
    }
}

impl<P, D> ProductService<P, D>
where
    P: ProductStore,
    D: DepartmentStore,
{
    fn map_product_error(error: ProductStoreError) -> Error {
        match error {
            ProductStoreError::Connection { message } => {
                Error::service_unavailable(format!("product store unavailable: {message}"))
            }
            ProductStoreError::Query { message } => {
                Error::internal(format!("product store error: {message}"))
            }
        }
    }

    fn map_department_error(error: DepartmentStoreError) -> Error {
        match error {
            DepartmentStoreError::Connection { message } => {
                Error::service_unavailable(format!("department store unavailable: {message}"))
            }
            DepartmentStoreError::Query { message } => {
                Error::internal(format!("department store error: {message}"))
            }
        }
    }

    /// Apply the required rules and sanitisation shared by create and
    /// update. `require_department` matches the original asymmetry: the
    /// reference is mandatory on update but merely sanitised on create.
    fn validate(fields: &ProductFields, require_department: bool) -> ValidatedFields {
        let mut form = FormValidator::new();
        let name = form.require("name", fields.name.as_deref(), "Name must not be empty.");
        let sku = form.require("sku", fields.sku.as_deref(), "SKU must not be empty");
        let quantity_text = form.require(
            "quantity",
            fields.quantity.as_deref(),
            "Quantity must not be empty",
        );
        let quantity = form.numeric("quantity", &quantity_text, "Quantity must be a number");
        let department = if require_department {
            form.require(
                "department",
                fields.department.as_deref(),
                "Department must not be empty",
            )
        } else {
            crate::domain::sanitize::sanitize(fields.department.as_deref().unwrap_or_default())
        };
        ValidatedFields {
            name,
            sku,
            quantity_text,
            quantity,
            department,
            errors: form.into_errors(),
        }
    }

    /// The department reference must parse as an id; existence is
    /// deliberately not checked.
    fn parse_department(reference: &str) -> Result<DepartmentId, Error> {
        DepartmentId::parse(reference)
            .map_err(|_| Error::invalid_request("department must be a valid department id"))
    }

    async fn department_selection(&self) -> Result<Vec<Department>, Error> {
        self.departments
            .find_all_ordered()
            .await
            .map_err(Self::map_department_error)
    }

    /// Validation-failure view: echoed values plus the department list
    /// the form needs to redraw its selection control.
    async fn invalid_form(
        &self,
        id: Option<ProductId>,
        validated: ValidatedFields,
    ) -> Result<ProductSubmitOutcome, Error> {
        let departments = self.department_selection().await?;
        let (product, errors) = validated.into_form_values(id);
        Ok(ProductSubmitOutcome::Invalid(ProductFormView {
            departments,
            product: Some(product),
            errors,
        }))
    }
}

#[async_trait]
impl<P, D> ProductQuery for ProductService<P, D>
where
    P: ProductStore,
    D: DepartmentStore,
{
    async fn list(&self) -> Result<Vec<ProductListEntry>, Error> {
        let (products, departments) = try_join!(
            async {
                self.products
                    .find_all()
                    .await
                    .map_err(Self::map_product_error)
            },
            async { self.department_selection().await },
        )?;

        let by_id: HashMap<DepartmentId, Department> = departments
            .into_iter()
            .map(|department| (department.id, department))
            .collect();
        Ok(products
            .into_iter()
            .map(|product| ProductListEntry {
                id: product.id,
                name: product.name,
                department: by_id.get(&product.department).cloned(),
            })
            .collect())
    }

    async fn detail(&self, id: &ProductId) -> Result<Option<Product>, Error> {
        self.products
            .find_by_id(id)
            .await
            .map_err(Self::map_product_error)
    }

    async fn create_form(&self) -> Result<ProductFormView, Error> {
        let departments = self.department_selection().await?;
        Ok(ProductFormView {
            departments,
            product: None,
            errors: Vec::new(),
        })
    }

    async fn update_form(&self, id: &ProductId) -> Result<ProductFormView, Error> {
        let (product, departments) = try_join!(
            async {
                self.products
                    .find_by_id(id)
                    .await
                    .map_err(Self::map_product_error)
            },
            async { self.department_selection().await },
        )?;
        Ok(ProductFormView {
            departments,
            product: product.as_ref().map(ProductFormValues::for_product),
            errors: Vec::new(),
        })
    }

    async fn delete_confirmation(&self, id: &ProductId) -> Result<Option<Product>, Error> {
        self.products
            .find_by_id(id)
            .await
            .map_err(Self::map_product_error)
    }

    async fn inventory_counts(&self) -> Result<InventoryCounts, Error> {
        let (products, departments) = try_join!(
            async { self.products.count().await.map_err(Self::map_product_error) },
            async {
                self.departments
                    .count()
                    .await
                    .map_err(Self::map_department_error)
            },
        )?;
        Ok(InventoryCounts {
            products,
            departments,
        })
    }
}

#[async_trait]
impl<P, D> ProductCommand for ProductService<P, D>
where
    P: ProductStore,
    D: DepartmentStore,
{
    async fn create(&self, fields: ProductFields) -> Result<ProductSubmitOutcome, Error> {
        let validated = Self::validate(&fields, false);
        if !validated.errors.is_empty() {
            return self.invalid_form(None, validated).await;
        }

        let department = Self::parse_department(&validated.department)?;
        let quantity = validated.quantity.unwrap_or_default();
        let product = Product::new(
            validated.name.clone(),
            validated.sku.clone(),
            quantity,
            department,
        )
        .map_err(|err| Error::internal(format!("validated product failed construction: {err}")))?;

        self.products
            .insert(&product)
            .await
            .map_err(Self::map_product_error)?;
        Ok(ProductSubmitOutcome::Redirect(Redirect::to(
            product.canonical_path(),
        )))
    }

    async fn update(
        &self,
        id: &ProductId,
        fields: ProductFields,
    ) -> Result<ProductSubmitOutcome, Error> {
        let validated = Self::validate(&fields, true);
        if !validated.errors.is_empty() {
            return self.invalid_form(Some(*id), validated).await;
        }

        let department = Self::parse_department(&validated.department)?;
        let quantity = validated.quantity.unwrap_or_default();
        let product = Product::with_id(
            *id,
            validated.name.clone(),
            validated.sku.clone(),
            quantity,
            department,
        )
        .map_err(|err| Error::internal(format!("validated product failed construction: {err}")))?;

        let updated = self
            .products
            .update(&product)
            .await
            .map_err(Self::map_product_error)?;
        if updated {
            Ok(ProductSubmitOutcome::Redirect(Redirect::to(
                product.canonical_path(),
            )))
        } else {
            Err(Error::not_found("product not found"))
        }
    }

    async fn delete(&self, id: &ProductId) -> Result<Redirect, Error> {
        // Existence fetch mirrors the original flow; removal proceeds
        // unconditionally since nothing depends on a product.
        let _existing = self
            .products
            .find_by_id(id)
            .await
            .map_err(Self::map_product_error)?;
        self.products
            .delete_by_id(id)
            .await
            .map_err(Self::map_product_error)?;
        Ok(Redirect::to(Product::COLLECTION_PATH))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::domain::ports::{MockDepartmentStore, MockProductStore};
    use crate::domain::ErrorCode;

    use super::*;

    fn make_service(
        products: MockProductStore,
        departments: MockDepartmentStore,
    ) -> ProductService<MockProductStore, MockDepartmentStore> {
        ProductService::new(Arc::new(products), Arc::new(departments))
    }

    fn complete_fields(department: &DepartmentId) -> ProductFields {
        ProductFields {
            name: Some("Apple".to_owned()),
            sku: Some("AP-1".to_owned()),
            quantity: Some("10".to_owned()),
            department: Some(department.to_string()),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn create_persists_a_valid_product_and_redirects() {
        let department = DepartmentId::random();
        let mut products = MockProductStore::new();
        products
            .expect_insert()
            .withf(move |product| {
                product.name == "Apple"
                    && product.sku == "AP-1"
                    && product.quantity == 10
                    && product.department == department
            })
            .times(1)
            .return_once(|_| Ok(()));

        let service = make_service(products, MockDepartmentStore::new());
        let outcome = service
            .create(complete_fields(&department))
            .await
            .expect("create succeeds");

        let ProductSubmitOutcome::Redirect(redirect) = outcome else {
            panic!("expected a redirect");
        };
        assert!(redirect.to.starts_with("/grocery/product/"));
    }

    #[rstest]
    #[tokio::test]
    async fn create_lists_every_missing_field_and_persists_nothing() {
        let selection = vec![Department::new("Produce").expect("valid department")];
        let mut departments = MockDepartmentStore::new();
        departments
            .expect_find_all_ordered()
            .times(1)
            .return_once(move || Ok(selection));
        // No product-store expectations: any write would panic the mock.
        let service = make_service(MockProductStore::new(), departments);

        let outcome = service
            .create(ProductFields::default())
            .await
            .expect("create returns a view");

        let ProductSubmitOutcome::Invalid(view) = outcome else {
            panic!("expected a validation-error view");
        };
        let fields: Vec<&str> = view
            .errors
            .iter()
            .map(|error| error.field.as_str())
            .collect();
        assert_eq!(fields, vec!["name", "sku", "quantity"]);
        assert_eq!(view.departments.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn create_does_not_verify_the_department_reference_exists() {
        // The reference is parsed, never looked up: configuring no
        // department-store lookup expectation proves the absence.
        let department = DepartmentId::random();
        let mut products = MockProductStore::new();
        products.expect_insert().times(1).return_once(|_| Ok(()));

        let service = make_service(products, MockDepartmentStore::new());
        let outcome = service
            .create(complete_fields(&department))
            .await
            .expect("create succeeds");
        assert!(matches!(outcome, ProductSubmitOutcome::Redirect(_)));
    }

    #[rstest]
    #[tokio::test]
    async fn create_rejects_a_malformed_quantity_with_a_field_error() {
        let mut departments = MockDepartmentStore::new();
        departments
            .expect_find_all_ordered()
            .times(1)
            .return_once(|| Ok(Vec::new()));
        let service = make_service(MockProductStore::new(), departments);

        let outcome = service
            .create(ProductFields {
                name: Some("Apple".to_owned()),
                sku: Some("AP-1".to_owned()),
                quantity: Some("ten".to_owned()),
                department: Some(DepartmentId::random().to_string()),
            })
            .await
            .expect("create returns a view");

        let ProductSubmitOutcome::Invalid(view) = outcome else {
            panic!("expected a validation-error view");
        };
        assert_eq!(
            view.errors,
            vec![FieldError::new("quantity", "Quantity must be a number")]
        );
        let values = view.product.expect("echoed values");
        assert_eq!(values.quantity, "ten");
    }

    #[rstest]
    #[tokio::test]
    async fn create_with_an_unparseable_department_reference_fails() {
        let service = make_service(MockProductStore::new(), MockDepartmentStore::new());
        let error = service
            .create(ProductFields {
                name: Some("Apple".to_owned()),
                sku: Some("AP-1".to_owned()),
                quantity: Some("10".to_owned()),
                department: Some("not-an-id".to_owned()),
            })
            .await
            .expect_err("reference must parse");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[tokio::test]
    async fn update_requires_the_department_field() {
        let mut departments = MockDepartmentStore::new();
        departments
            .expect_find_all_ordered()
            .times(1)
            .return_once(|| Ok(Vec::new()));
        let service = make_service(MockProductStore::new(), departments);

        let outcome = service
            .update(
                &ProductId::random(),
                ProductFields {
                    name: Some("Apple".to_owned()),
                    sku: Some("AP-1".to_owned()),
                    quantity: Some("10".to_owned()),
                    department: None,
                },
            )
            .await
            .expect("update returns a view");

        let ProductSubmitOutcome::Invalid(view) = outcome else {
            panic!("expected a validation-error view");
        };
        assert_eq!(
            view.errors,
            vec![FieldError::new("department", "Department must not be empty")]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn update_overwrites_the_record_preserving_its_id() {
        let id = ProductId::random();
        let department = DepartmentId::random();
        let mut products = MockProductStore::new();
        products
            .expect_update()
            .withf(move |product| product.id == id && product.quantity == 10)
            .times(1)
            .return_once(|_| Ok(true));

        let service = make_service(products, MockDepartmentStore::new());
        let outcome = service
            .update(&id, complete_fields(&department))
            .await
            .expect("update succeeds");

        assert_eq!(
            outcome,
            ProductSubmitOutcome::Redirect(Redirect::to(format!("/grocery/product/{id}")))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_a_missing_product_is_not_found() {
        let mut products = MockProductStore::new();
        products.expect_update().times(1).return_once(|_| Ok(false));

        let service = make_service(products, MockDepartmentStore::new());
        let error = service
            .update(
                &ProductId::random(),
                complete_fields(&DepartmentId::random()),
            )
            .await
            .expect_err("missing product");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_removes_unconditionally() {
        let id = ProductId::random();
        let mut products = MockProductStore::new();
        products
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Ok(None));
        products
            .expect_delete_by_id()
            .withf(move |candidate| *candidate == id)
            .times(1)
            .return_once(|_| Ok(false));

        let service = make_service(products, MockDepartmentStore::new());
        let redirect = service.delete(&id).await.expect("delete succeeds");
        assert_eq!(redirect.to, Product::COLLECTION_PATH);
    }

    #[rstest]
    #[tokio::test]
    async fn list_resolves_department_references() {
        let department = Department::new("Produce").expect("valid department");
        let department_id = department.id;
        let known = Product::new("Apple", "AP-1", 10, department_id).expect("valid product");
        let dangling =
            Product::new("Orphan", "OR-1", 1, DepartmentId::random()).expect("valid product");
        let known_clone = known.clone();
        let dangling_clone = dangling.clone();
        let department_clone = department.clone();

        let mut products = MockProductStore::new();
        products
            .expect_find_all()
            .times(1)
            .return_once(move || Ok(vec![known_clone, dangling_clone]));
        let mut departments = MockDepartmentStore::new();
        departments
            .expect_find_all_ordered()
            .times(1)
            .return_once(move || Ok(vec![department_clone]));

        let service = make_service(products, departments);
        let listed = service.list().await.expect("list succeeds");

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].department, Some(department));
        assert_eq!(listed[1].department, None);
    }

    #[rstest]
    #[tokio::test]
    async fn inventory_counts_join_both_stores() {
        let mut products = MockProductStore::new();
        products.expect_count().times(1).return_once(|| Ok(7));
        let mut departments = MockDepartmentStore::new();
        departments.expect_count().times(1).return_once(|| Ok(3));

        let service = make_service(products, departments);
        let counts = service.inventory_counts().await.expect("counts succeed");
        assert_eq!(
            counts,
            InventoryCounts {
                products: 7,
                departments: 3
            }
        );
    }

    #[rstest]
    #[tokio::test]
    async fn a_failed_parallel_read_fails_the_inventory_counts() {
        let mut products = MockProductStore::new();
        products
            .expect_count()
            .return_once(|| Err(ProductStoreError::connection("refused")));
        let mut departments = MockDepartmentStore::new();
        departments.expect_count().returning(|| Ok(3));

        let service = make_service(products, departments);
        let error = service
            .inventory_counts()
            .await
            .expect_err("join fails as a whole");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    #[tokio::test]
    async fn update_form_joins_product_and_departments() {
        let department = Department::new("Produce").expect("valid department");
        let product = Product::new("Apple", "AP-1", 10, department.id).expect("valid product");
        let id = product.id;
        let product_clone = product.clone();
        let department_clone = department.clone();

        let mut products = MockProductStore::new();
        products
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(product_clone)));
        let mut departments = MockDepartmentStore::new();
        departments
            .expect_find_all_ordered()
            .times(1)
            .return_once(move || Ok(vec![department_clone]));

        let service = make_service(products, departments);
        let form = service.update_form(&id).await.expect("form succeeds");
        assert_eq!(form.product, Some(ProductFormValues::for_product(&product)));
        assert_eq!(form.departments, vec![department]);
    }
}
