//! Server construction and wiring.

mod config;

pub use config::{BIND_ADDR_VAR, ServerConfig};

use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::{DepartmentCommand, DepartmentQuery, ProductCommand, ProductQuery};
use crate::domain::{DepartmentService, ProductService};
use crate::inbound::http::departments::{
    create_department, create_department_form, delete_department, delete_department_form,
    department_detail, list_departments, update_department, update_department_form,
};
use crate::inbound::http::home::index;
use crate::inbound::http::products::{
    create_product, create_product_form, delete_product, delete_product_form, list_products,
    product_detail, update_product, update_product_form,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::MemoryStore;

/// Build handler state over a shared entity store.
///
/// Both services read and write the same store; the services are the only
/// mutable-state owners beyond it.
pub fn build_state(store: Arc<MemoryStore>) -> HttpState {
    let departments = Arc::new(DepartmentService::new(Arc::clone(&store), Arc::clone(&store)));
    let products = Arc::new(ProductService::new(Arc::clone(&store), store));
    let departments_query: Arc<dyn DepartmentQuery> = departments.clone();
    let departments_command: Arc<dyn DepartmentCommand> = departments;
    let products_query: Arc<dyn ProductQuery> = products.clone();
    let products_command: Arc<dyn ProductCommand> = products;
    HttpState::new(
        departments_query,
        departments_command,
        products_query,
        products_command,
    )
}

/// The `/grocery` route table.
///
/// Create routes are registered before the `{id}` matchers so the literal
/// `create` segment is never captured as an identifier.
pub fn grocery_scope() -> actix_web::Scope {
    web::scope("/grocery")
        .service(index)
        .service(create_department_form)
        .service(create_department)
        .service(list_departments)
        .service(delete_department_form)
        .service(delete_department)
        .service(update_department_form)
        .service(update_department)
        .service(department_detail)
        .service(create_product_form)
        .service(create_product)
        .service(list_products)
        .service(delete_product_form)
        .service(delete_product)
        .service(update_product_form)
        .service(update_product)
        .service(product_detail)
}

/// Bind and start the HTTP server.
pub fn run(config: ServerConfig) -> std::io::Result<Server> {
    let state = build_state(Arc::new(MemoryStore::new()));
    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Trace)
            .service(grocery_scope());
        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));
        app
    })
    .bind(config.bind_addr())?;
    Ok(server.run())
}
