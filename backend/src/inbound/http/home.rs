//! Grocery home page handler.
//!
//! ```text
//! GET /grocery/  Inventory counts
//! ```

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::InventoryCounts;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Home-page inventory summary.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryCountsResponse {
    /// Number of stored products.
    pub product_count: u64,
    /// Number of stored departments.
    pub department_count: u64,
}

impl From<InventoryCounts> for InventoryCountsResponse {
    fn from(value: InventoryCounts) -> Self {
        Self {
            product_count: value.products,
            department_count: value.departments,
        }
    }
}

/// Inventory counts for the home page.
#[utoipa::path(
    get,
    path = "/grocery/",
    responses(
        (status = 200, description = "Product and department counts", body = InventoryCountsResponse),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["home"],
    operation_id = "inventoryIndex"
)]
#[get("/")]
pub async fn index(state: web::Data<HttpState>) -> ApiResult<web::Json<InventoryCountsResponse>> {
    let counts = state.products_query.inventory_counts().await?;
    Ok(web::Json(InventoryCountsResponse::from(counts)))
}
