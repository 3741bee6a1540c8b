//! # Cart Commands
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │  CART                                              3 items     │
//! ├────────────────────────────────────────────────────────────────┤
//! │  Mug                       x2    $10.00        $20.00          │
//! │  Pen                       x1     $5.00         $5.00          │
//! ├────────────────────────────────────────────────────────────────┤
//! │  TOTAL                                         $25.00          │
//! └────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use storefront_catalog::CatalogLoader;
use storefront_core::{Cart, CartLine, ProductId};
use tracing::debug;

use crate::error::ApiError;
use crate::output::Output;
use crate::state::CartStore;

/// Cart response: lines plus derived totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLine>,

    /// Total in cents, exact.
    pub total_cents: i64,

    /// Total formatted for display.
    pub total_display: String,

    pub item_count: u64,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.lines().to_vec(),
            total_cents: cart.total().cents(),
            total_display: cart.total().to_string(),
            item_count: cart.item_count(),
        }
    }
}

pub fn get_cart(cart: &CartStore) -> CartResponse {
    debug!("get_cart command");
    CartResponse::from(&cart.snapshot())
}

/// Looks the product up in the catalog, then adds one unit.
///
/// The cart keeps the product as fetched now, price included.
pub async fn add_to_cart(
    catalog: &CatalogLoader,
    cart: &CartStore,
    product_id: ProductId,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "add_to_cart command");

    let product = catalog.fetch_product(product_id).await?;
    let updated = cart.add_item(product).await;
    Ok(CartResponse::from(&updated))
}

pub async fn remove_from_cart(cart: &CartStore, product_id: ProductId) -> CartResponse {
    debug!(product_id = %product_id, "remove_from_cart command");
    CartResponse::from(&cart.remove_item(product_id).await)
}

pub async fn update_cart_item(cart: &CartStore, product_id: ProductId, quantity: i64) -> CartResponse {
    debug!(product_id = %product_id, quantity, "update_cart_item command");
    CartResponse::from(&cart.update_quantity(product_id, quantity).await)
}

pub async fn clear_cart(cart: &CartStore) -> CartResponse {
    debug!("clear_cart command");
    CartResponse::from(&cart.clear_cart().await)
}

/// Renders a cart response for humans.
pub fn render(output: &Output, response: &CartResponse) {
    output.emit(response, || {
        let noun = if response.item_count == 1 { "item" } else { "items" };
        output.header(&format!("Cart ({} {})", response.item_count, noun));

        if response.items.is_empty() {
            output.kv("status", "empty");
            return;
        }

        let widths = [6, 32, 5, 10, 10];
        output.table_row(&["ID", "PRODUCT", "QTY", "PRICE", "LINE"], &widths);
        for line in &response.items {
            let id = line.product.id.to_string();
            let qty = format!("x{}", line.quantity);
            let price = line.product.price.to_string();
            let total = line.line_total().to_string();
            output.table_row(
                &[
                    id.as_str(),
                    line.product.title.as_str(),
                    qty.as_str(),
                    price.as_str(),
                    total.as_str(),
                ],
                &widths,
            );
        }
        output.kv("total", &response.total_display);
    });
}
