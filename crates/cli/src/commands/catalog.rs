//! Catalog browsing commands.

use shopfront_core::{CategoryId, ProductId};
use shopfront_storefront::error::AppError;
use shopfront_storefront::models::Product;
use shopfront_storefront::state::AppState;

use crate::output;

fn print_rows<'a>(products: impl IntoIterator<Item = &'a Product>) {
    for product in products {
        output::print(&output::product_row(product));
    }
}

/// List every product.
pub fn list(state: &AppState) {
    print_rows(state.catalog().products());
}

/// List featured products.
pub fn featured(state: &AppState) {
    print_rows(state.catalog().featured());
}

/// Show one product.
///
/// # Errors
///
/// Returns `AppError::NotFound` if no product has this ID.
pub fn show(state: &AppState, id: &str) -> Result<(), AppError> {
    let catalog = state.catalog();
    let product = catalog
        .get_by_id(&ProductId::new(id))
        .ok_or_else(|| AppError::NotFound(format!("Product {id}")))?;
    let category = catalog
        .category_by_id(&product.category)
        .map(|c| c.name.as_str());
    output::print(&output::product_detail(product, category));
    Ok(())
}

/// List products in a category.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the category does not exist. A known
/// category without products prints nothing.
pub fn category(state: &AppState, id: &str) -> Result<(), AppError> {
    let catalog = state.catalog();
    let category_id = CategoryId::new(id);
    let category = catalog
        .category_by_id(&category_id)
        .ok_or_else(|| AppError::NotFound(format!("Category {id}")))?;
    output::print(&category.name);
    print_rows(catalog.get_by_category(&category_id));
    Ok(())
}

/// Search names, descriptions and categories.
pub fn search(state: &AppState, query: &str) {
    let results = state.catalog().search(query);
    if results.is_empty() {
        output::print(&format!("No products match \"{query}\""));
        return;
    }
    print_rows(results);
}
