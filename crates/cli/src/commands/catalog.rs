//! Catalog commands.

use clementine_core::ProductId;

use super::Context;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

pub async fn list(ctx: &Context) -> Result<()> {
    let products = ctx.products().list().await?;

    if products.is_empty() {
        println!("No products.");
        return Ok(());
    }

    for product in &products {
        let stock = if product.in_stock() {
            format!("{} in stock", product.stock)
        } else {
            "out of stock".to_owned()
        };
        println!(
            "{}  {} @ {} ({stock})  [{}]",
            product.category,
            product.name,
            product.price.display(),
            product.id
        );
    }
    Ok(())
}

pub async fn get(ctx: &Context, product_id: &str) -> Result<()> {
    let product = ctx.products().get(&ProductId::new(product_id)).await?;

    println!("{}  [{}]", product.name, product.id);
    println!("  price:    {}", product.price.display());
    println!("  category: {}", product.category);
    println!("  stock:    {}", product.stock);
    if let Some(expected) = &product.expected_date {
        println!("  expected: {expected}");
    }
    println!("  {}", product.description);
    Ok(())
}
