//! Wishlist commands.

use clementine_core::{ProductId, ProductSnapshot};

use super::Context;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

pub fn show(ctx: &Context) -> Result<()> {
    let commerce = ctx.commerce()?;
    let wishlist = commerce.wishlist();

    if wishlist.is_empty() {
        println!("Wishlist is empty.");
        return Ok(());
    }

    for entry in wishlist.entries() {
        println!("{} @ {}  [{}]", entry.name, entry.price.display(), entry.id);
    }
    Ok(())
}

pub async fn toggle(ctx: &Context, product_id: &str) -> Result<()> {
    let product = ctx.products().get(&ProductId::new(product_id)).await?;

    let mut commerce = ctx.commerce()?;
    let added = commerce
        .wishlist_mut()
        .toggle(&ProductSnapshot::from(&product))?;

    if added {
        println!("Added {} to wishlist.", product.name);
    } else {
        println!("Removed {} from wishlist.", product.name);
    }
    Ok(())
}
