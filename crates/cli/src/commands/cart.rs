//! Cart commands.

use clementine_core::{ProductId, ProductSnapshot};

use super::Context;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

pub fn show(ctx: &Context) -> Result<()> {
    let commerce = ctx.commerce()?;
    let cart = commerce.cart();

    if cart.is_empty() {
        println!("Cart is empty.");
        return Ok(());
    }

    for item in cart.items() {
        println!(
            "{:>3} x {} @ {}  [{}]",
            item.quantity,
            item.name,
            item.unit_price.display(),
            item.product_id
        );
    }
    println!("Total: {} ({} items)", cart.total().display(), cart.count());
    Ok(())
}

pub async fn add(ctx: &Context, product_id: &str, quantity: u32) -> Result<()> {
    let product = ctx.products().get(&ProductId::new(product_id)).await?;

    let mut commerce = ctx.commerce()?;
    commerce
        .cart_mut()
        .add_with_quantity(&ProductSnapshot::from(&product), quantity)?;

    println!("Added {quantity} x {} to cart.", product.name);
    Ok(())
}

pub fn remove(ctx: &Context, product_id: &str) -> Result<()> {
    let mut commerce = ctx.commerce()?;
    commerce.cart_mut().remove(&ProductId::new(product_id))?;
    println!("Removed {product_id} from cart.");
    Ok(())
}

pub fn clear(ctx: &Context) -> Result<()> {
    let mut commerce = ctx.commerce()?;
    commerce.cart_mut().clear()?;
    println!("Cart cleared.");
    Ok(())
}
