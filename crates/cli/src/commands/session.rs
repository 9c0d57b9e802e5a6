//! Session commands.

use super::Context;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

pub async fn login(ctx: &Context, email: &str, password: &str) -> Result<()> {
    let mut commerce = ctx.commerce()?;
    let identity = commerce.login(&ctx.auth(), email, password).await?;
    println!("Logged in as {} ({}).", identity.name, identity.role);
    Ok(())
}

pub fn whoami(ctx: &Context) -> Result<()> {
    let commerce = ctx.commerce()?;
    match commerce.session().current() {
        Some(identity) => println!(
            "{} <{}> role={} id={}",
            identity.name, identity.email, identity.role, identity.id
        ),
        None => println!("Not logged in."),
    }
    Ok(())
}

pub fn logout(ctx: &Context) -> Result<()> {
    let mut commerce = ctx.commerce()?;
    commerce.logout()?;
    println!("Logged out.");
    Ok(())
}
