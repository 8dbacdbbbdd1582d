//! Inventory screen commands.

use crate::cli::commands::{parse_date, parse_id, parse_price, parse_quantity, required};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::core::services::InventoryService;
use crate::domain::{format_record_id, Displayable, Product};

pub fn list(ctx: &ShellContext) -> CommandResult {
    let shop = ctx.shop()?;
    let products = InventoryService::list(shop);
    if products.is_empty() {
        io::print_info("The inventory is empty. Use `add-product` to stock it.");
        return Ok(());
    }
    render_table(ctx, &products);
    Ok(())
}

pub fn add(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "add-product <name> <sku> <price> <cost> <qty> <expiry YYYY-MM-DD>";
    let name = required(args, 0, usage)?.to_string();
    let sku = required(args, 1, usage)?.to_string();
    let price = parse_price(required(args, 2, usage)?)?;
    let cost = parse_price(required(args, 3, usage)?)?;
    let quantity = parse_quantity(required(args, 4, usage)?)?;
    let expiry = parse_date(required(args, 5, usage)?)?;
    ctx.require_session()?;

    let today = ctx.now().date();
    let product = Product::new(&name, &sku, price, cost, quantity, today, expiry);
    let id = InventoryService::add(ctx.shop_mut()?, product)?;
    ctx.manager.save()?;
    io::print_success(format!("Added `{name}` as {}.", format_record_id(id)));
    Ok(())
}

pub fn update(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "update-product <id> <name|sku|price|cost|quantity|expiry> <value>";
    let id = parse_id(required(args, 0, usage)?)?;
    let field = required(args, 1, usage)?.to_string();
    let value = required(args, 2, usage)?.to_string();
    ctx.require_session()?;

    // Parse before mutating so a bad value never touches the record.
    enum Change {
        Name(String),
        Sku(String),
        Price(f64),
        Cost(f64),
        Quantity(u32),
        Expiry(chrono::NaiveDate),
    }
    let change = match field.as_str() {
        "name" => Change::Name(value),
        "sku" => Change::Sku(value),
        "price" => Change::Price(parse_price(&value)?),
        "cost" => Change::Cost(parse_price(&value)?),
        "quantity" => Change::Quantity(parse_quantity(&value)?),
        "expiry" => Change::Expiry(parse_date(&value)?),
        other => {
            return Err(CommandError::Usage(format!(
                "`{other}` is not an editable field. {usage}"
            )))
        }
    };

    InventoryService::update(ctx.shop_mut()?, id, |product| match change {
        Change::Name(name) => product.name = name,
        Change::Sku(sku) => product.sku = sku,
        Change::Price(price) => product.selling_price = price,
        Change::Cost(cost) => product.cost_price = cost,
        Change::Quantity(quantity) => product.quantity = quantity,
        Change::Expiry(expiry) => product.expiry_date = expiry,
    })?;
    ctx.manager.save()?;
    io::print_success(format!("Updated product {}.", format_record_id(id)));
    Ok(())
}

pub fn delete(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = parse_id(required(args, 0, "delete-product <id>")?)?;
    ctx.require_session()?;
    let label = InventoryService::get(ctx.shop()?, id)?.display_label();
    if !ctx.confirm(&format!("Delete {label} from the inventory?"))? {
        io::print_info("Nothing deleted.");
        return Ok(());
    }
    InventoryService::remove(ctx.shop_mut()?, id)?;
    ctx.manager.save()?;
    io::print_success(format!("Deleted {label}."));
    Ok(())
}

pub fn expired(ctx: &ShellContext) -> CommandResult {
    let shop = ctx.shop()?;
    let today = ctx.now().date();
    let expired = InventoryService::expired(shop, today);
    if expired.is_empty() {
        io::print_success("No expired products.");
        return Ok(());
    }
    io::print_warning(format!("{} expired product(s):", expired.len()));
    render_table(ctx, &expired);
    Ok(())
}

fn render_table(ctx: &ShellContext, products: &[&Product]) {
    let currency = &ctx.config.currency_symbol;
    let rows: Vec<Vec<String>> = products
        .iter()
        .map(|product| {
            vec![
                format_record_id(product.id),
                product.name.clone(),
                product.sku.clone(),
                format!("{currency}{:.2}", product.selling_price),
                format!("{currency}{:.2}", product.cost_price),
                format!("{currency}{:.2}", product.unit_margin()),
                product.quantity.to_string(),
                product.expiry_date.to_string(),
            ]
        })
        .collect();
    output::render_table(
        &["ID", "Name", "SKU", "Price", "Cost", "Margin", "Qty", "Expires"],
        &rows,
    );
}
