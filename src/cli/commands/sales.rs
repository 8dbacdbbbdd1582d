//! Sales screen commands: list, record, view, refund, delete.

use crate::cli::commands::{parse_id, parse_quantity, required};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::core::services::{LineDraft, SaleDraft, SalesService};
use crate::domain::{format_record_id, Displayable, PaymentMethod};

fn parse_payment(raw: &str) -> Result<PaymentMethod, CommandError> {
    match raw.to_ascii_lowercase().as_str() {
        "cash" => Ok(PaymentMethod::Cash),
        "card" => Ok(PaymentMethod::Card),
        "transfer" => Ok(PaymentMethod::Transfer),
        other => Err(CommandError::Usage(format!(
            "`{other}` is not a payment method (cash, card, transfer)"
        ))),
    }
}

/// Lines arrive as `<product-id>x<qty>`, e.g. `3x2`.
fn parse_line(raw: &str) -> Result<LineDraft, CommandError> {
    let (id, quantity) = raw.split_once('x').ok_or_else(|| {
        CommandError::Usage(format!("`{raw}` is not a sale line (expected <id>x<qty>)"))
    })?;
    Ok(LineDraft {
        product_id: parse_id(id)?,
        quantity: parse_quantity(quantity)?,
    })
}

pub fn list(ctx: &ShellContext) -> CommandResult {
    let shop = ctx.shop()?;
    let sales = SalesService::list(shop);
    if sales.is_empty() {
        io::print_info("No sales recorded yet.");
        return Ok(());
    }
    let currency = &ctx.config.currency_symbol;
    let rows: Vec<Vec<String>> = sales
        .iter()
        .map(|sale| {
            vec![
                format_record_id(sale.id),
                sale.customer_name.clone(),
                format!("{currency}{:.2}", sale.total_price),
                sale.payment_method.to_string(),
                sale.items.len().to_string(),
                sale.purchase_time.format("%Y-%m-%d %H:%M").to_string(),
                SalesService::rep_name(shop, sale).unwrap_or_else(|| "(removed)".into()),
            ]
        })
        .collect();
    output::render_table(
        &["ID", "Customer", "Total", "Payment", "Items", "Time", "Rep"],
        &rows,
    );
    Ok(())
}

pub fn record(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "new-sale <customer> <cash|card|transfer> <id>x<qty> [...]";
    let customer = required(args, 0, usage)?.to_string();
    let payment_method = parse_payment(required(args, 1, usage)?)?;
    if args.len() < 3 {
        return Err(CommandError::Usage(format!("Usage: {usage}")));
    }
    let lines = args[2..]
        .iter()
        .map(|raw| parse_line(raw))
        .collect::<Result<Vec<_>, _>>()?;
    let session = ctx.require_session()?;

    let draft = SaleDraft {
        customer_name: customer,
        payment_method,
        lines,
    };
    let now = ctx.now();
    let id = SalesService::record(ctx.shop_mut()?, &session, draft, now)?;
    ctx.manager.save()?;
    let sale = SalesService::get(ctx.shop()?, id)?;
    io::print_success(format!(
        "Sale {} recorded: {}{:.2} from {}.",
        format_record_id(id),
        ctx.config.currency_symbol,
        sale.total_price,
        sale.customer_name
    ));
    Ok(())
}

pub fn view(ctx: &ShellContext, args: &[&str]) -> CommandResult {
    let id = parse_id(required(args, 0, "view-sale <id>")?)?;
    let shop = ctx.shop()?;
    let sale = SalesService::get(shop, id)?;
    let currency = &ctx.config.currency_symbol;

    output::section(format!("Sale {}", format_record_id(sale.id)));
    println!("  Customer  {}", sale.customer_name);
    println!("  Time      {}", sale.purchase_time.format("%Y-%m-%d %H:%M"));
    println!("  Payment   {}", sale.payment_method);
    println!(
        "  Rep       {}",
        SalesService::rep_name(shop, sale).unwrap_or_else(|| "(removed)".into())
    );
    println!();
    let rows: Vec<Vec<String>> = sale
        .items
        .iter()
        .map(|item| {
            vec![
                item.product_name.clone(),
                format!("{currency}{:.2}", item.unit_price),
                item.quantity.to_string(),
                format!("{currency}{:.2}", item.line_total),
            ]
        })
        .collect();
    output::render_table(&["Product", "Unit", "Qty", "Total"], &rows);
    println!();
    println!("  Total     {currency}{:.2}", sale.total_price);
    Ok(())
}

pub fn refund(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = parse_id(required(args, 0, "refund <id>")?)?;
    let session = ctx.require_session()?;
    let label = SalesService::get(ctx.shop()?, id)?.display_label();
    if !ctx.confirm(&format!("Refund {label} and restock its items?"))? {
        io::print_info("Nothing refunded.");
        return Ok(());
    }
    let sale = SalesService::refund(ctx.shop_mut()?, &session, id)?;
    ctx.manager.save()?;
    io::print_success(format!(
        "Refunded {}{:.2} to {}.",
        ctx.config.currency_symbol, sale.total_price, sale.customer_name
    ));
    Ok(())
}

pub fn delete(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = parse_id(required(args, 0, "delete-sale <id>")?)?;
    let session = ctx.require_session()?;
    if !ctx.confirm(&format!(
        "Delete sale {} without restocking?",
        format_record_id(id)
    ))? {
        io::print_info("Nothing deleted.");
        return Ok(());
    }
    SalesService::delete(ctx.shop_mut()?, &session, id)?;
    ctx.manager.save()?;
    io::print_success(format!("Deleted sale {}.", format_record_id(id)));
    Ok(())
}
