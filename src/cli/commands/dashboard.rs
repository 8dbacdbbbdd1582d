//! Dashboard rendering: totals and the per-bucket sales chart.

use crate::cli::commands::required;
use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::core::services::{DashboardService, DashboardView};
use crate::reporting::PeriodToken;

pub fn show(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(raw) = args.first() {
        let token = PeriodToken::parse(raw);
        if matches!(token, PeriodToken::Other(_)) {
            io::print_warning(format!(
                "`{raw}` is not a period name; showing the all-time shape."
            ));
        }
        ctx.dashboard.select(token);
    }
    let now = ctx.now();
    let view = {
        let shop = ctx.shop()?;
        DashboardService::refresh_selected(shop, &ctx.dashboard, now)
    };
    match view {
        Some(view) => render(ctx, &view),
        None => io::print_warning("The period selection changed; run `dashboard` again."),
    }
    Ok(())
}

pub fn set_period(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    let raw = required(args, 0, "set-period <period>")?;
    let token = PeriodToken::parse(raw);
    if matches!(token, PeriodToken::Other(_)) {
        io::print_warning(format!(
            "`{raw}` is not a period name; the dashboard will fall back to the all-time shape."
        ));
    }
    ctx.config.default_period = token.as_str().to_string();
    ctx.dashboard.select(token);
    ctx.persist_config()?;
    io::print_success(format!(
        "Default period set to `{}`.",
        ctx.config.default_period
    ));
    Ok(())
}

fn render(ctx: &ShellContext, view: &DashboardView) {
    let currency = &ctx.config.currency_symbol;
    output::section(&view.title);
    println!("  {}", view.caption);
    println!();
    println!("  Revenue    {currency}{:.2}", view.revenue_total);
    println!("  Sales      {currency}{:.2}", view.sales_total);
    println!("  Customers  {}", view.customer_count);

    output::section("Sales by bucket");
    let rows: Vec<Vec<String>> = view
        .labels
        .iter()
        .zip(&view.series)
        .map(|(label, value)| vec![label.clone(), format!("{currency}{value:.2}")])
        .collect();
    output::render_table(&["Bucket", "Sales"], &rows);
}
