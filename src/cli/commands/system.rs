//! Shop file management, help, and version output.

use crate::cli::commands::required;
use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::utils::build_info;

const HELP_TEXT: &str = "\
Shop files
  shops                         List saved shops
  new-shop <name>               Create a shop and make it current
  open <name>                   Open a saved shop
  save                          Write the current shop to disk
  backup                        Snapshot the current shop
  close                         Close the current shop

Accounts
  register <email> <first> <last> [password]   Create an account
  login <email> [password]                     Sign in
  logout                                       Sign out
  whoami                                       Show the signed-in user

Dashboard
  dashboard [period]            Show totals and the sales chart
  set-period <period>           Change the default period
                                (today, current-week, current-month,
                                 current-year, past-week, past-month,
                                 past-year, all)

Inventory
  inventory                     List products
  add-product <name> <sku> <price> <cost> <qty> <expiry>
  update-product <id> <field> <value>
  delete-product <id>
  expired                       List expired products

Sales
  sales                         List sales
  new-sale <customer> <cash|card|transfer> <id>x<qty> [...]
  view-sale <id>
  refund <id>                   Refund and restock (admin)
  delete-sale <id>              Delete without restocking (admin)

Staff (admin)
  users                         List accounts
  add-user <email> <first> <last> [admin] [password]
  activate-user <id> / deactivate-user <id>
  promote-user <id> / demote-user <id>
  delete-user <id>

Settings
  settings                      Show settings
  set-company <name> [motto] [address]
  set-profile <first> <last> <email> [phone]
  passwd                        Change your password

Misc
  help, version, exit";

pub fn help() -> CommandResult {
    println!("{HELP_TEXT}");
    Ok(())
}

pub fn version() -> CommandResult {
    let meta = build_info::current();
    println!("shopfront {}", meta.version);
    println!("  commit    {} ({})", meta.git_hash, meta.git_status);
    println!("  built     {}", meta.timestamp);
    println!("  target    {} [{}]", meta.target, meta.profile);
    println!("  rustc     {}", meta.rustc);
    Ok(())
}

pub fn list_shops(ctx: &ShellContext) -> CommandResult {
    let shops = ctx.manager.storage().list_shops()?;
    if shops.is_empty() {
        io::print_info("No shops saved yet. Create one with `new-shop <name>`.");
        return Ok(());
    }
    output::section("Saved shops");
    for name in shops {
        let marker = if ctx.manager.current_name() == Some(name.as_str()) {
            "*"
        } else {
            " "
        };
        println!("  {marker} {name}");
    }
    Ok(())
}

pub fn new_shop(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = required(args, 0, "new-shop <name>")?.to_string();
    ctx.session = None;
    ctx.manager.create(&name);
    ctx.manager.save()?;
    ctx.remember_last_shop(Some(&name))?;
    io::print_success(format!("Created shop `{name}`."));
    io::print_info("Register the first account with `register`; it becomes the administrator.");
    Ok(())
}

pub fn open_shop(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = required(args, 0, "open <name>")?.to_string();
    ctx.session = None;
    ctx.manager.load(&name)?;
    ctx.remember_last_shop(Some(&name))?;
    io::print_success(format!("Opened shop `{name}`."));
    Ok(())
}

pub fn save_shop(ctx: &mut ShellContext) -> CommandResult {
    ctx.manager.save()?;
    io::print_success("Shop saved.");
    Ok(())
}

pub fn close_shop(ctx: &mut ShellContext) -> CommandResult {
    if ctx.manager.current.is_none() {
        io::print_warning("No shop is open.");
        return Ok(());
    }
    ctx.manager.save()?;
    ctx.manager.close();
    ctx.session = None;
    ctx.remember_last_shop(None)?;
    io::print_success("Shop saved and closed.");
    Ok(())
}

pub fn backup_shop(ctx: &mut ShellContext) -> CommandResult {
    let name = ctx
        .manager
        .current_name()
        .map(str::to_string)
        .ok_or_else(|| {
            crate::cli::core::CommandError::Usage("No shop is open. Use `open <name>`.".into())
        })?;
    let info = {
        let shop = ctx.shop()?;
        ctx.manager.storage().backup(shop, &name)?
    };
    io::print_success(format!(
        "Backup `{}` written to {}",
        info.id,
        info.path.display()
    ));
    Ok(())
}
