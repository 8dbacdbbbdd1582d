//! Settings screen: personal info, password, company profile.

use crate::cli::commands::required;
use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::core::services::SettingsService;

pub fn show(ctx: &ShellContext) -> CommandResult {
    let shop = ctx.shop()?;

    output::section("Company");
    let company = SettingsService::company(shop);
    println!("  Name     {}", company.name);
    println!("  Motto    {}", company.motto);
    println!("  Address  {}", company.address);

    output::section("Preferences");
    println!("  Currency        {}", ctx.config.currency_symbol);
    println!("  Default period  {}", ctx.config.default_period);

    if let Some(session) = &ctx.session {
        let user = SettingsService::profile(shop, session)?;
        output::section("Your profile");
        println!("  Name    {}", user.full_name());
        println!("  Email   {}", user.email);
        println!("  Phone   {}", user.phone.as_deref().unwrap_or("-"));
        println!("  Joined  {}", user.date_joined);
    }
    Ok(())
}

pub fn set_company(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "set-company <name> [motto] [address]";
    let name = required(args, 0, usage)?.to_string();
    let motto = args.get(1).copied().unwrap_or("").to_string();
    let address = args.get(2).copied().unwrap_or("").to_string();
    ctx.require_session()?;
    SettingsService::update_company(ctx.shop_mut()?, &name, &motto, &address)?;
    ctx.manager.save()?;
    io::print_success(format!("Company profile updated to `{name}`."));
    Ok(())
}

pub fn set_profile(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "set-profile <first> <last> <email> [phone]";
    let first = required(args, 0, usage)?.to_string();
    let last = required(args, 1, usage)?.to_string();
    let email = required(args, 2, usage)?.to_string();
    let phone = args.get(3).copied();
    let session = ctx.require_session()?;
    SettingsService::update_personal(ctx.shop_mut()?, &session, &first, &last, &email, phone)?;
    ctx.manager.save()?;
    // The session carries name and email; refresh them in place.
    if let Some(session) = ctx.session.as_mut() {
        session.name = format!("{first} {last}");
        session.email = email;
    }
    io::print_success("Profile updated.");
    Ok(())
}

pub fn change_password(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    let session = ctx.require_session()?;
    let (old, new, confirm) = if ctx.mode == CliMode::Script {
        let usage = "passwd <old> <new> <confirm>";
        (
            required(args, 0, usage)?.to_string(),
            required(args, 1, usage)?.to_string(),
            required(args, 2, usage)?.to_string(),
        )
    } else if args.is_empty() {
        (
            io::prompt_password(ctx.theme(), "Current password")?,
            io::prompt_password(ctx.theme(), "New password")?,
            io::prompt_password(ctx.theme(), "Confirm new password")?,
        )
    } else if args.len() == 3 {
        (args[0].to_string(), args[1].to_string(), args[2].to_string())
    } else {
        return Err(CommandError::Usage(
            "Usage: passwd [<old> <new> <confirm>]".into(),
        ));
    };
    SettingsService::change_password(ctx.shop_mut()?, &session, &old, &new, &confirm)?;
    ctx.manager.save()?;
    io::print_success("Password changed.");
    Ok(())
}
