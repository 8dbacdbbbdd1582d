//! Staff account management, admin only.

use crate::cli::commands::{parse_id, required};
use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::core::services::UserService;
use crate::domain::{format_record_id, Displayable};

pub fn list(ctx: &ShellContext) -> CommandResult {
    let session = ctx.require_session()?;
    let shop = ctx.shop()?;
    let users = UserService::list(shop, &session)?;
    let rows: Vec<Vec<String>> = users
        .iter()
        .map(|user| {
            vec![
                format_record_id(user.id),
                user.full_name(),
                user.email.clone(),
                if user.is_admin { "admin" } else { "staff" }.to_string(),
                if user.is_active { "active" } else { "inactive" }.to_string(),
                user.total_sales.to_string(),
                user.last_login
                    .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "never".into()),
            ]
        })
        .collect();
    output::render_table(
        &["ID", "Name", "Email", "Role", "Status", "Sales", "Last login"],
        &rows,
    );
    Ok(())
}

pub fn add(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "add-user <email> <first> <last> [admin] [password]";
    let email = required(args, 0, usage)?.to_string();
    let first = required(args, 1, usage)?.to_string();
    let last = required(args, 2, usage)?.to_string();
    let is_admin = args.get(3).is_some_and(|flag| *flag == "admin");
    let password_index = if is_admin { 4 } else { 3 };
    let password = super::session::password_from(ctx, args, password_index)?;
    let session = ctx.require_session()?;

    let now = ctx.now();
    let id = UserService::create(
        ctx.shop_mut()?,
        &session,
        &email,
        &first,
        &last,
        &password,
        is_admin,
        now,
    )?;
    ctx.manager.save()?;
    io::print_success(format!("Account `{email}` created (#{id})."));
    Ok(())
}

pub fn set_active(ctx: &mut ShellContext, args: &[&str], is_active: bool) -> CommandResult {
    let verb = if is_active { "activate" } else { "deactivate" };
    let id = parse_id(required(args, 0, &format!("{verb}-user <id>"))?)?;
    let session = ctx.require_session()?;
    UserService::set_active(ctx.shop_mut()?, &session, id, is_active)?;
    ctx.manager.save()?;
    io::print_success(format!("User {} {verb}d.", format_record_id(id)));
    Ok(())
}

pub fn set_admin(ctx: &mut ShellContext, args: &[&str], is_admin: bool) -> CommandResult {
    let verb = if is_admin { "promote" } else { "demote" };
    let id = parse_id(required(args, 0, &format!("{verb}-user <id>"))?)?;
    let session = ctx.require_session()?;
    UserService::set_admin(ctx.shop_mut()?, &session, id, is_admin)?;
    ctx.manager.save()?;
    io::print_success(format!("User {} {verb}d.", format_record_id(id)));
    Ok(())
}

pub fn delete(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = parse_id(required(args, 0, "delete-user <id>")?)?;
    let session = ctx.require_session()?;
    let label = ctx
        .shop()?
        .user(id)
        .map(Displayable::display_label)
        .unwrap_or_else(|| format_record_id(id));
    if !ctx.confirm(&format!("Delete user {label}?"))? {
        io::print_info("Nothing deleted.");
        return Ok(());
    }
    let removed = UserService::remove(ctx.shop_mut()?, &session, id)?;
    ctx.manager.save()?;
    io::print_success(format!("Deleted account `{}`.", removed.email));
    Ok(())
}
