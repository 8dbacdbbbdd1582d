//! Sign-in, sign-out, and account registration.

use crate::cli::commands::required;
use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::core::services::{AuthService, ServiceError};

/// A password may arrive as a positional argument (script mode) or through
/// a hidden prompt (interactive mode).
pub(crate) fn password_from(
    ctx: &ShellContext,
    args: &[&str],
    index: usize,
) -> Result<String, CommandError> {
    if let Some(given) = args.get(index) {
        return Ok((*given).to_string());
    }
    if ctx.mode == CliMode::Script {
        return Err(CommandError::Usage(
            "A password argument is required in script mode".into(),
        ));
    }
    io::prompt_password(ctx.theme(), "Password")
}

pub fn register(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "register <email> <first> <last> [password]";
    let email = required(args, 0, usage)?.to_string();
    let first = required(args, 1, usage)?.to_string();
    let last = required(args, 2, usage)?.to_string();
    let password = password_from(ctx, args, 3)?;

    // The first account on a fresh shop becomes the administrator; after
    // that only an administrator may register staff.
    let first_account = ctx.shop()?.users.is_empty();
    if !first_account {
        let session = ctx.require_session()?;
        if !session.is_admin {
            return Err(ServiceError::Forbidden.into());
        }
    }

    let now = ctx.now();
    let id = AuthService::register(
        ctx.shop_mut()?,
        &email,
        &first,
        &last,
        &password,
        first_account,
        now,
    )?;
    ctx.manager.save()?;
    if first_account {
        io::print_success(format!("Administrator account `{email}` created (#{id})."));
    } else {
        io::print_success(format!("Account `{email}` created (#{id})."));
    }
    Ok(())
}

pub fn login(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    let email = required(args, 0, "login <email> [password]")?.to_string();
    let password = password_from(ctx, args, 1)?;
    let now = ctx.now();
    let session = AuthService::login(ctx.shop_mut()?, &email, &password, now)?;
    ctx.manager.save()?;
    io::print_success(format!("Welcome back, {}.", session.name));
    ctx.session = Some(session);
    Ok(())
}

pub fn logout(ctx: &mut ShellContext) -> CommandResult {
    match ctx.session.take() {
        Some(session) => io::print_success(format!("Signed out {}.", session.name)),
        None => io::print_warning("Nobody is signed in."),
    }
    Ok(())
}

pub fn whoami(ctx: &ShellContext) -> CommandResult {
    match &ctx.session {
        Some(session) => {
            let role = if session.is_admin { "admin" } else { "staff" };
            println!("{} <{}> ({role})", session.name, session.email);
            println!("session {} started {}", session.token, session.started_at);
        }
        None => io::print_warning("Nobody is signed in."),
    }
    Ok(())
}
