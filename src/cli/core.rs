//! CLI loop state, dispatch, and shell context helpers.

use chrono::{Local, NaiveDateTime};
use dialoguer::theme::ColorfulTheme;

use crate::{
    config::{Config, ConfigManager},
    core::services::ServiceError,
    core::ShopManager,
    domain::{Session, Shop},
    errors::StoreError,
    reporting::{DashboardState, PeriodToken},
    storage::JsonStorage,
};

use super::commands;
use super::io as cli_io;
use super::output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("{0}")]
    Usage(String),
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error("You must be signed in to do that")]
    NotSignedIn,
}

pub type CommandResult = Result<(), CommandError>;

const COMMAND_NAMES: &[&str] = &[
    "help",
    "version",
    "exit",
    "quit",
    "shops",
    "open",
    "new-shop",
    "save",
    "close",
    "backup",
    "register",
    "login",
    "logout",
    "whoami",
    "dashboard",
    "set-period",
    "inventory",
    "add-product",
    "update-product",
    "delete-product",
    "expired",
    "sales",
    "new-sale",
    "view-sale",
    "refund",
    "delete-sale",
    "users",
    "add-user",
    "activate-user",
    "deactivate-user",
    "promote-user",
    "demote-user",
    "delete-user",
    "settings",
    "set-company",
    "set-profile",
    "passwd",
];

/// Holds everything a running shell needs: the open shop, configuration,
/// the signed-in session, and the dashboard period selection.
pub struct ShellContext {
    pub mode: CliMode,
    pub running: bool,
    pub manager: ShopManager,
    pub config: Config,
    pub session: Option<Session>,
    pub dashboard: DashboardState,
    config_manager: ConfigManager,
    theme: ColorfulTheme,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let storage = JsonStorage::new_default()?;
        let manager = ShopManager::new(Box::new(storage));
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        let dashboard = DashboardState::new(PeriodToken::parse(&config.default_period));
        let mut context = Self {
            mode,
            running: true,
            manager,
            config,
            session: None,
            dashboard,
            config_manager,
            theme: ColorfulTheme::default(),
        };
        context.auto_open_last();
        Ok(context)
    }

    fn auto_open_last(&mut self) {
        if self.mode != CliMode::Interactive {
            return;
        }
        let Some(name) = self.config.last_opened_shop.clone() else {
            return;
        };
        if self.manager.load(&name).is_ok() {
            cli_io::print_success(format!("Automatically opened shop `{name}`."));
        }
    }

    pub fn theme(&self) -> &ColorfulTheme {
        &self.theme
    }

    /// Local wall-clock time; the resolver and services take it as a value.
    pub fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    pub fn prompt(&self) -> String {
        let shop = self.manager.current_name().unwrap_or("no shop");
        match &self.session {
            Some(session) => format!("{} ({})> ", shop, session.name),
            None => format!("{shop}> "),
        }
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        COMMAND_NAMES.to_vec()
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        match command {
            "help" => commands::system::help(),
            "version" => commands::system::version(),
            "exit" | "quit" => return Ok(LoopControl::Exit),
            "shops" => commands::system::list_shops(self),
            "open" => commands::system::open_shop(self, args),
            "new-shop" => commands::system::new_shop(self, args),
            "save" => commands::system::save_shop(self),
            "close" => commands::system::close_shop(self),
            "backup" => commands::system::backup_shop(self),
            "register" => commands::session::register(self, args),
            "login" => commands::session::login(self, args),
            "logout" => commands::session::logout(self),
            "whoami" => commands::session::whoami(self),
            "dashboard" => commands::dashboard::show(self, args),
            "set-period" => commands::dashboard::set_period(self, args),
            "inventory" => commands::inventory::list(self),
            "add-product" => commands::inventory::add(self, args),
            "update-product" => commands::inventory::update(self, args),
            "delete-product" => commands::inventory::delete(self, args),
            "expired" => commands::inventory::expired(self),
            "sales" => commands::sales::list(self),
            "new-sale" => commands::sales::record(self, args),
            "view-sale" => commands::sales::view(self, args),
            "refund" => commands::sales::refund(self, args),
            "delete-sale" => commands::sales::delete(self, args),
            "users" => commands::users::list(self),
            "add-user" => commands::users::add(self, args),
            "activate-user" => commands::users::set_active(self, args, true),
            "deactivate-user" => commands::users::set_active(self, args, false),
            "promote-user" => commands::users::set_admin(self, args, true),
            "demote-user" => commands::users::set_admin(self, args, false),
            "delete-user" => commands::users::delete(self, args),
            "settings" => commands::settings::show(self),
            "set-company" => commands::settings::set_company(self, args),
            "set-profile" => commands::settings::set_profile(self, args),
            "passwd" => commands::settings::change_password(self, args),
            unknown => Err(CommandError::Usage(format!(
                "Unknown command `{unknown}`. Type `help` for the command list."
            ))),
        }
        .map(|()| LoopControl::Continue)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        output::error(err);
        Ok(())
    }

    pub(crate) fn print_warning(&self, message: &str) {
        output::warning(message);
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action(&self.theme, "Exit the shell?", true).unwrap_or(true))
    }

    /// Yes/no confirmation; script mode auto-confirms.
    pub fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub fn require_session(&self) -> Result<Session, CommandError> {
        self.session.clone().ok_or(CommandError::NotSignedIn)
    }

    pub fn shop(&self) -> Result<&Shop, CommandError> {
        self.manager
            .current
            .as_ref()
            .ok_or_else(|| CommandError::Usage("No shop is open. Use `open <name>`.".into()))
    }

    pub fn shop_mut(&mut self) -> Result<&mut Shop, CommandError> {
        self.manager
            .current
            .as_mut()
            .ok_or_else(|| CommandError::Usage("No shop is open. Use `open <name>`.".into()))
    }

    pub fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    pub fn remember_last_shop(&mut self, name: Option<&str>) -> CommandResult {
        self.config.last_opened_shop = name.map(str::to_string);
        self.persist_config()
    }
}
