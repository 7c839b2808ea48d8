//! accountdesk main entry point

use accountdesk_api::start_server;
use accountdesk_config::Config;
use accountdesk_core::notify::FixedConfirmation;
use accountdesk_core::{
    AccountField, AccountId, BalanceFormat, ClientResult, ConfirmationGate, ConfirmationGateRef,
    Coordinator, HttpAccountService, LogNotifier, Notifier, Outcome,
};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "accountdesk")]
#[command(version = "0.1.0")]
#[command(about = "Create, list, search, edit and delete bank accounts", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the in-memory reference backend
    Serve,
    /// Write the default configuration file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Show one page of accounts
    List {
        /// Case-insensitive account number filter
        #[arg(short, long, default_value = "")]
        search: String,
        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,
        /// Rows per page (defaults to pagination.page_size)
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Create an account
    Create {
        #[arg(long)]
        number: String,
        #[arg(long = "type", default_value = "savings")]
        account_type: String,
        #[arg(long)]
        balance: String,
    },
    /// Edit an existing account
    Edit {
        id: String,
        #[arg(long)]
        number: Option<String>,
        #[arg(long = "type")]
        account_type: Option<String>,
        #[arg(long)]
        balance: Option<String>,
    },
    /// Delete an account
    Delete {
        id: String,
        /// Skip the confirmation question
        #[arg(short, long)]
        yes: bool,
    },
}

/// Prints outcomes to the terminal and mirrors them to the log
#[derive(Default)]
struct ConsoleNotifier {
    log: LogNotifier,
}

impl Notifier for ConsoleNotifier {
    fn notify_success(&self, message: &str) {
        self.log.notify_success(message);
        println!("✔ {}", message);
    }

    fn notify_error(&self, message: &str) {
        self.log.notify_error(message);
        eprintln!("✘ {}", message);
    }
}

/// Asks on stdin; anything but y/yes is a no
struct StdinConfirmation;

impl ConfirmationGate for StdinConfirmation {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        if std::io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match std::io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    Config::load(path.to_path_buf()).map_err(|e| anyhow::anyhow!("{}", e.to_details()))
}

fn exit_code<T>(result: ClientResult<Outcome<T>>) -> ExitCode {
    match result {
        Ok(Outcome::Applied(_)) => ExitCode::SUCCESS,
        Ok(Outcome::Declined) | Ok(Outcome::Cancelled) => ExitCode::from(2),
        Err(_) => ExitCode::FAILURE,
    }
}

fn print_page(coordinator: &Coordinator, format: &BalanceFormat) {
    let list = coordinator.list();
    println!(
        "{:<26} {:<20} {:<8} {:>16}",
        "ID", "ACCOUNT NUMBER", "TYPE", "BALANCE"
    );
    for account in list.visible_page() {
        println!(
            "{:<26} {:<20} {:<8} {:>16}",
            account.id,
            account.account_number,
            account.account_type.label(),
            format.format(account.balance)
        );
    }
    println!(
        "Page {} of {} ({} accounts)",
        list.page() + 1,
        list.page_count().max(1),
        list.filtered_len()
    );
}

fn set_field(coordinator: &mut Coordinator, field: AccountField, value: &str) -> anyhow::Result<()> {
    coordinator
        .form_mut()
        .update_field(field, value)
        .map_err(|e| anyhow::anyhow!("{}", e))
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let config = load_config(&args.config)?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    if !args.config.exists() {
        log::warn!("Config file not found: {}, using defaults", args.config.display());
    }

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run(args, config))
}

async fn run(args: Args, config: Config) -> anyhow::Result<ExitCode> {
    match args.command {
        Command::Serve => {
            start_server(config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::InitConfig { force } => {
            if args.config.exists() && !force {
                anyhow::bail!("{} already exists, use --force to overwrite", args.config.display());
            }
            std::fs::write(&args.config, Config::generate_default())?;
            println!("Wrote {}", args.config.display());
            Ok(ExitCode::SUCCESS)
        }
        command => run_client(command, &config).await,
    }
}

/// Commands that talk to the accounts service through the Coordinator
async fn run_client(command: Command, config: &Config) -> anyhow::Result<ExitCode> {
    let confirmation: ConfirmationGateRef = match &command {
        Command::Delete { yes: true, .. } => Arc::new(FixedConfirmation(true)),
        _ => Arc::new(StdinConfirmation),
    };
    let mut coordinator = Coordinator::new(
        Arc::new(HttpAccountService::from_config(config)),
        Arc::new(ConsoleNotifier::default()),
        confirmation,
        config.pagination.page_size,
    );
    let format = BalanceFormat::from(&config.currency);

    match command {
        Command::Serve | Command::InitConfig { .. } => {
            anyhow::bail!("serve and init-config do not use the accounts service")
        }
        Command::List { search, page, page_size } => {
            if let Some(size) = page_size {
                config
                    .pagination
                    .check_page_size(size)
                    .map_err(|e| anyhow::anyhow!("{}", e.to_details()))?;
            }
            let result = coordinator.mount().await;
            if result.is_err() {
                return Ok(exit_code(result));
            }
            let list = coordinator.list_mut();
            if let Some(size) = page_size {
                list.set_page_size(size).map_err(|e| anyhow::anyhow!("{}", e))?;
            }
            list.set_search_term(search);
            list.set_page(page.saturating_sub(1));
            print_page(&coordinator, &format);
            Ok(ExitCode::SUCCESS)
        }
        Command::Create { number, account_type, balance } => {
            set_field(&mut coordinator, AccountField::AccountNumber, &number)?;
            set_field(&mut coordinator, AccountField::AccountType, &account_type)?;
            set_field(&mut coordinator, AccountField::Balance, &balance)?;
            let result = coordinator.submit_new_account().await;
            if let Ok(Outcome::Applied(account)) = &result {
                println!("{} {}", account.id, account.account_number);
            }
            Ok(exit_code(result))
        }
        Command::Edit { id, number, account_type, balance } => {
            let result = coordinator.mount().await;
            if result.is_err() {
                return Ok(exit_code(result));
            }
            let list = coordinator.list_mut();
            let Some(account) = list.find(&AccountId::new(id.as_str())).cloned() else {
                anyhow::bail!("No account with id {}", id);
            };

            list.start_edit(&account);
            let changes = [
                (AccountField::AccountNumber, number),
                (AccountField::AccountType, account_type),
                (AccountField::Balance, balance),
            ];
            for (field, value) in changes {
                if let Some(value) = value {
                    list.update_edit_field(field, &value)
                        .map_err(|e| anyhow::anyhow!("{}", e))?;
                }
            }
            Ok(exit_code(list.commit_edit().await))
        }
        Command::Delete { id, .. } => {
            let result = coordinator.mount().await;
            if result.is_err() {
                return Ok(exit_code(result));
            }
            let outcome = coordinator
                .list_mut()
                .remove_account(&AccountId::new(id.as_str()))
                .await;
            Ok(exit_code(outcome))
        }
    }
}
