//! Binary entry point: parse the command line, start file logging, open the
//! patron account, and drive the terminal shell until the patron leaves.
use anyhow::Context;
use clap::Parser;
use library_account_manager::config::Cli;
use library_account_manager::logging::init_logging;
use library_account_manager::{run_app, Account, App};
use tracing::info;

/// A rejected account number surfaces here as an error before the terminal is
/// touched, so the message lands on a normal screen.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_path()?, &cli.log_level)?;

    let account = Account::new(cli.name, cli.address, cli.account_number)
        .context("failed to open library account")?;
    info!(account_number = account.account_number(), "account opened");

    let mut app = App::new(account);
    run_app(&mut app)?;

    if !app.account().is_active() {
        println!("Account closed successfully.");
    }
    Ok(())
}
