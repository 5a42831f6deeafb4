use clap::Parser;
use finance_ledger::config::{LedgerConfig, DEFAULT_LEDGER_FILE};
use finance_ledger::console::Console;
use finance_ledger::store::LedgerStore;
use std::io;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "finance-ledger", version, about = "Personal income and expense ledger")]
struct Cli {
    /// Ledger CSV file, created on first use
    #[arg(short = 'f', long = "file", default_value = DEFAULT_LEDGER_FILE)]
    file: PathBuf,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let store = LedgerStore::new(LedgerConfig::new(cli.file));
    let stdin = io::stdin();
    let mut console = Console::new(&store, stdin.lock(), io::stdout());
    console.run().unwrap_or_else(|err| {
        log::error!("ledger session failed: {}", err);
        process::exit(1);
    });
}
