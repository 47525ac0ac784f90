use clap::Parser;

mod cmd;
mod core;

/// GST profit calculator for single buy/sell transactions
#[derive(Parser, Debug)]
#[command(name = "gstc", version, about)]
enum Command {
    /// Evaluate a single transaction from flags
    Calc(cmd::calc::CalcCommand),
    /// Evaluate a CSV or JSON file of independent calculations
    Batch(cmd::batch::BatchCommand),
    /// Print expected input formats
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    match Command::parse() {
        Command::Calc(cmd) => cmd.exec(),
        Command::Batch(cmd) => cmd.exec(),
        Command::Schema(cmd) => cmd.exec(),
    }
}
