use clap::Parser;

mod cmd;

use cmd::Cli;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    cli.command.run()
}
