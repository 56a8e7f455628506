use clap::Parser;

mod cli;
mod platform;

fn main() -> anyhow::Result<()> {
    let args = cli::StartupArgs::parse();
    platform::run_app(args)
}
