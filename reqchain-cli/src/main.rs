use clap::Parser;

mod args;
mod cmd;
mod commands;
mod exit_codes;
mod output;
mod utils;

pub use args::*;
use commands::Command;

#[derive(Debug, Parser)]
#[command(name = "reqchain", version, about = "Declarative HTTP request-chain runner")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(exit_codes::RUNTIME_ERROR);
        }
    };

    let exit_code = rt.block_on(run_command(cli.command));
    std::process::exit(exit_code);
}

async fn run_command(command: Command) -> i32 {
    match command {
        Command::Run {
            path,
            request,
            up_to,
            run,
            output,
        } => cmd::run::run_cmd(&path, request.as_deref(), up_to.as_deref(), run, output).await,
        Command::RunAll {
            paths,
            per_flow_store,
            run,
            output,
        } => cmd::run_all::run_all_cmd(&paths, per_flow_store, run, output).await,
        Command::Validate { paths, output } => cmd::validate::validate_cmd(&paths, output).await,
        Command::List { path, output } => cmd::list::list_cmd(&path, output).await,
    }
}
