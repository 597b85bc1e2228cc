use clap::Args;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    /// Skip TLS certificate verification for every request in the run
    #[arg(long)]
    pub insecure: bool,
    /// Where run lifecycle events are written
    #[arg(long, value_enum, default_value_t = EventsMode::None)]
    pub events: EventsMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EventsMode {
    None,
    Stdout,
}
