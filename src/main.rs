use clap::Parser;
use timetraveler::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
