use anyhow::{Result, bail};
use array_walkthrough::cli::Cli;
use array_walkthrough::driver;
use array_walkthrough::report::Report;
use std::io::{self, Write};

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    if cli.list {
        for scenario in cli.selected() {
            println!("{:<14} {}", scenario.name(), scenario.title());
        }
        return Ok(());
    }

    let scenarios = cli.selected();
    let config = cli.config();
    let mut report = Report::new(io::stdout().lock());
    driver::run(&scenarios, &config, &mut report)?;

    let checks = report.checks();
    let mismatches = report.mismatches().to_vec();
    let mut out = report.into_inner();
    writeln!(out)?;
    writeln!(out, "{} checks, {} mismatched", checks, mismatches.len())?;
    out.flush()?;

    if cli.check && !mismatches.is_empty() {
        for m in &mismatches {
            eprintln!("[{}] expected {} but got {}", m.section, m.expected, m.actual);
        }
        bail!("{} of {} checks did not match", mismatches.len(), checks);
    }

    Ok(())
}
