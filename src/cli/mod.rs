use clap::{Parser, ValueEnum};
use growable_array::DEFAULT_CAPACITY;

use crate::driver::{Scenario, WalkthroughConfig};

/// Largest initial capacity accepted by `--capacity`.
pub const MAX_CAPACITY: usize = 1 << 24;

fn parse_capacity(s: &str) -> Result<usize, String> {
    let capacity: usize = s.parse().map_err(|e| format!("{e}"))?;
    if !(1..=MAX_CAPACITY).contains(&capacity) {
        return Err(format!("capacity must be between 1 and {MAX_CAPACITY}"));
    }
    Ok(capacity)
}

#[derive(Parser, Debug)]
#[command(name = "walkthrough")]
#[command(version, about = "Walks through the growable array API, printing expected and actual values", long_about = None)]
pub struct Cli {
    /// Scenario to run; repeat to run several. Runs all when omitted.
    #[arg(short, long = "scenario", value_enum, value_name = "NAME")]
    pub scenarios: Vec<Scenario>,

    /// Initial capacity of the arrays built by the scenarios
    #[arg(short, long, default_value_t = DEFAULT_CAPACITY, value_parser = parse_capacity)]
    pub capacity: usize,

    /// Exit with an error if any result differs from its expectation
    #[arg(long)]
    pub check: bool,

    /// List scenario names and exit
    #[arg(long)]
    pub list: bool,

    /// Set verbose level
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The requested scenarios in order, or every scenario when none were named.
    pub fn selected(&self) -> Vec<Scenario> {
        if self.scenarios.is_empty() {
            Scenario::value_variants().to_vec()
        } else {
            self.scenarios.clone()
        }
    }

    pub fn config(&self) -> WalkthroughConfig {
        WalkthroughConfig {
            capacity: self.capacity,
        }
    }

    /// Log filter implied by `-v` repetitions.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
