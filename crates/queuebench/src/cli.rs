//! Command-line interface.

use clap::Parser;

/// Job queue exercise harness.
///
/// With no flags the process serves jobs: it runs a worker pool against the
/// welcome-email queue until interrupted. The flags select the other two
/// one-shot-or-loop modes.
#[derive(Debug, Parser)]
#[command(name = "queuebench", version, about)]
pub struct Cli {
    /// Apply queue schema migrations and exit.
    #[arg(short = 'g', long = "migrate")]
    pub migrate: bool,

    /// Produce batches of synthetic jobs instead of serving them.
    #[arg(short = 'p', long = "produce")]
    pub produce: bool,
}

/// What the process does this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Run the worker pool (default).
    Serve,
    /// Run the producer loop.
    Produce,
    /// Apply migrations and exit.
    Migrate,
}

impl Cli {
    /// Resolve flags into a mode. Migration takes precedence over
    /// production when both flags are given.
    pub fn mode(&self) -> Mode {
        if self.migrate {
            Mode::Migrate
        } else if self.produce {
            Mode::Produce
        } else {
            Mode::Serve
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::try_parse_from(["queuebench"]).unwrap();
        assert_eq!(cli.mode(), Mode::Serve);
    }

    #[test]
    fn short_and_long_flags_parse() {
        for args in [["queuebench", "-g"], ["queuebench", "--migrate"]] {
            let cli = Cli::try_parse_from(args).unwrap();
            assert_eq!(cli.mode(), Mode::Migrate);
        }
        for args in [["queuebench", "-p"], ["queuebench", "--produce"]] {
            let cli = Cli::try_parse_from(args).unwrap();
            assert_eq!(cli.mode(), Mode::Produce);
        }
    }

    #[test]
    fn migrate_takes_precedence_over_produce() {
        let cli = Cli::try_parse_from(["queuebench", "-g", "-p"]).unwrap();
        assert_eq!(cli.mode(), Mode::Migrate);
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(Cli::try_parse_from(["queuebench", "--verbose"]).is_err());
    }
}
