//! Command-line interface definitions.

use clap::{ColorChoice, Parser};

/// Terraforge map pipeline CLI
///
/// Runs against the current working directory: sources are read from
/// `assets/`, artifacts land in `generated/`. There are no functional
/// flags; every invocation rebuilds the full catalog.
#[derive(Parser, Debug, Clone)]
#[command(about, long_about = None)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["terraforge"]);
        assert_eq!(cli.color, ColorChoice::Auto);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_color_and_verbose_flags() {
        let cli = Cli::parse_from(["terraforge", "--color", "never", "-V"]);
        assert_eq!(cli.color, ColorChoice::Never);
        assert!(cli.verbose);
    }
}
