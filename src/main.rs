use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use gdcheck::commands::{all, deps, validate};
use gdcheck::pipeline::Profile;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gdcheck")]
#[command(about = "Validation and dependency checks for the game project", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProfileArg {
    /// Best-effort: missing tools warn and skip dependent checks
    Interactive,
    /// Strict gate: missing tools fail the run
    Ci,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Interactive => Profile::Interactive,
            ProfileArg::Ci => Profile::Ci,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Check the external toolchain: tool presence, versions, smoke tests
    Deps {
        /// Execution profile; detected from the CI environment marker if omitted
        #[arg(long, value_enum)]
        profile: Option<ProfileArg>,
    },

    /// Validate the project tree and run headless engine checks
    Validate {
        /// Path to the project root
        #[arg(long, default_value = ".")]
        project: PathBuf,

        /// Execution profile; detected from the CI environment marker if omitted
        #[arg(long, value_enum)]
        profile: Option<ProfileArg>,
    },

    /// Run the full pipeline: dependency checks, then project validation
    All {
        /// Path to the project root
        #[arg(long, default_value = ".")]
        project: PathBuf,

        /// Execution profile; detected from the CI environment marker if omitted
        #[arg(long, value_enum)]
        profile: Option<ProfileArg>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn resolve_profile(arg: Option<ProfileArg>) -> Profile {
    arg.map(Profile::from).unwrap_or_else(Profile::detect)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let code = match cli.command {
        Commands::Deps { profile } => deps::execute(resolve_profile(profile))?.exit_code(),
        Commands::Validate { project, profile } => {
            validate::execute(&project, resolve_profile(profile))?.exit_code()
        }
        Commands::All { project, profile } => {
            all::execute(&project, resolve_profile(profile))?.exit_code()
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            0
        }
    };

    std::process::exit(code)
}
