use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;

use rename_tools::prefix_rename::{PrefixRename, PrefixRenameConfig, PrefixRenameError};
use rename_tools::print_error;

#[derive(Parser)]
#[command(
    author,
    version,
    name = env!("CARGO_BIN_NAME"),
    about = "Rename files and directories by prepending a prefix"
)]
struct Args {
    /// Prefix to prepend to each name
    prefix: Option<String>,

    /// Optional target directory (defaults to the current directory)
    #[arg(value_hint = clap::ValueHint::DirPath)]
    directory: Option<PathBuf>,

    /// Create a timestamped backup of each item before renaming
    #[arg(short, long)]
    backup: bool,

    /// Only print changes without renaming
    #[arg(short, long)]
    dry_run: bool,

    /// Only rename files whose name ends with EXT, directories are skipped
    #[arg(short, long, value_name = "EXT")]
    extension: Option<String>,

    /// Generate shell completion
    #[arg(short = 'l', long, name = "SHELL")]
    completion: Option<Shell>,

    /// Print verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Validate arguments and create the final config.
    fn into_config(self) -> Result<PrefixRenameConfig, PrefixRenameError> {
        Ok(PrefixRenameConfig::new(self.prefix, self.directory.as_deref())?
            .with_dryrun(self.dry_run)
            .with_backup(self.backup)
            .with_extension(self.extension)
            .with_verbose(self.verbose))
    }
}

/// Print clap output. Help and version exit successfully, everything else is a usage error.
fn handle_parse_error(error: &clap::Error) -> ExitCode {
    // Nothing else to report if writing to the terminal fails
    error.print().ok();
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
        _ => {
            print_usage();
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    eprintln!("\n{}", Args::command().render_help());
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(error) => return handle_parse_error(&error),
    };

    if let Some(shell) = args.completion {
        return match rename_tools::generate_shell_completion(shell, Args::command(), env!("CARGO_BIN_NAME")) {
            Ok(()) => ExitCode::SUCCESS,
            Err(error) => {
                print_error!("{error:#}");
                ExitCode::FAILURE
            }
        };
    }

    match args.into_config().and_then(|config| PrefixRename::new(config).run()) {
        // Per-item failures are reported in the summary and do not change the exit code
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            print_error!("{error}");
            if error.is_usage_error() {
                print_usage();
            }
            ExitCode::FAILURE
        }
    }
}
