//! emod - edit Gentoo's /etc/portage/package.* files
//!
//! Adds or removes flags on the rule of an atom, keeps the rules sorted and
//! optionally converts the package file between its file and directory
//! layouts.

use anyhow::Result;
use clap::Parser;
use config::{
    EditOutcome, FlagRequest, PackageFile, PackageKind, Settings, Style, DEFAULT_PKG_FILE,
};
use console::style;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Ease your /etc/portage/package.* edition.
///
/// Options must come before the atom: everything after the first flag is
/// read as a flag.
#[derive(Parser, Debug)]
#[command(name = "emod", version, about, long_about = None)]
struct Cli {
    /// Atom to be modified
    atom: String,

    /// Flags to enable for the atom, flags starting with % are disabled
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "FLAGS")]
    flags: Vec<String>,

    /// Flags to enable for the atom
    #[arg(short, long, value_name = "FLAG", value_delimiter = ',')]
    enable: Vec<String>,

    /// Flags to disable for the atom
    #[arg(short, long, value_name = "FLAG", value_delimiter = ',')]
    disable: Vec<String>,

    /// Remove the custom rule of the atom
    #[arg(short, long)]
    prune: bool,

    /// Type of rule (default is use)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    kind: Option<PackageKind>,

    /// Layout to use: default, directory or file
    #[arg(long, default_value = "default", conflicts_with = "convert")]
    style: Style,

    /// Convert the package file from file to directory or vice versa
    #[arg(long)]
    convert: bool,

    /// Keep the old layout as <file>.bkp.<n> after a conversion
    #[arg(long)]
    keep_backup: bool,

    /// Package file or directory prefix (for testing/debugging)
    #[arg(long = "pkg-file", value_name = "FILE", default_value = DEFAULT_PKG_FILE)]
    pkg_file: PathBuf,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet output
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings::new(&self.pkg_file)
            .kind(self.kind)
            .style(self.style)
            .convert(self.convert)
            .keep_backup(self.keep_backup)
    }

    fn request(&self) -> FlagRequest {
        let mut request = FlagRequest::from_args(&self.flags).prune(self.prune);
        request.merge(FlagRequest {
            enable: self.enable.clone(),
            disable: self.disable.clone(),
            prune: false,
        });
        request
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", style("error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let settings = cli.settings();
    debug!("{:?}", settings);

    let mut package = PackageFile::open(&settings)?;
    package.rules()?;

    let options = settings.convert_options();
    let conversion = if settings.convert {
        Some(package.convert(options)?)
    } else {
        package.apply_style(settings.style, options)?
    };
    if let Some(conversion) = conversion {
        println!(
            "{} {} is now a {}",
            style(">>>").green().bold(),
            package.path().display(),
            conversion.layout.style()
        );
        if let Some(backup) = conversion.backup {
            println!("{} Backed up to {}", style(">>>").green().bold(), backup.display());
        }
    }

    let outcome = package.edit(&cli.atom, &cli.request())?;
    report(&cli.atom, package.kind(), &outcome);

    package.save()?;
    Ok(())
}

fn report(atom: &str, kind: PackageKind, outcome: &EditOutcome) {
    if let Some(old) = &outcome.old_rule {
        println!("{} {}", style("Old rule:").yellow(), old);
    } else if !kind.is_flagless() {
        println!("No argument currently defined for {}.", atom);
    }

    if let Some(new) = &outcome.new_rule {
        println!("{} {}", style("New rule:").green(), new);
    }
}
