use anyhow::Result;
use clap::Parser;
use crewmeta::commands::{self, config::Config, config::Options};
use std::path::PathBuf;

/// crewmeta - package metadata resolver
///
/// Decide whether a package can be installed from a binary on this machine,
/// find the artifact to fetch, and normalize versions for comparison.
///
/// Examples:
///   crewmeta check packages/git.json
///   crewmeta url packages/git.json --source
///   crewmeta version 1.2.4-qnd73k6-glibc2.39
#[derive(Parser, Debug)]
#[command(author, version = env!("CREWMETA_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Architecture token (detected when omitted)
    #[arg(long, env = "CREW_ARCH", value_name = "ARCH", global = true)]
    pub arch: Option<String>,

    /// Running glibc version (detected when omitted)
    #[arg(long, env = "LIBC_VERSION", value_name = "VERSION", global = true)]
    pub libc_version: Option<String>,

    /// Directory containing device.json
    #[arg(long, env = "CREW_CONFIG_PATH", value_name = "PATH", global = true)]
    pub config_path: Option<PathBuf>,

    /// Base URL of the binary package registry
    #[arg(long, env = "CREW_BINARY_HOST", value_name = "URL", global = true)]
    pub binary_host: Option<String>,

    /// Report glibc bounds with the literal boundary rules
    #[arg(long, global = true)]
    pub legacy_bounds: bool,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Check whether a package is compatible with this system
    Check(DescriptorArgs),

    /// Print the artifact URL and sha256 for a package
    Url(FetchArgs),

    /// Print the canonical form of a version string
    Version(VersionArgs),

    /// Check whether a package is recorded as installed
    Installed(InstalledArgs),

    /// Summarize compatibility, artifact and install state
    Status(FetchArgs),
}

#[derive(clap::Args, Debug)]
pub struct DescriptorArgs {
    /// Path to the package descriptor (JSON)
    #[arg(value_name = "DESCRIPTOR")]
    pub descriptor: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct FetchArgs {
    /// Path to the package descriptor (JSON)
    #[arg(value_name = "DESCRIPTOR")]
    pub descriptor: PathBuf,

    /// Ignore prebuilt binaries and use the source archive
    #[arg(long, short = 's')]
    pub source: bool,
}

#[derive(clap::Args, Debug)]
pub struct VersionArgs {
    /// Raw version string
    #[arg(value_name = "VERSION", allow_hyphen_values = true)]
    pub raw: String,
}

#[derive(clap::Args, Debug)]
pub struct InstalledArgs {
    /// Package name
    #[arg(value_name = "NAME")]
    pub name: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let options = Options {
        arch: cli.arch,
        libc_version: cli.libc_version,
        config_path: cli.config_path,
        binary_host: cli.binary_host,
        legacy_bounds: cli.legacy_bounds,
    };
    let config = Config::new(crewmeta::runtime::RealRuntime, options);

    match cli.command {
        Commands::Check(args) => commands::check(&config, &args.descriptor)?,
        Commands::Url(args) => commands::url(&config, &args.descriptor, args.source)?,
        Commands::Version(args) => commands::version(&config, &args.raw)?,
        Commands::Installed(args) => commands::installed(&config, &args.name)?,
        Commands::Status(args) => commands::status(&config, &args.descriptor, args.source)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_check_parsing() {
        let cli = Cli::try_parse_from(["crewmeta", "check", "git.json"]).unwrap();
        match cli.command {
            Commands::Check(args) => assert_eq!(args.descriptor, PathBuf::from("git.json")),
            _ => panic!("Expected Check command"),
        }
        assert!(!cli.legacy_bounds);
    }

    #[test]
    fn test_cli_url_source_flag() {
        let cli = Cli::try_parse_from(["crewmeta", "url", "git.json", "--source"]).unwrap();
        match cli.command {
            Commands::Url(args) => assert!(args.source),
            _ => panic!("Expected Url command"),
        }
    }

    #[test]
    fn test_cli_global_options() {
        let cli = Cli::try_parse_from([
            "crewmeta",
            "--arch",
            "armv7l",
            "version",
            "1.0",
            "--libc-version",
            "2.23",
        ])
        .unwrap();
        assert_eq!(cli.arch.as_deref(), Some("armv7l"));
        assert_eq!(cli.libc_version.as_deref(), Some("2.23"));
    }

    #[test]
    fn test_cli_no_subcommand_fails() {
        assert!(Cli::try_parse_from(["crewmeta", "git.json"]).is_err());
    }
}
