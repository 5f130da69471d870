//! Command-line interface for the converter.

use adif2cabrillo::{Config, LoggingConfig, Renderer};
use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// ADIF to Cabrillo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file
    #[arg(long, default_value = "config.toml")]
    pub config: PathBuf,

    /// ADIF filename
    #[arg(short, long)]
    pub adif_file: PathBuf,

    /// Cabrillo filename (output), `-` for standard output
    #[arg(short, long)]
    pub cabrillo_file: PathBuf,

    /// Log filter, overrides `[logging] level` (e.g. `debug`)
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Sets up the stderr subscriber. The CLI level wins over the config file.
pub fn init_tracing(logging: &LoggingConfig, cli_level: Option<&str>) -> Result<()> {
    let level = cli_level.unwrap_or(logging.level.as_str());
    let filter = EnvFilter::try_new(level)
        .with_context(|| format!("invalid log level {:?}", level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("cannot initialise logging: {}", e))
}

pub fn run(args: &Args, config: &Config) -> Result<()> {
    let document = adif2cabrillo::from_path(&args.adif_file)?.require_records()?;
    info!(
        qsos = document.len(),
        path = %args.adif_file.display(),
        "read ADIF log"
    );

    let renderer = Renderer::new(config).context("cannot compile templates")?;
    // A failed render must not leave a partial log on disk.
    let cabrillo = renderer.render_document(&document)?;
    if args.cabrillo_file == Path::new("-") {
        let mut stdout = io::stdout().lock();
        stdout.write_all(cabrillo.as_bytes())?;
        stdout.flush()?;
    } else {
        let outfile = expand_home(&args.cabrillo_file);
        info!("Write {}", outfile.display());
        fs::write(&outfile, cabrillo)
            .with_context(|| format!("cannot write {}", outfile.display()))?;
    }
    Ok(())
}

/// Expands a leading `~/` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), std::env::var_os("HOME")) {
        (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adif2cabrillo::{Error, Templates};
    use std::ffi::OsStr;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "adif2cabrillo-{}-{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn file_args(adif: &Path, cabrillo: &Path) -> Args {
        Args::try_parse_from([
            OsStr::new("adif2cabrillo"),
            OsStr::new("-a"),
            adif.as_os_str(),
            OsStr::new("-c"),
            cabrillo.as_os_str(),
        ])
        .unwrap()
    }

    #[test]
    fn test_parse_long_options() {
        let args = Args::try_parse_from([
            "adif2cabrillo",
            "--config",
            "fd.toml",
            "--adif-file",
            "log.adi",
            "--cabrillo-file",
            "log.cbr",
        ])
        .unwrap();
        assert_eq!(args.config, PathBuf::from("fd.toml"));
        assert_eq!(args.adif_file, PathBuf::from("log.adi"));
        assert_eq!(args.cabrillo_file, PathBuf::from("log.cbr"));
        assert_eq!(args.log_level, None);
    }

    #[test]
    fn test_parse_short_options_and_default_config() {
        let args = Args::try_parse_from([
            "adif2cabrillo",
            "-a",
            "log.adi",
            "-c",
            "-",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.config, PathBuf::from("config.toml"));
        assert_eq!(args.cabrillo_file, PathBuf::from("-"));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_required_files() {
        assert!(Args::try_parse_from(["adif2cabrillo", "-a", "log.adi"]).is_err());
        assert!(Args::try_parse_from(["adif2cabrillo", "-c", "out.cbr"]).is_err());
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(
            expand_home(Path::new("/tmp/log.cbr")),
            PathBuf::from("/tmp/log.cbr")
        );
        if let Some(home) = std::env::var_os("HOME") {
            assert_eq!(
                expand_home(Path::new("~/log.cbr")),
                PathBuf::from(home).join("log.cbr")
            );
        }
    }

    #[test]
    fn test_run_reports_missing_adif() {
        let args = Args::try_parse_from([
            "adif2cabrillo",
            "-a",
            "/nonexistent/adif2cabrillo/log.adi",
            "-c",
            "-",
        ])
        .unwrap();
        let config = Config::new(Templates::new("H", "L", "F"));
        let err = run(&args, &config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::InputUnavailable { .. })
        ));
    }

    #[test]
    fn test_run_writes_cabrillo_file() {
        let dir = scratch_dir("ok");
        let adif = dir.join("log.adi");
        let cabrillo = dir.join("log.cbr");
        fs::write(&adif, "<CALL:4>W1AW<QSO_DATE:8>20240622<TIME_ON:4>1803<eor>").unwrap();

        let config = Config::new(Templates::new("H", "{{ CALL }} {{ DATE_TIME }}", "F"));
        run(&file_args(&adif, &cabrillo), &config).unwrap();
        assert_eq!(
            fs::read_to_string(&cabrillo).unwrap(),
            "H\n\nW1AW 2024-06-22 1803\nF\n"
        );

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_failed_render_leaves_no_output_file() {
        let dir = scratch_dir("partial");
        let adif = dir.join("log.adi");
        let cabrillo = dir.join("log.cbr");
        fs::write(
            &adif,
            "<CALL:4>W1AW<QSO_DATE:8>20240622<TIME_ON:4>1803<eor><CALL:5>K1ABC<eor>",
        )
        .unwrap();

        let config = Config::new(Templates::new("H", "{{ CALL }}", "F"));
        let err = run(&file_args(&adif, &cabrillo), &config).unwrap_err();
        assert_eq!(
            err.downcast_ref::<Error>(),
            Some(&Error::MissingField("QSO_DATE".to_string()))
        );
        assert!(!cabrillo.exists());

        fs::remove_dir_all(&dir).unwrap();
    }
}
