extern crate grapheme_data;

use anyhow::{bail, Context};
use grapheme_data::config::{Config, Language};
use grapheme_data::driver;
use std::path::PathBuf;
use std::process::ExitCode;

const HELP: &str = "\
Usage: generate_grapheme_data [options...]
  -h, --help            Prints help information
  --lang=<c|rust>       Output language (default: c)
  --root=<dir>          Directory output paths are relative to (default: .)
  --cache-dir=<dir>     UCD file cache (default: data)
  --base-url=<url>      UCD root URL (default: latest UCD on unicode.org)
";

fn parse_args() -> anyhow::Result<Option<Config>> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let defaults = Config::default();
    let config = Config {
        language: args
            .opt_value_from_fn("--lang", |arg| arg.parse::<Language>())?
            .unwrap_or(defaults.language),
        output_root: args
            .opt_value_from_os_str("--root", |s| -> Result<PathBuf, &'static str> { Ok(s.into()) })?
            .unwrap_or(defaults.output_root),
        cache_dir: args
            .opt_value_from_os_str("--cache-dir", |s| -> Result<PathBuf, &'static str> { Ok(s.into()) })?
            .unwrap_or(defaults.cache_dir),
        base_url: args
            .opt_value_from_str("--base-url")?
            .unwrap_or(defaults.base_url),
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        bail!("unrecognized arguments: {:?}", remaining);
    }
    Ok(Some(config))
}

fn run() -> anyhow::Result<()> {
    let config = match parse_args()? {
        Some(config) => config,
        None => {
            eprint!("{}", HELP);
            return Ok(());
        }
    };

    driver::run(&config).with_context(|| {
        format!(
            "generating {} and {}",
            config.declarations_path().display(),
            config.data_path().display()
        )
    })
}

fn main() -> ExitCode {
    env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:?}", e);
            ExitCode::FAILURE
        }
    }
}
