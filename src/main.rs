// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ledgerdesk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ledgerdesk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Ledgerdesk CLI entrypoint.
//!
//! Reads commands from stdin and talks to the configured REST backend, or to a built-in
//! in-memory backend with `--demo`.

use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use ledgerdesk::backend::{Backend, HttpBackend, MemoryBackend};
use ledgerdesk::config::DeskConfig;
use ledgerdesk::desk::Desk;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:
  {program} [--config <file>] [--backend-url <url>]
  {program} --demo [--config <file>]

Without --config the file named by LEDGERDESK_CONFIG is used, if set.
--backend-url overrides backend.base_url and LEDGERDESK_BACKEND_URL.
--demo uses a built-in in-memory backend with sample records and cannot be combined
with --backend-url.

Log verbosity follows RUST_LOG (default: info). Logs go to stderr."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    config: Option<String>,
    backend_url: Option<String>,
    demo: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--config" => {
                if options.config.is_some() {
                    return Err(());
                }
                options.config = Some(args.next().ok_or(())?);
            }
            "--backend-url" => {
                if options.backend_url.is_some() {
                    return Err(());
                }
                let url = args.next().ok_or(())?;
                if url.trim().is_empty() {
                    return Err(());
                }
                options.backend_url = Some(url);
            }
            _ => return Err(()),
        }
    }

    if options.demo && options.backend_url.is_some() {
        return Err(());
    }

    Ok(options)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "ledgerdesk".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        init_tracing();

        let mut config = DeskConfig::load(options.config.as_deref().map(Path::new))?;
        if let Some(url) = options.backend_url {
            config.backend.base_url = url;
        }
        let routes = config.route_table()?;

        let backend: Arc<dyn Backend> = if options.demo {
            tracing::info!("using the in-memory demo backend");
            Arc::new(MemoryBackend::demo())
        } else {
            let backend = HttpBackend::new(&config.backend.base_url, config.request_timeout())?;
            tracing::info!(base_url = %backend.base_url(), "using the REST backend");
            Arc::new(backend)
        };
        let desk = Desk::new(routes, backend);

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        runtime.block_on(async {
            let input = BufReader::new(tokio::io::stdin());
            let mut output = std::io::stdout();
            ledgerdesk::shell::run(&desk, input, &mut output).await
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("ledgerdesk: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_options, CliOptions};

    fn args(raw: &[&str]) -> impl Iterator<Item = String> {
        raw.iter().map(|arg| (*arg).to_owned()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn parses_empty_args() {
        let options = parse_options(std::iter::empty()).expect("parse options");
        assert_eq!(options, CliOptions::default());
    }

    #[test]
    fn parses_demo_flag() {
        let options = parse_options(args(&["--demo"])).expect("parse options");
        assert!(options.demo);
        assert!(options.config.is_none());
        assert!(options.backend_url.is_none());
    }

    #[test]
    fn parses_config_and_backend_url() {
        let options =
            parse_options(args(&["--config", "desk.toml", "--backend-url", "http://x/api"]))
                .expect("parse options");
        assert_eq!(options.config.as_deref(), Some("desk.toml"));
        assert_eq!(options.backend_url.as_deref(), Some("http://x/api"));
        assert!(!options.demo);
    }

    #[test]
    fn parses_demo_with_config() {
        let options =
            parse_options(args(&["--config", "desk.toml", "--demo"])).expect("parse options");
        assert!(options.demo);
        assert_eq!(options.config.as_deref(), Some("desk.toml"));
    }

    #[test]
    fn rejects_demo_with_backend_url() {
        parse_options(args(&["--demo", "--backend-url", "http://x"])).unwrap_err();
    }

    #[test]
    fn rejects_unknown_and_positional_args() {
        parse_options(args(&["--nope"])).unwrap_err();
        parse_options(args(&["desk.toml"])).unwrap_err();
    }

    #[test]
    fn rejects_duplicate_flags() {
        parse_options(args(&["--demo", "--demo"])).unwrap_err();
        parse_options(args(&["--config", "a", "--config", "b"])).unwrap_err();
    }

    #[test]
    fn rejects_missing_or_blank_values() {
        parse_options(args(&["--config"])).unwrap_err();
        parse_options(args(&["--backend-url"])).unwrap_err();
        parse_options(args(&["--backend-url", " "])).unwrap_err();
    }
}
