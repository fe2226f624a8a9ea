use std::path::PathBuf;
use std::process::ExitCode;

use sa_menu::config::{CONFIG_FILE, Config};
use sa_menu::terminal::debug_log;

mod app;

/// Options parsed from the command line.
#[derive(Debug, Default)]
struct Options {
    config: Option<PathBuf>,
    debug: bool,
}

fn main() -> ExitCode {
    let mut options = Options::default();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => {
                println!("sa-menu {}", env!("CARGO_PKG_VERSION"));
                return ExitCode::SUCCESS;
            }
            "--help" | "-h" => {
                print_help();
                return ExitCode::SUCCESS;
            }
            "--debug" => options.debug = true,
            "--config" => match args.next() {
                Some(path) => options.config = Some(PathBuf::from(path)),
                None => {
                    eprintln!("error: '--config' requires a path");
                    return ExitCode::FAILURE;
                }
            },
            arg => {
                eprintln!("error: unknown argument '{arg}'");
                eprintln!("run 'sa-menu --help' for usage");
                return ExitCode::FAILURE;
            }
        }
    }

    match run(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(options: Options) -> anyhow::Result<()> {
    if options.debug {
        let path = debug_log::init()?;
        eprintln!("debug log: {}", path.display());
    }

    let config_path = options.config.unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
    let config = Config::load(&config_path)?;
    log::debug!(
        "loaded {} item(s) from {}",
        config.menu.items.len(),
        config_path.display()
    );

    let mut app = app::App::new(&config)?;
    app.run()?;
    Ok(())
}

fn print_help() {
    println!(
        "sa-menu {} - San Andreas style list menu in the terminal

USAGE:
    sa-menu [OPTIONS]

OPTIONS:
    -h, --help           Print help information
    -V, --version        Print version information
    --config <PATH>      Menu definition to load (default: ./{})
    --debug              Write a debug log to ~/.sa-menu/debug.log

KEYS:
    Up/k, Down/j         Move the selection (wraps around)
    Enter, Space         Activate the selected item
    Esc                  Close or reopen the menu
    q                    Quit while the menu is closed
    Ctrl+C               Quit

CONFIG:
    {{
      \"safe_zone\": 0.95,
      \"menu\": {{
        \"title\": \"Garage\",
        \"offset\": {{ \"x\": 69, \"y\": 350 }},
        \"header\": {{ \"title\": \"Mods\" }},
        \"items\": [{{ \"title\": \"Respray\", \"subtitle\": \"$100\" }}]
      }}
    }}",
        env!("CARGO_PKG_VERSION"),
        CONFIG_FILE
    );
}
