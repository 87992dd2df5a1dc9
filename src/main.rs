use std::path::PathBuf;

use tilescroll::config::GameConfig;
use tilescroll::engine::EngineBuilder;

struct Args {
    config: Option<PathBuf>,
    debug: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args { config: None, debug: false };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--debug" => args.debug = true,
            "--config" => {
                let path = iter.next().ok_or_else(|| anyhow::anyhow!("--config needs a path"))?;
                args.config = Some(PathBuf::from(path));
            }
            other => anyhow::bail!("unknown argument '{other}' (expected --config <path> or --debug)"),
        }
    }
    Ok(args)
}

fn run() -> anyhow::Result<()> {
    let args = parse_args()?;

    let default_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if args.debug {
        log::debug!("debug mode enabled");
    }

    EngineBuilder::new(config).with_debug(args.debug).run()
}

fn main() {
    if let Err(e) = run() {
        log::error!("{e:#}");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
