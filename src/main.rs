mod app;
mod command;
mod config;
mod consts;
mod game;
mod input;
mod logging;
mod session;
mod ui;
mod util;
use crate::app::App;
use crate::config::Config;
use crate::logging::{LogConfig, LogLevel};
use crate::session::Session;
use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use lexopt::{Arg, Parser, ValueExt};
use rand::{rngs::StdRng, SeedableRng};
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

const USAGE: &str = concat!(
    "Usage: applesnake [<options>]\n",
    "\n",
    "Guide a snake around a 20x20 board to eat apples.\n",
    "\n",
    "Options:\n",
    "  -c, --config <PATH>     Read configuration from the given file\n",
    "      --log-file <PATH>   Append diagnostic logs to the given file\n",
    "      --log-level <LEVEL> Log level: error, warn, info, debug, or trace\n",
    "      --seed <N>          Seed the random number generator\n",
    "  -h, --help              Show this help and exit\n",
    "  -V, --version           Show the program version and exit\n",
);

#[derive(Clone, Debug, Eq, PartialEq)]
enum Invocation {
    Run(Arguments),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    log_file: Option<PathBuf>,
    log_level: Option<LogLevel>,
    seed: Option<u64>,
}

impl Invocation {
    fn from_parser(mut parser: Parser) -> Result<Invocation, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(parser.value()?.into());
                }
                Arg::Long("log-file") => args.log_file = Some(parser.value()?.into()),
                Arg::Long("log-level") => args.log_level = Some(parser.value()?.parse()?),
                Arg::Long("seed") => args.seed = Some(parser.value()?.parse()?),
                Arg::Short('h') | Arg::Long("help") => return Ok(Invocation::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Invocation::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Invocation::Run(args))
    }
}

impl Arguments {
    fn run(self) -> anyhow::Result<()> {
        let mut config = match self.config {
            Some(ref path) => Config::load(path, false),
            None => Config::default_path().and_then(|p| Config::load(&p, true)),
        }
        .context("failed to load configuration")?;
        self.apply_overrides(&mut config.log);
        logging::init(&config.log).context("failed to set up logging")?;
        info!(
            config = ?self.config,
            seed = ?self.seed,
            pace = ?config.game.pace,
            "starting"
        );
        let rng = self
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        let app = App::new(Session::new(config.game.pace, rng));
        let terminal = ratatui::init();
        let r = execute!(io::stdout(), EnableMouseCapture).and_then(|()| app.run(terminal));
        let _ = execute!(io::stdout(), DisableMouseCapture);
        ratatui::restore();
        match r {
            Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
            r => r.context("terminal I/O failed"),
        }
    }

    /// Apply `--log-file` and `--log-level`, which take precedence over the
    /// configuration file
    fn apply_overrides(&self, log: &mut LogConfig) {
        if let Some(ref file) = self.log_file {
            log.file = Some(file.clone());
        }
        if let Some(level) = self.log_level {
            log.level = level;
        }
    }
}

fn main() -> ExitCode {
    match Invocation::from_parser(Parser::from_env()) {
        Ok(Invocation::Run(args)) => match args.run() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("applesnake: {e:?}");
                ExitCode::from(2)
            }
        },
        Ok(Invocation::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Invocation::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("applesnake: {e}\n\n{USAGE}");
            ExitCode::from(2)
        }
    }
}
