mod command;
mod export;
mod form;
mod helper;
mod logging;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use colored::Colorize;
use fakebiz_core::stage::StageOutcome;
use fakebiz_core::{BrandRequest, LogoRequest};
use fakebiz_infrastructure::{FakeBizPaths, load_settings};
use fakebiz_interaction::Studio;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

use command::Command;
use helper::CliHelper;

type FakeBizEditor = Editor<CliHelper, DefaultHistory>;

#[derive(Parser)]
#[command(name = "fakebiz")]
#[command(about = "Generate a fake business: brand identity, logo, and landing page", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding config.toml and secret.json (default: ~/.config/fakebiz)
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Write logo.png and fake_business.html here after each successful stage
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Inputs remembered between commands so each form opens pre-filled.
struct Repl {
    studio: Studio,
    out_dir: Option<PathBuf>,
    brand_defaults: BrandRequest,
    logo_defaults: LogoRequest,
}

impl Repl {
    fn new(studio: Studio, out_dir: Option<PathBuf>) -> Self {
        Self {
            studio,
            out_dir,
            brand_defaults: BrandRequest::default(),
            logo_defaults: LogoRequest::default(),
        }
    }

    /// Runs one command. Returns `false` when the session should end.
    async fn handle(&mut self, rl: &mut FakeBizEditor, command: Command) -> Result<bool> {
        match command {
            Command::Brand => self.brand(rl).await?,
            Command::Logo => self.logo(rl).await?,
            Command::Page => self.landing_page().await,
            Command::Show => {
                let session = self.studio.session();
                if session.has_brand_record() {
                    println!("{}\n", session.brand_record());
                } else {
                    println!("{}", fakebiz_core::stage::MISSING_BRAND_GUIDANCE.yellow());
                }
            }
            Command::Status => render::status(self.studio.session()),
            Command::Help => render::help(),
            Command::Quit => {
                println!("{}", "Goodbye!".bright_green());
                return Ok(false);
            }
            Command::Unknown(input) => {
                println!("{} {}", "Unknown command:".bright_black(), input.bright_black());
                println!("{}", "Type /help to list commands.".bright_black());
            }
        }
        Ok(true)
    }

    async fn brand(&mut self, rl: &mut FakeBizEditor) -> Result<()> {
        let Some(request) = form::brand_request(rl, &self.brand_defaults)? else {
            println!("{}", "Cancelled.".yellow());
            return Ok(());
        };

        let spinner = render::spinner(render::BRAND_SPINNER);
        let outcome = self.studio.generate_brand(&request).await;
        spinner.finish();

        match outcome {
            StageOutcome::Success(identity) => render::brand(&identity),
            StageOutcome::Failure(failure) => render::failure(&failure),
            StageOutcome::Skipped(guidance) => render::guidance(&guidance),
        }

        self.logo_defaults = LogoRequest::from(&request);
        self.brand_defaults = request;
        Ok(())
    }

    async fn logo(&mut self, rl: &mut FakeBizEditor) -> Result<()> {
        // Without a brand record the stage only answers with guidance.
        let request = if self.studio.session().has_brand_record() {
            match form::logo_request(rl, &self.logo_defaults)? {
                Some(request) => request,
                None => {
                    println!("{}", "Cancelled.".yellow());
                    return Ok(());
                }
            }
        } else {
            self.logo_defaults.clone()
        };

        let spinner = render::spinner(render::LOGO_SPINNER);
        let outcome = self.studio.generate_logo(&request).await;
        spinner.finish();

        match outcome {
            StageOutcome::Success(logo) => {
                render::logo(&logo);
                if let Some(dir) = &self.out_dir {
                    match export::write_logo(dir, &logo) {
                        Ok(path) => render::saved(&path),
                        Err(e) => eprintln!("{} {:#}", "Export failed:".red(), e),
                    }
                }
            }
            StageOutcome::Failure(failure) => render::failure(&failure),
            StageOutcome::Skipped(guidance) => render::guidance(&guidance),
        }

        self.logo_defaults = request;
        Ok(())
    }

    async fn landing_page(&mut self) {
        let spinner = render::spinner(render::PAGE_SPINNER);
        let outcome = self.studio.generate_landing_page().await;
        spinner.finish();

        match outcome {
            StageOutcome::Success(page) => {
                render::landing_page(&page);
                if let Some(dir) = &self.out_dir {
                    match export::write_landing_page(dir, &page) {
                        Ok(path) => render::saved(&path),
                        Err(e) => eprintln!("{} {:#}", "Export failed:".red(), e),
                    }
                }
            }
            StageOutcome::Failure(failure) => render::failure(&failure),
            StageOutcome::Skipped(guidance) => render::guidance(&guidance),
        }
    }
}

fn build_studio(paths: &FakeBizPaths) -> Result<Studio> {
    let settings = match load_settings(paths) {
        Ok(settings) => settings,
        Err(err) => {
            if err.is_config() {
                if let Ok(secret_file) = paths.ensure_secret_file() {
                    eprintln!(
                        "{} {}",
                        "Add your Hugging Face token to".yellow(),
                        secret_file.display().to_string().bright_white()
                    );
                    eprintln!("{}", "or export HF_TOKEN before starting fakebiz.".yellow());
                }
            }
            return Err(err).with_context(|| {
                format!("Failed to load settings from {}", paths.config_dir().display())
            });
        }
    };

    Studio::from_settings(&settings).context("Failed to start inference clients")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let paths = FakeBizPaths::new(cli.config_dir.as_deref())?;
    let studio = build_studio(&paths)?;
    let mut repl = Repl::new(studio, cli.out_dir);

    let mut rl: FakeBizEditor = Editor::new()?;
    rl.set_helper(Some(CliHelper));

    render::welcome();

    loop {
        match rl.readline("> ") {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(input);

                if !repl.handle(&mut rl, Command::parse(input)).await? {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                println!("{} {:?}", "Error:".red(), err);
                break;
            }
        }
    }

    Ok(())
}
