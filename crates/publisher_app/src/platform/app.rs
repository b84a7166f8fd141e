use std::fs;
use std::io::{self, BufRead};
use std::path::Path;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context};
use publisher_core::{update, AppState, FeaturedImage, Msg, SelectAllScope};
use publisher_engine::{ApiSettings, BatchSettings, EngineHandle, ReqwestApi};
use publisher_logging::{parse_level, publisher_info};

use super::commands::{parse_command, ArticleAction, Command, HELP};
use super::effects::EffectRunner;
use super::logging;
use super::persistence::{load_settings, save_settings, Settings};
use super::render::{render, render_notice};
use crate::cli::Cli;

const INPUT_POLL: Duration = Duration::from_millis(50);

pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    let level = parse_level(&cli.log_level)
        .ok_or_else(|| anyhow!("unknown log level '{}'", cli.log_level))?;
    logging::initialize(cli.log_destination, level);

    let settings = load_settings(&cli.settings);
    let config = RunConfig::resolve(&cli, &settings);
    publisher_info!(
        "starting: api_url={} profile={:?} call_timeout={:?} scope={:?}",
        config.api_url,
        config.profile,
        config.call_timeout,
        config.scope
    );

    let api = ReqwestApi::new(&ApiSettings {
        base_url: config.api_url.clone(),
        ..ApiSettings::default()
    })
    .with_context(|| format!("invalid backend url '{}'", config.api_url))?;
    let engine = EngineHandle::new(
        Arc::new(api),
        BatchSettings {
            call_timeout: config.call_timeout,
        },
    )
    .context("failed to start the engine runtime")?;

    let mut app = App {
        state: AppState::with_select_all_scope(config.scope),
        runner: EffectRunner::new(engine),
    };
    let input = spawn_input_reader();

    println!("Type 'help' for commands.");
    app.dispatch(Msg::Started);
    if let Some(profile) = config.profile.clone() {
        app.dispatch(Msg::ProfileChosen(profile));
    }

    loop {
        while let Some(msg) = app.runner.try_next() {
            app.dispatch(msg);
        }
        match input.recv_timeout(INPUT_POLL) {
            Ok(line) => match parse_command(&line) {
                Ok(Command::Quit) => {
                    app.quit();
                    break;
                }
                Ok(command) => app.handle(command),
                Err(err) => println!("{err}"),
            },
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                app.quit();
                break;
            }
        }
    }

    save_settings(&cli.settings, &config.to_settings(&app.state));
    publisher_info!("exiting");
    Ok(())
}

/// Effective configuration: CLI flags win over the settings file.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RunConfig {
    api_url: String,
    profile: Option<String>,
    call_timeout_secs: Option<u64>,
    call_timeout: Option<Duration>,
    scope: SelectAllScope,
}

impl RunConfig {
    fn resolve(cli: &Cli, settings: &Settings) -> Self {
        let call_timeout_secs = cli.call_timeout_secs.or(settings.call_timeout_secs);
        let call_timeout = match call_timeout_secs {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => BatchSettings::default().call_timeout,
        };
        Self {
            api_url: cli
                .api_url
                .clone()
                .or_else(|| settings.api_url.clone())
                .unwrap_or_else(|| ApiSettings::default().base_url),
            profile: cli.profile.clone().or_else(|| settings.last_profile.clone()),
            call_timeout_secs,
            call_timeout,
            scope: cli
                .select_all_scope
                .or(settings.select_all_scope)
                .map(SelectAllScope::from)
                .unwrap_or_default(),
        }
    }

    fn to_settings(&self, state: &AppState) -> Settings {
        Settings {
            api_url: Some(self.api_url.clone()),
            last_profile: state.current_profile().map(|p| p.name.clone()),
            call_timeout_secs: self.call_timeout_secs,
            select_all_scope: Some(state.select_all_scope().into()),
        }
    }
}

struct App {
    state: AppState,
    runner: EffectRunner,
}

impl App {
    fn handle(&mut self, command: Command) {
        match command {
            Command::Help => println!("{HELP}"),
            Command::Show => print!("{}", render(&self.state.view())),
            Command::Send(msg) => self.dispatch(msg),
            Command::Article { position, action } => match self.article_msg(position, action) {
                Ok(msg) => self.dispatch(msg),
                Err(err) => println!("{err}"),
            },
            Command::Quit => {}
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        for notice in state.take_notices() {
            println!("{}", render_notice(&notice));
        }
        if state.consume_dirty() {
            print!("{}", render(&state.view()));
        }
        self.state = state;
        self.runner.run(effects);
    }

    fn article_msg(&self, position: usize, action: ArticleAction) -> Result<Msg, String> {
        let path = self
            .state
            .articles()
            .path_at(position - 1)
            .ok_or_else(|| format!("there is no article {position}"))?
            .to_string();
        let msg = match action {
            ArticleAction::Toggle => Msg::ArticleToggled { path },
            ArticleAction::Status(status) => Msg::ArticleStatusChanged { path, status },
            ArticleAction::Image(file) => Msg::ArticleImageChosen {
                path,
                image: read_image(&file)?,
            },
            ArticleAction::ClearImage => Msg::ArticleImageCleared { path },
            ArticleAction::Taxonomy(kind) => Msg::ArticleTaxonomyOpened { path, kind },
        };
        Ok(msg)
    }

    /// An in-flight batch is allowed to report back before the app exits.
    fn quit(&mut self) {
        if self.state.is_publishing() {
            println!("waiting for the running batch to finish");
        }
        self.finish_running_batch();
    }

    /// Keeps pumping engine events until an in-flight batch reports back.
    fn finish_running_batch(&mut self) {
        while self.state.is_publishing() {
            if let Some(msg) = self.runner.next_timeout(Duration::from_secs(1)) {
                self.dispatch(msg);
            }
        }
    }
}

fn read_image(file: &Path) -> Result<FeaturedImage, String> {
    let bytes = fs::read(file).map_err(|err| format!("cannot read {}: {err}", file.display()))?;
    let filename = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| format!("{} is not a file", file.display()))?;
    Ok(FeaturedImage { filename, bytes })
}

fn spawn_input_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}
