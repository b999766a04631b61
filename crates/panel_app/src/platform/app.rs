use std::io;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind};
use crossterm::execute;
use panel_core::{update, Msg, PanelState};
use panel_logging::{panel_debug, panel_info};
use ratatui::DefaultTerminal;

use super::config::{AppConfig, Cli};
use super::effects::{EffectRunner, ParentCallbacks};
use super::input::{map_key, map_paste, Action};
use super::{logging, picker, ui};

/// Render/poll interval of the host loop.
const TICK: Duration = Duration::from_millis(75);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    Imported,
    Cancelled,
}

/// The embedding view: reacts to the panel's callbacks by closing it.
#[derive(Default)]
struct Host {
    exit: Option<Exit>,
}

impl ParentCallbacks for Host {
    fn on_imported(&mut self) {
        panel_info!("Import accepted; closing panel");
        self.exit = Some(Exit::Imported);
    }

    fn on_cancel(&mut self) {
        panel_info!("Panel dismissed by user");
        self.exit.get_or_insert(Exit::Cancelled);
    }
}

pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    logging::initialize(cli.verbose);

    let config = AppConfig::resolve(&cli)?;
    let settings = config.engine_settings()?;
    let endpoint = settings.endpoint().context("invalid server url")?;
    panel_info!("Import panel targeting {}", endpoint);

    let runner = EffectRunner::new(settings);

    let mut terminal = ratatui::init();
    execute!(io::stdout(), EnableBracketedPaste)?;
    let result = event_loop(&mut terminal, &runner);
    let _ = execute!(io::stdout(), DisableBracketedPaste);
    ratatui::restore();

    match result? {
        Exit::Imported => println!("Import started. The new task will appear in the project."),
        Exit::Cancelled => {}
    }
    Ok(())
}

fn event_loop(terminal: &mut DefaultTerminal, runner: &EffectRunner) -> anyhow::Result<Exit> {
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let mut state = PanelState::new();
    let mut host = Host::default();
    let mut needs_draw = true;
    let mut frames: u64 = 0;

    loop {
        let mut inbox: Vec<Msg> = msg_rx.try_iter().collect();
        inbox.extend(runner.poll());
        for msg in inbox {
            state = dispatch(state, msg, runner, &mut host);
        }

        if let Some(exit) = host.exit {
            return Ok(exit);
        }

        if state.consume_dirty() || needs_draw {
            let view = state.view();
            terminal.draw(|frame| ui::render::render(frame, &view))?;
            frames += 1;
            panel_debug!("Drew frame {}", frames);
            needs_draw = false;
        }

        if !event::poll(TICK)? {
            state = dispatch(state, Msg::Tick, runner, &mut host);
            continue;
        }

        let view = state.view();
        let action = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => map_key(&view, key),
            Event::Paste(text) => map_paste(&view, &text),
            Event::Resize(_, _) => {
                needs_draw = true;
                Action::None
            }
            _ => Action::None,
        };
        match action {
            Action::Dispatch(msg) => state = dispatch(state, msg, runner, &mut host),
            Action::PickFile => picker::pick_archive(msg_tx.clone()),
            Action::None => {}
        }
    }
}

fn dispatch(state: PanelState, msg: Msg, runner: &EffectRunner, host: &mut Host) -> PanelState {
    let (state, effects) = update(state, msg);
    runner.run(effects, host);
    state
}
