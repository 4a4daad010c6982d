//! Line-driven front end for the calculator engine.
//!
//! The shell owns the [`Engine`], translates key tokens and menu commands
//! into intents, drives the error auto-clear timer and prints the render
//! contract after every batch of input.

mod keymap;
mod timer;

pub use keymap::{Input, MenuCommand, char_key, named_key, parse_line};
pub use timer::AutoClear;

use crate::calculator::{ClipboardBackend, Engine, Intent, Render};
use crate::config::Config;
use flume::{Receiver, Sender};
use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;
use tracing::{debug, warn};

/// Events processed by the shell loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShellEvent {
    /// A line of key tokens.
    Line(String),
    /// The auto-clear timer for an error epoch fired.
    ErrorExpired(u64),
    /// Input is exhausted.
    Eof,
}

/// How renders are printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Plain,
    Json,
}

/// The calculator shell.
pub struct Shell<W: Write> {
    engine: Engine,
    clipboard: Box<dyn ClipboardBackend>,
    auto_clear: AutoClear,
    events: Sender<ShellEvent>,
    output: W,
    format: OutputFormat,
}

impl<W: Write> Shell<W> {
    pub fn new(
        config: &Config,
        clipboard: Box<dyn ClipboardBackend>,
        events: Sender<ShellEvent>,
        output: W,
    ) -> Self {
        let format = if config.json {
            OutputFormat::Json
        } else {
            OutputFormat::Plain
        };

        Self {
            engine: Engine::new(),
            clipboard,
            auto_clear: AutoClear::new(config.error_timeout()),
            events,
            output,
            format,
        }
    }

    /// Process events until input ends or the user quits.
    pub async fn run(&mut self, events: Receiver<ShellEvent>) -> io::Result<()> {
        let render = self.engine.render();
        self.write_render(&render)?;

        while let Ok(event) = events.recv_async().await {
            if self.handle_event(event)?.is_break() {
                break;
            }
        }

        self.auto_clear.cancel();
        Ok(())
    }

    /// Handle one event. Must be called from within a tokio runtime.
    pub fn handle_event(&mut self, event: ShellEvent) -> io::Result<ControlFlow<()>> {
        match event {
            ShellEvent::Line(line) => self.handle_line(&line),
            ShellEvent::ErrorExpired(epoch) => {
                if self.engine.expire_error(epoch) {
                    self.auto_clear.sync(self.engine.error(), &self.events);
                    let render = self.engine.render();
                    self.write_render(&render)?;
                }
                Ok(ControlFlow::Continue(()))
            }
            ShellEvent::Eof => Ok(ControlFlow::Break(())),
        }
    }

    fn handle_line(&mut self, line: &str) -> io::Result<ControlFlow<()>> {
        let inputs = parse_line(line);
        if inputs.is_empty() {
            return Ok(ControlFlow::Continue(()));
        }

        let mut flow = ControlFlow::Continue(());
        for input in inputs {
            match input {
                Input::Key(intent) => {
                    self.engine.apply(intent);
                }
                Input::Menu(MenuCommand::Copy) => self.copy(),
                Input::Menu(MenuCommand::Paste) => self.paste(),
                Input::Menu(MenuCommand::Clear) => {
                    self.engine.apply(Intent::Clear);
                }
                Input::Menu(MenuCommand::About) => {
                    writeln!(self.output, "{}", about_text())?;
                }
                Input::Menu(MenuCommand::Quit) => {
                    flow = ControlFlow::Break(());
                    break;
                }
                Input::Unbound(key) => debug!(%key, "unbound key"),
            }
        }

        self.auto_clear.sync(self.engine.error(), &self.events);
        let render = self.engine.render();
        self.write_render(&render)?;
        Ok(flow)
    }

    fn copy(&mut self) {
        let text = self.engine.clipboard_text();
        match self.clipboard.write_text(&text) {
            Ok(()) => debug!(%text, "copied"),
            Err(e) => warn!(error = %e, "copy failed"),
        }
    }

    fn paste(&mut self) {
        match self.clipboard.read_text() {
            Ok(text) => {
                self.engine.apply(Intent::Paste(text));
            }
            Err(e) => warn!(error = %e, "paste failed"),
        }
    }

    fn write_render(&mut self, render: &Render) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string(render)?;
                writeln!(self.output, "{}", json)?;
            }
            OutputFormat::Plain => {
                if render.is_error {
                    writeln!(self.output, "[error] {}", render.display_text)?;
                } else if render.operation_indicator_text.is_empty() {
                    writeln!(self.output, "{}", render.display_text)?;
                } else {
                    writeln!(
                        self.output,
                        "[{}] {}",
                        render.operation_indicator_text, render.display_text
                    )?;
                }
            }
        }
        self.output.flush()
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn output(&self) -> &W {
        &self.output
    }
}

/// Text for the About menu entry.
pub fn about_text() -> String {
    format!("zcalc v{}", crate::version())
}

/// Read lines from stdin on a dedicated thread and forward them as events.
pub fn spawn_stdin_reader(events: Sender<ShellEvent>) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if events.send(ShellEvent::Line(line)).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "failed to read stdin");
                    break;
                }
            }
        }
        let _ = events.send(ShellEvent::Eof);
    })
}
