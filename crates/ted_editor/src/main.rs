mod action;
mod config;
mod editor;
mod panic;
mod render;

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use ted_term::platform::{Events, PlatformTerminal, Terminal, Writer};
use ted_term::units::OffsetU16;

use crate::config::{Cli, Config};
use crate::editor::Editor;

const FRAME_RATE: Duration = Duration::from_millis(17);

fn main() -> Result<()> {
    let config = Config::from_cli(Cli::parse())?;

    init_logging(&config).context("couldn't set up logging")?;
    log::info!("starting with {config:?}");

    panic::catch_and_reprint_panic(|| App::new(&config)?.run()).context("panicked")??;

    log::info!("exited cleanly");

    Ok(())
}

fn init_logging(config: &Config) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            let now = chrono::Local::now();

            out.finish(format_args!(
                "[{} {} {}] {}",
                now.format("%Y/%m/%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(config.log_level)
        .chain(fern::log_file(&config.log_file)?)
        .apply()?;

    Ok(())
}

struct App {
    terminal: PlatformTerminal,
    editor: Editor,

    /// Screen size at the last redraw.
    size: OffsetU16,
}

impl App {
    fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            terminal: PlatformTerminal::init().context("couldn't set up the terminal")?,
            editor: Editor::new(config.capacity),

            size: OffsetU16::ZERO,
        })
    }

    fn run(mut self) -> Result<()> {
        self.draw()?;

        loop {
            let deadline = Instant::now() + FRAME_RATE;

            match self.terminal.events().read_with_deadline(deadline)? {
                Some(event) => {
                    log::debug!("event: {event:?}");

                    let page_rows = render::text_rows(self.size);
                    if self.editor.handle_event(&event, page_rows).is_break() {
                        return Ok(());
                    }

                    self.draw()?;
                }

                None => {
                    if self.terminal.size()? != self.size {
                        self.draw()?;
                    }
                }
            }
        }
    }

    fn draw(&mut self) -> Result<()> {
        let size = self.terminal.size()?;
        if size != self.size {
            log::debug!("screen size: {}x{}", size.x, size.y);
            self.size = size;
        }

        self.editor.scroll_to_show_cursor(render::text_rows(size));

        let writer = self.terminal.writer();
        render::draw(&self.editor, size, writer);
        writer.flush()?;

        Ok(())
    }
}
