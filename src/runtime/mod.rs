//! Event loop driving tasks.
//!
//! The [`Driver`] is the single consumer of events. It waits on the key
//! source and on the [`Scheduler`] channel at the same time, feeds whichever
//! arrives first into the task, spawns the commands the task hands back and
//! redraws. Events carrying another task's id are dropped.

pub mod input;
pub mod scheduler;
pub mod screen;

pub use input::{EventSource, InputEvent, RawModeGuard, ScriptedInput, TerminalInput};
pub use scheduler::{Envelope, JobId, Scheduler};
pub use screen::Screen;

use crate::event::Event;
use crate::locale::{Locale, TableLocale};
use crate::render::{PlainRenderer, RenderContext, Renderer};
use crate::tasks::{Task, TaskResult};
use std::io::Write;

const DEFAULT_WIDTH: u16 = 80;

/// What woke the loop up.
enum Wake {
    Input(InputEvent),
    Scheduled(Envelope),
}

/// Runs tasks against an input source and an output writer.
pub struct Driver<S: EventSource, W: Write> {
    source: S,
    screen: Screen<W>,
    renderer: Box<dyn Renderer>,
    locale: Box<dyn Locale>,
    width: u16,
}

impl<S: EventSource, W: Write> Driver<S, W> {
    pub fn new(source: S, out: W) -> Self {
        Self {
            source,
            screen: Screen::new(out),
            renderer: Box::new(PlainRenderer::default()),
            locale: Box::new(TableLocale::default()),
            width: DEFAULT_WIDTH,
        }
    }

    #[must_use]
    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: impl Locale + 'static) -> Self {
        self.locale = Box::new(locale);
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn screen(&self) -> &Screen<W> {
        &self.screen
    }

    pub fn into_parts(self) -> (S, W) {
        (self.source, self.screen.into_inner())
    }

    /// Drive `task` until it is done and return its result.
    ///
    /// Background jobs still pending when the task finishes are aborted.
    pub async fn run(&mut self, task: &mut dyn Task) -> anyhow::Result<TaskResult> {
        let (mut scheduler, mut receiver) = Scheduler::new();
        let task_id = task.id();
        log::info!("Running task '{}'", task.title());

        scheduler.spawn_all(task_id, task.start());
        self.draw_active(task)?;

        while !task.is_done() {
            let wake = tokio::select! {
                input = self.source.next_event() => Wake::Input(input?),
                Some(envelope) = receiver.recv() => Wake::Scheduled(envelope),
            };

            let event = match wake {
                Wake::Input(InputEvent::Key(key)) => Event::Key(key),
                Wake::Input(InputEvent::Resize(width)) => {
                    self.width = width;
                    self.draw_active(task)?;
                    continue;
                }
                Wake::Scheduled(envelope) if envelope.task != task_id => {
                    log::debug!("Dropping event for stale task {}", envelope.task);
                    continue;
                }
                Wake::Scheduled(envelope) => envelope.event,
            };

            let transition = task.handle_event(event);
            let done = transition.is_done();
            scheduler.spawn_all(task_id, transition.commands);
            scheduler.cleanup_finished();

            if !done {
                self.draw_active(task)?;
            }
        }

        log::debug!("Task '{}' done, aborting {} pending job(s)", task.title(), scheduler.job_count());
        scheduler.cancel_all();
        let ctx = RenderContext::new(self.renderer.as_ref(), self.locale.as_ref());
        self.screen.finish(&task.render_final(self.width, &ctx))?;
        Ok(task.result().clone())
    }

    /// Run `tasks` in order, stopping after the first one whose result asks
    /// the queue to halt.
    pub async fn run_queue(&mut self, tasks: &mut [Box<dyn Task>]) -> anyhow::Result<Vec<TaskResult>> {
        let mut results = Vec::with_capacity(tasks.len());
        for task in tasks.iter_mut() {
            let result = self.run(task.as_mut()).await?;
            let halt = result.has_error() && result.stop_on_error;
            results.push(result);
            if halt {
                log::warn!("Queue halted after task '{}'", task.title());
                break;
            }
        }
        Ok(results)
    }

    fn draw_active(&mut self, task: &dyn Task) -> anyhow::Result<()> {
        let ctx = RenderContext::new(self.renderer.as_ref(), self.locale.as_ref());
        let text = task.render_active(self.width, &ctx);
        self.screen.draw(&text)
    }
}
