use std::cell::RefCell;
use std::rc::Rc;

use square_engine::input::Event;
use square_engine::scene::{Ctx, Object};

/// Shared call log.
#[derive(Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<String>>>);

impl CallLog {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.borrow_mut().push(entry.into());
    }

    /// Returns and clears everything logged so far.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

/// Object that logs its name for every hook; consumes events when `consume` is set.
pub struct Named {
    pub name: &'static str,
    pub log: CallLog,
    pub consume: bool,
}

impl Named {
    pub fn new(name: &'static str, log: &CallLog) -> Self {
        Self {
            name,
            log: log.clone(),
            consume: false,
        }
    }

    pub fn consuming(mut self) -> Self {
        self.consume = true;
        self
    }
}

impl Object for Named {
    fn on_enter(&mut self, _ctx: &mut Ctx<'_>) -> anyhow::Result<()> {
        self.log.push(format!("enter {}", self.name));
        Ok(())
    }

    fn on_exit(&mut self, _ctx: &mut Ctx<'_>) {
        self.log.push(format!("exit {}", self.name));
    }

    fn update(&mut self, _dt: f32, _ctx: &mut Ctx<'_>) {
        self.log.push(format!("update {}", self.name));
    }

    fn render(&mut self, _dt: f32, _ctx: &mut Ctx<'_>) {
        self.log.push(format!("render {}", self.name));
    }

    fn on_event(&mut self, _event: &Event, _ctx: &mut Ctx<'_>) -> bool {
        self.log.push(format!("event {}", self.name));
        self.consume
    }
}
