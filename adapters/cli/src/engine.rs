use std::mem;

use ricochet_core::{Command, Event};
use ricochet_system_countdown::{Config as CountdownConfig, Countdown};
use ricochet_world::{self as world, World};

/// Owns the world and the countdown, and pumps commands through both until
/// no system has anything left to say.
#[derive(Debug)]
pub(crate) struct Engine {
    world: World,
    countdown: Countdown,
}

impl Engine {
    pub(crate) fn new(world: World, countdown: CountdownConfig) -> Self {
        Self {
            world,
            countdown: Countdown::new(countdown),
        }
    }

    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    /// Applies `command` and every command the countdown derives from the
    /// resulting events, returning all events in order.
    pub(crate) fn submit(&mut self, command: Command) -> Vec<Event> {
        let mut pending = vec![command];
        let mut derived = Vec::new();
        let mut events = Vec::new();
        let mut emitted = Vec::new();

        while !pending.is_empty() {
            for command in pending.drain(..) {
                world::apply(&mut self.world, command, &mut events);
            }
            self.countdown.handle(&events, &mut derived);
            emitted.append(&mut events);
            mem::swap(&mut pending, &mut derived);
        }

        emitted
    }
}
