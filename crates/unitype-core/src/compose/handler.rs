// Unitype Key Handler
// The interface an event source drives, and the sink commits flow into

use crate::{Action, Key};

use super::machine::{Composer, Outcome};

/// Receives composed characters.
///
/// Called synchronously, at most once per key event. Delivery is fire and
/// forget: implementations report their own failures.
pub trait UnicodeSink {
    fn commit(&mut self, codepoint: u32);
}

impl UnicodeSink for Vec<u32> {
    fn commit(&mut self, codepoint: u32) {
        self.push(codepoint);
    }
}

impl<S: UnicodeSink + ?Sized> UnicodeSink for &mut S {
    fn commit(&mut self, codepoint: u32) {
        (**self).commit(codepoint);
    }
}

/// Something that sees every key transition before the rest of the system.
///
/// Each method returns `true` when the event must be hidden from every other
/// consumer, `false` when it must pass through unmodified. Calls must arrive
/// one at a time, in the order the keys moved.
pub trait KeyHandler {
    fn on_key_down(&mut self, key: Key) -> bool;

    fn on_key_up(&mut self, key: Key) -> bool;

    /// Dispatch an evdev-style action; autorepeat counts as a key-down
    fn handle(&mut self, key: Key, action: Action) -> bool {
        if action.is_pressed() {
            self.on_key_down(key)
        } else {
            self.on_key_up(key)
        }
    }
}

/// A [`Composer`] wired to the sink its commits go to.
#[derive(Debug)]
pub struct ComposeHandler<S> {
    composer: Composer,
    sink: S,
}

impl<S: UnicodeSink> ComposeHandler<S> {
    pub fn new(composer: Composer, sink: S) -> Self {
        Self { composer, sink }
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Access the sink, e.g. to forward passed-through events through it
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn apply(&mut self, outcome: Outcome) -> bool {
        if let Some(codepoint) = outcome.commit {
            self.sink.commit(codepoint);
        }
        outcome.consumed
    }
}

impl<S: UnicodeSink> KeyHandler for ComposeHandler<S> {
    fn on_key_down(&mut self, key: Key) -> bool {
        let outcome = self.composer.key_down(key);
        self.apply(outcome)
    }

    fn on_key_up(&mut self, key: Key) -> bool {
        let outcome = self.composer.key_up(key);
        self.apply(outcome)
    }
}
