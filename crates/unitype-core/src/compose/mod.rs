// Unitype Composition
// Hex codepoint composition driven by the Ctrl+Shift+U gesture

mod handler;
mod machine;
mod session;

pub use handler::{ComposeHandler, KeyHandler, UnicodeSink};
pub use machine::{Composer, Outcome, ACTIVATION_KEY};
pub use session::{CompositionSession, Phase};
