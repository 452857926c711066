pub mod controller;
pub mod driver;
pub mod error;
pub mod lobby;
pub mod push;
pub mod render;
pub mod session;
pub mod teardown;
pub mod transport;

pub use controller::{Action, Completion, SessionController};
pub use driver::{finish_teardown, SessionCommand, SessionDriver};
pub use lobby::{join_lobby, JoinOutcome};
pub use push::{connect_push_channel, PushEvent};
pub use render::{Field, Renderer};
pub use session::Session;
pub use transport::{HttpTransport, Transport};

#[cfg(test)]
mod tests;
