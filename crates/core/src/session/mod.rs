//! Human-versus-engine play
//!
//! A [`GameSession`] drives one game: it validates the human's moves, asks
//! the search engine for replies, checks for the end of the game after every
//! ply and runs the shared countdown clock.

mod clock;
mod game;
mod snapshot;
mod state;

pub use clock::Countdown;
pub use game::GameSession;
pub use snapshot::SessionSnapshot;
pub use state::{PendingReply, ReplyDisposition, SessionOutcome, SessionState, TurnReport};
