mod engine;
mod repository;
mod state;
mod track;


pub use engine::{GraceOutlook, StreakTransitionEngine, TrackTransition};
pub use repository::StreakStateRepository;
pub use state::UserStreakState;
pub use track::{StreakKind, StreakTrack};
