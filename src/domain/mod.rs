pub mod headline;
pub mod state;

pub use headline::{Headline, HeadlinesResponse};
pub use state::ScreenState;
