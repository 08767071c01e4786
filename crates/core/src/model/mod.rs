mod group;
mod ids;
mod review;
mod session;
mod word;

pub use ids::{GroupId, ParseIdError, ReviewId, SessionId, WordId};

pub use group::{Group, GroupDraft};
pub use review::{WordReviewItem, WordStats};
pub use session::StudySession;
pub use word::{Word, WordDraft};
