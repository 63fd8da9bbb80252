pub mod contest;
pub mod member;
pub mod page;
pub mod participant;
pub mod score;
pub mod space;
pub mod submission;
pub mod user;

pub use contest::{Contest, Problem};
pub use member::{
    Attribute, AttributeType, AttributeValue, Ghost, Identity, Member, MemberField, Value,
};
pub use page::Page;
pub use participant::{Medal, Participant, ParticipantField};
pub use score::{Score, ScoreMode, ScoreProblem};
pub use space::Space;
pub use submission::{Submission, SubmissionStatus, Verdict};
pub use user::User;
