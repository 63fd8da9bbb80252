//! Typed access to the remote judging platform: spaces, contests, participants,
//! members, scores and submissions.

pub mod client;
pub mod error;
pub mod filter;
pub mod models;
pub mod requests;
pub mod service;

pub use client::{
    CommunityClient, HttpClient, JudgeClient, PlatformConfig, UniverseClient, UsersClient,
};
pub use error::{PlatformError, Result};
pub use filter::{Comparator, Expression, Filters, Predicate};
pub use models::*;
pub use requests::{
    AssignParticipantInput, CreateMemberInput, ImportScoreInput, ListInput, UpdateMemberInput,
    UpdateParticipantInput,
};
pub use service::{JudgeService, MemberService, UniverseService, UserService};
