use serde::Serialize;

use crate::filter::Filters;
use crate::models::{Member, MemberField, Participant, ParticipantField, Score};

/// Offset/size window over a listing, narrowed by `filters`.
#[derive(Debug, Clone, Default)]
pub struct ListInput {
    pub filters: Filters,
    pub offset: u32,
    pub size: u32,
}

impl ListInput {
    pub fn new(offset: u32, size: u32) -> Self {
        Self {
            filters: Filters::new(),
            offset,
            size,
        }
    }

    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("offset".to_string(), self.offset.to_string()),
            ("size".to_string(), self.size.to_string()),
        ];
        query.extend(self.filters.to_query());
        query
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignParticipantInput<'a> {
    pub participant: &'a Participant,
}

/// Partial participant update; the service applies only the fields in `patch`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UpdateParticipantInput {
    pub patch: Vec<ParticipantField>,
    pub participant: Participant,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportScoreInput<'a> {
    pub scores: &'a [Score],
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateMemberInput<'a> {
    pub member: &'a Member,
}

/// Partial member update; the service applies only the fields in `patch`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UpdateMemberInput {
    pub patch: Vec<MemberField>,
    pub member: Member,
}
