//! Listing filters. A filter is an explicit list of typed predicates, each
//! binding one field to a comparator and a value, encoded as query parameters
//! of the form `filters[<field>][<comparator>]=<value>`.

use crate::models::SubmissionStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Equal,
    NotEqual,
}

impl Comparator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "eq",
            Self::NotEqual => "neq",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression<T> {
    pub comparator: Comparator,
    pub value: T,
}

impl<T> Expression<T> {
    pub fn new(comparator: Comparator, value: T) -> Self {
        Self { comparator, value }
    }

    pub fn equal(value: T) -> Self {
        Self::new(Comparator::Equal, value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    ProblemId(Expression<String>),
    ParticipantId(Expression<String>),
    MemberId(Expression<String>),
    Name(Expression<String>),
    Username(Expression<String>),
    Status(Expression<SubmissionStatus>),
}

impl Predicate {
    pub fn field(&self) -> &'static str {
        match self {
            Self::ProblemId(_) => "problem_id",
            Self::ParticipantId(_) => "participant_id",
            Self::MemberId(_) => "member_id",
            Self::Name(_) => "name",
            Self::Username(_) => "username",
            Self::Status(_) => "status",
        }
    }

    fn comparator(&self) -> Comparator {
        match self {
            Self::ProblemId(e)
            | Self::ParticipantId(e)
            | Self::MemberId(e)
            | Self::Name(e)
            | Self::Username(e) => e.comparator,
            Self::Status(e) => e.comparator,
        }
    }

    fn value(&self) -> String {
        match self {
            Self::ProblemId(e)
            | Self::ParticipantId(e)
            | Self::MemberId(e)
            | Self::Name(e)
            | Self::Username(e) => e.value.clone(),
            Self::Status(e) => e.value.as_str().to_string(),
        }
    }

    pub fn to_query_pair(&self) -> (String, String) {
        (
            format!("filters[{}][{}]", self.field(), self.comparator().as_str()),
            self.value(),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    predicates: Vec<Predicate>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn name_equals(self, name: impl Into<String>) -> Self {
        self.with(Predicate::Name(Expression::equal(name.into())))
    }

    pub fn member_id_equals(self, member_id: impl Into<String>) -> Self {
        self.with(Predicate::MemberId(Expression::equal(member_id.into())))
    }

    pub fn username_equals(self, username: impl Into<String>) -> Self {
        self.with(Predicate::Username(Expression::equal(username.into())))
    }

    pub fn problem_id_equals(self, problem_id: impl Into<String>) -> Self {
        self.with(Predicate::ProblemId(Expression::equal(problem_id.into())))
    }

    pub fn participant_id_equals(self, participant_id: impl Into<String>) -> Self {
        self.with(Predicate::ParticipantId(Expression::equal(
            participant_id.into(),
        )))
    }

    pub fn status_equals(self, status: SubmissionStatus) -> Self {
        self.with(Predicate::Status(Expression::equal(status)))
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn to_query(&self) -> Vec<(String, String)> {
        self.predicates.iter().map(Predicate::to_query_pair).collect()
    }
}
