//! Poll aggregate and its public projection.
//!
//! A [`Poll`] owns a fixed, ordered list of option labels and a vote vector
//! kept positionally parallel to it. Only the vote counts and the `closed`
//! flag change after creation; both changes go through methods on this type
//! so the invariants below cannot be broken from outside the module:
//!
//! - `votes.len() == options.len()` at all times.
//! - `votes[i]` never decreases.
//! - `closed` flips from `false` to `true` at most once.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Minimum number of options a poll must offer.
pub const MIN_POLL_OPTIONS: usize = 2;

/// Validation failures for poll input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollValidationError {
    #[error("question must not be empty")]
    EmptyQuestion,
    #[error("a poll needs at least {min} options, got {actual}")]
    TooFewOptions { min: usize, actual: usize },
    #[error("option {index} must not be blank")]
    BlankOption { index: usize },
    #[error("option index {index} is out of range for {option_count} options")]
    OptionOutOfRange { index: usize, option_count: usize },
}

impl PollValidationError {
    /// Stable machine-readable reason, shared by every adapter.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmptyQuestion => "empty_question",
            Self::TooFewOptions { .. } => "too_few_options",
            Self::BlankOption { .. } => "blank_option",
            Self::OptionOutOfRange { .. } => "option_out_of_range",
        }
    }

    /// Request field the failure refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyQuestion => "question",
            Self::TooFewOptions { .. } | Self::BlankOption { .. } => "options",
            Self::OptionOutOfRange { .. } => "optionIndex",
        }
    }
}

/// Opaque poll identifier.
///
/// Serialised as a bare UUID string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PollId(Uuid);

impl PollId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for PollId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PollId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Unvalidated poll input as supplied by a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollDraft {
    pub question: String,
    pub options: Vec<String>,
}

impl PollDraft {
    /// Build a draft from borrowed parts.
    ///
    /// # Examples
    /// ```
    /// use quickpoll::domain::PollDraft;
    ///
    /// let draft = PollDraft::new("Best color?", ["Red", "Blue"]);
    /// assert_eq!(draft.options.len(), 2);
    /// ```
    pub fn new<I, S>(question: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            question: question.into(),
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    /// Check the draft against the poll creation rules.
    ///
    /// The question only has to be non-empty. Labels are kept exactly as
    /// supplied; surrounding whitespace only matters for deciding whether a
    /// label is blank.
    pub fn validate(&self) -> Result<(), PollValidationError> {
        if self.question.is_empty() {
            return Err(PollValidationError::EmptyQuestion);
        }
        if self.options.len() < MIN_POLL_OPTIONS {
            return Err(PollValidationError::TooFewOptions {
                min: MIN_POLL_OPTIONS,
                actual: self.options.len(),
            });
        }
        if let Some(index) = self
            .options
            .iter()
            .position(|option| option.trim().is_empty())
        {
            return Err(PollValidationError::BlankOption { index });
        }
        Ok(())
    }
}

/// Full poll record, including results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Poll {
    id: PollId,
    question: String,
    options: Vec<String>,
    votes: Vec<u64>,
    created_at: DateTime<Utc>,
    closed: bool,
}

impl Poll {
    /// Validate a draft and open a new poll with zeroed results.
    pub fn open(
        id: PollId,
        draft: PollDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Self, PollValidationError> {
        draft.validate()?;
        let PollDraft { question, options } = draft;
        let votes = vec![0; options.len()];
        Ok(Self {
            id,
            question,
            options,
            votes,
            created_at,
            closed: false,
        })
    }

    #[must_use]
    pub const fn id(&self) -> PollId {
        self.id
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Vote counts, positionally parallel to [`Poll::options`].
    #[must_use]
    pub fn votes(&self) -> &[u64] {
        &self.votes
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Add one ballot for `option_index`.
    ///
    /// Callers must reject closed polls first; this only guards the index.
    pub(crate) fn record_vote(&mut self, option_index: usize) -> Result<(), PollValidationError> {
        let option_count = self.options.len();
        let slot = self.votes.get_mut(option_index).ok_or(
            PollValidationError::OptionOutOfRange {
                index: option_index,
                option_count,
            },
        )?;
        *slot = slot.saturating_add(1);
        Ok(())
    }

    /// Close the poll. Returns `true` only on the open-to-closed transition.
    pub(crate) fn close(&mut self) -> bool {
        let transitioned = !self.closed;
        self.closed = true;
        transitioned
    }

    /// Project the poll without its results.
    #[must_use]
    pub fn summary(&self) -> PollSummary {
        PollSummary {
            id: self.id,
            question: self.question.clone(),
            options: self.options.clone(),
            created_at: self.created_at,
            closed: self.closed,
        }
    }
}

/// Public view of a poll: every field except the vote counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollSummary {
    pub id: PollId,
    pub question: String,
    pub options: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub closed: bool,
}
