//! Task records and their validated field types.
//!
//! A [`Task`] always has exactly one owner, fixed at creation. Partial updates
//! are modelled by [`TaskPatch`], where `None` means "leave unchanged".

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Maximum number of characters in a task title.
pub const TITLE_MAX: usize = 200;
/// Maximum number of characters in a task description.
pub const DESCRIPTION_MAX: usize = 1000;

/// Validation errors for task fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskValidationError {
    /// Title was blank once trimmed.
    #[error("title must not be empty")]
    EmptyTitle,
    /// Title exceeds [`TITLE_MAX`].
    #[error("title must be at most {max} characters")]
    TitleTooLong {
        /// Maximum number of characters.
        max: usize,
    },
    /// Description exceeds [`DESCRIPTION_MAX`].
    #[error("description must be at most {max} characters")]
    DescriptionTooLong {
        /// Maximum number of characters.
        max: usize,
    },
}

impl TaskValidationError {
    /// Name of the offending payload field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle | Self::TitleTooLong { .. } => "title",
            Self::DescriptionTooLong { .. } => "description",
        }
    }

    /// Stable machine-readable code for the violation.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "empty_title",
            Self::TitleTooLong { .. } => "title_too_long",
            Self::DescriptionTooLong { .. } => "description_too_long",
        }
    }
}

/// Task identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse a path segment; `None` when it is not a UUID.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok().map(Self)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-empty, trimmed title of at most [`TITLE_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Trim and validate a title.
    ///
    /// # Examples
    /// ```
    /// use taskdeck::domain::TaskTitle;
    ///
    /// assert_eq!(TaskTitle::new("  Buy milk ").unwrap().as_ref(), "Buy milk");
    /// assert!(TaskTitle::new("").is_err());
    /// assert!(TaskTitle::new("x".repeat(201)).is_err());
    /// ```
    pub fn new(title: impl AsRef<str>) -> Result<Self, TaskValidationError> {
        let trimmed = title.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        if trimmed.chars().count() > TITLE_MAX {
            return Err(TaskValidationError::TitleTooLong { max: TITLE_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<TaskTitle> for String {
    fn from(value: TaskTitle) -> Self {
        value.0
    }
}

impl TryFrom<String> for TaskTitle {
    type Error = TaskValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Trimmed description of at most [`DESCRIPTION_MAX`] characters; may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskDescription(String);

impl TaskDescription {
    /// Trim and validate a description.
    pub fn new(description: impl AsRef<str>) -> Result<Self, TaskValidationError> {
        let trimmed = description.as_ref().trim();
        if trimmed.chars().count() > DESCRIPTION_MAX {
            return Err(TaskValidationError::DescriptionTooLong {
                max: DESCRIPTION_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for TaskDescription {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<TaskDescription> for String {
    fn from(value: TaskDescription) -> Self {
        value.0
    }
}

impl TryFrom<String> for TaskDescription {
    type Error = TaskValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Persisted task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    #[serde(skip)]
    owner: UserId,
    title: TaskTitle,
    description: TaskDescription,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Field bundle used to rebuild a [`Task`] from storage.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    /// Task identifier.
    pub id: TaskId,
    /// Owning identity.
    pub owner: UserId,
    /// Validated title.
    pub title: TaskTitle,
    /// Validated description.
    pub description: TaskDescription,
    /// Completion flag.
    pub completed: bool,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last modification instant.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Start a new, incomplete task owned by `owner`.
    pub fn create(
        owner: UserId,
        title: TaskTitle,
        description: TaskDescription,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TaskId::random(),
            owner,
            title,
            description,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a task from stored fields.
    pub fn from_draft(draft: TaskDraft) -> Self {
        let TaskDraft {
            id,
            owner,
            title,
            description,
            completed,
            created_at,
            updated_at,
        } = draft;
        Self {
            id,
            owner,
            title,
            description,
            completed,
            created_at,
            updated_at,
        }
    }

    /// Apply the fields present in `patch` and bump `updated_at`.
    pub fn apply(&mut self, patch: &TaskPatch, now: DateTime<Utc>) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        self.updated_at = now;
    }

    /// Task identifier.
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Owning identity. Never serialised.
    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Task title.
    pub fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Task description.
    pub fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Whether the task is done.
    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Creation instant.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification instant.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Validated input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: TaskTitle,
    description: TaskDescription,
}

impl NewTask {
    /// Validate raw creation input; a missing description becomes `""`.
    pub fn try_from_parts(
        title: &str,
        description: Option<&str>,
    ) -> Result<Self, TaskValidationError> {
        let title = TaskTitle::new(title)?;
        let description = description
            .map(TaskDescription::new)
            .transpose()?
            .unwrap_or_default();
        Ok(Self { title, description })
    }

    /// Validated title.
    pub fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Validated description.
    pub fn description(&self) -> &TaskDescription {
        &self.description
    }
}

/// Partial update; each `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// Replacement title.
    pub title: Option<TaskTitle>,
    /// Replacement description.
    pub description: Option<TaskDescription>,
    /// Replacement completion flag.
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Validate each present field against the creation rules.
    pub fn try_from_parts(
        title: Option<&str>,
        description: Option<&str>,
        completed: Option<bool>,
    ) -> Result<Self, TaskValidationError> {
        Ok(Self {
            title: title.map(TaskTitle::new).transpose()?,
            description: description.map(TaskDescription::new).transpose()?,
            completed,
        })
    }

    /// True when no field is present.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}
