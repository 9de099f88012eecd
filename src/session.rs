use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::catalog::Unit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerStatus {
    Unanswered,
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonStage {
    /// Reading the unit's theory material.
    Theory,
    /// Working through exercise `index`.
    Practice {
        index: usize,
        selection: Option<usize>,
        status: AnswerStatus,
    },
    /// All exercises answered; waiting for the user to claim the result.
    Result { submitted: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("this action is not available at the current lesson stage")]
    WrongStage,
    #[error("option index out of range")]
    OptionOutOfRange,
    #[error("no option selected")]
    NothingSelected,
    #[error("answer is locked after checking")]
    AlreadyChecked,
    #[error("answer has not been checked yet")]
    NotChecked,
}

/// Per-exercise answer key captured when the lesson starts.
#[derive(Debug, Clone, Copy)]
struct AnswerKey {
    option_count: usize,
    correct: usize,
}

/// Emitted exactly once per lesson when the user claims their result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionEvent {
    pub unit_id: String,
    pub score: i64,
    pub total_exercises: i64,
}

/// Read-only copy of a live lesson, used for rendering.
#[derive(Debug, Clone)]
pub struct LessonSnapshot {
    pub unit_id: String,
    pub total_exercises: usize,
    pub score: u32,
    pub stage: LessonStage,
}

/// One user's walk through a unit: theory, then the exercises in order,
/// then a result screen. Holds only answer keys; exercise text is looked
/// up in the catalog at render time.
#[derive(Debug)]
pub struct LessonSession {
    unit_id: String,
    exercises: Vec<AnswerKey>,
    stage: LessonStage,
    score: u32,
}

impl LessonSession {
    pub fn start(unit: &Unit) -> Self {
        let exercises = unit
            .exercises
            .iter()
            .map(|e| AnswerKey {
                option_count: e.options.len(),
                correct: e.correct_answer,
            })
            .collect();
        Self {
            unit_id: unit.id.clone(),
            exercises,
            stage: LessonStage::Theory,
            score: 0,
        }
    }

    pub fn snapshot(&self) -> LessonSnapshot {
        LessonSnapshot {
            unit_id: self.unit_id.clone(),
            total_exercises: self.exercises.len(),
            score: self.score,
            stage: self.stage,
        }
    }

    pub fn begin_practice(&mut self) -> Result<(), SessionError> {
        if self.stage != LessonStage::Theory {
            return Err(SessionError::WrongStage);
        }
        self.stage = if self.exercises.is_empty() {
            LessonStage::Result { submitted: false }
        } else {
            LessonStage::Practice {
                index: 0,
                selection: None,
                status: AnswerStatus::Unanswered,
            }
        };
        Ok(())
    }

    /// Picks (or re-picks) an option for the current exercise. Rejected once
    /// the answer has been checked.
    pub fn select_option(&mut self, option: usize) -> Result<(), SessionError> {
        let LessonStage::Practice {
            index,
            selection,
            status,
        } = &mut self.stage
        else {
            return Err(SessionError::WrongStage);
        };
        if *status != AnswerStatus::Unanswered {
            return Err(SessionError::AlreadyChecked);
        }
        if option >= self.exercises[*index].option_count {
            return Err(SessionError::OptionOutOfRange);
        }
        *selection = Some(option);
        Ok(())
    }

    /// Grades the current selection and locks it in.
    pub fn check(&mut self) -> Result<AnswerStatus, SessionError> {
        let LessonStage::Practice {
            index,
            selection,
            status,
        } = &mut self.stage
        else {
            return Err(SessionError::WrongStage);
        };
        if *status != AnswerStatus::Unanswered {
            return Err(SessionError::AlreadyChecked);
        }
        let Some(selected) = *selection else {
            return Err(SessionError::NothingSelected);
        };

        let graded = if selected == self.exercises[*index].correct {
            self.score += 1;
            AnswerStatus::Correct
        } else {
            AnswerStatus::Incorrect
        };
        *status = graded;
        Ok(graded)
    }

    /// Moves to the next exercise, or to the result screen after the last
    /// one. Only valid once the current answer has been checked.
    pub fn advance(&mut self) -> Result<(), SessionError> {
        let (index, status) = match self.stage {
            LessonStage::Practice { index, status, .. } => (index, status),
            _ => return Err(SessionError::WrongStage),
        };
        if status == AnswerStatus::Unanswered {
            return Err(SessionError::NotChecked);
        }
        self.stage = if index + 1 < self.exercises.len() {
            LessonStage::Practice {
                index: index + 1,
                selection: None,
                status: AnswerStatus::Unanswered,
            }
        } else {
            LessonStage::Result { submitted: false }
        };
        Ok(())
    }

    /// Claims the lesson result. The first call returns the completion
    /// event; repeat calls return `Ok(None)` so a lesson can never pay out
    /// twice.
    pub fn submit(&mut self) -> Result<Option<CompletionEvent>, SessionError> {
        let LessonStage::Result { submitted } = &mut self.stage else {
            return Err(SessionError::WrongStage);
        };
        if *submitted {
            return Ok(None);
        }
        *submitted = true;
        Ok(Some(CompletionEvent {
            unit_id: self.unit_id.clone(),
            score: i64::from(self.score),
            total_exercises: self.exercises.len() as i64,
        }))
    }
}

/// Live lessons keyed by user id. Lessons are in-memory only: a restart
/// drops them, while claimed results live in the database.
#[derive(Clone, Default)]
pub struct LessonRegistry {
    sessions: Arc<RwLock<HashMap<i64, LessonSession>>>,
}

impl LessonRegistry {
    /// Starts a lesson for the user, replacing any lesson already in flight.
    pub async fn start(&self, user_id: i64, unit: &Unit) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(user_id, LessonSession::start(unit));
    }

    pub async fn snapshot(&self, user_id: i64) -> Option<LessonSnapshot> {
        let sessions = self.sessions.read().await;
        sessions.get(&user_id).map(LessonSession::snapshot)
    }

    /// Runs `op` against the user's live lesson under the write lock.
    /// Returns `None` when no lesson is in flight.
    pub async fn with_session<T>(
        &self,
        user_id: i64,
        op: impl FnOnce(&mut LessonSession) -> T,
    ) -> Option<T> {
        let mut sessions = self.sessions.write().await;
        sessions.get_mut(&user_id).map(op)
    }

    /// Claims the completion event and drops the session in one critical
    /// section, so concurrent submits observe at most one event.
    pub async fn take_completion(
        &self,
        user_id: i64,
    ) -> Option<Result<CompletionEvent, SessionError>> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&user_id)?;
        match session.submit() {
            Ok(Some(event)) => {
                sessions.remove(&user_id);
                Some(Ok(event))
            }
            // An earlier submit already claimed the event.
            Ok(None) => {
                sessions.remove(&user_id);
                None
            }
            Err(e) => Some(Err(e)),
        }
    }

    /// Drops the user's lesson without recording anything.
    pub async fn cancel(&self, user_id: i64) -> bool {
        let mut sessions = self.sessions.write().await;
        sessions.remove(&user_id).is_some()
    }
}
