//! In-memory question store.

use crate::models::{NewQuestion, Question};

/// Ordered collection of all questions, owned by the running process.
///
/// Insertion order is preserved and is the order used when the full set is
/// re-serialized after a write.
#[derive(Debug, Default)]
pub struct QuestionStore {
    questions: Vec<Question>,
}

impl QuestionStore {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn all(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Append a new question, assigning `qid = max(existing) + 1`
    /// (`1` on an empty store). Returns the stored question.
    pub fn append(&mut self, new: NewQuestion) -> Question {
        let qid = self.questions.iter().map(|q| q.qid).max().unwrap_or(0) + 1;
        let question = Question {
            qid,
            question: new.question,
            subject: new.subject,
            correct: new.correct,
            use_: new.use_,
            response_a: new.response_a.unwrap_or_default(),
            response_b: new.response_b.unwrap_or_default(),
            response_c: new.response_c.unwrap_or_default(),
            response_d: new.response_d.unwrap_or_default(),
        };
        self.questions.push(question.clone());
        question
    }
}
