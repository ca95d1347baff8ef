#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    pub id: u32,
    pub text: &'static str,
    pub options: &'static [&'static str],
    pub correct_answer: &'static str,
    pub explanation: &'static str,
}

impl QuizQuestion {
    #[must_use]
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}

/// What the learner submitted for one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizAnswer {
    pub question_id: u32,
    pub selected: Option<String>,
    pub correct: bool,
}

#[must_use]
pub fn quiz_questions() -> Vec<QuizQuestion> {
    vec![
        QuizQuestion {
            id: 1,
            text: "What is the powerhouse of the cell?",
            options: &["Nucleus", "Mitochondria", "Endoplasmic Reticulum", "Golgi Apparatus"],
            correct_answer: "Mitochondria",
            explanation: "Mitochondria are known as the powerhouse of the cell because they generate most of the cell's supply of ATP, used as a source of chemical energy.",
        },
        QuizQuestion {
            id: 2,
            text: "Which gas do plants absorb from the atmosphere?",
            options: &["Oxygen", "Carbon Dioxide", "Nitrogen", "Hydrogen"],
            correct_answer: "Carbon Dioxide",
            explanation: "Plants absorb carbon dioxide from the atmosphere during photosynthesis to produce glucose and oxygen.",
        },
        QuizQuestion {
            id: 3,
            text: "What is the chemical symbol for water?",
            options: &["H2O", "CO2", "NaCl", "O2"],
            correct_answer: "H2O",
            explanation: "H2O is the chemical formula for water, consisting of two hydrogen atoms and one oxygen atom.",
        },
        QuizQuestion {
            id: 4,
            text: "Which of the following is NOT a type of blood cell?",
            options: &["Red blood cell", "White blood cell", "Platelet", "Hepatocyte"],
            correct_answer: "Hepatocyte",
            explanation: "Hepatocytes are liver cells, not blood cells. The three types of blood cells are red blood cells, white blood cells, and platelets.",
        },
        QuizQuestion {
            id: 5,
            text: "What is the largest organ in the human body?",
            options: &["Heart", "Liver", "Skin", "Brain"],
            correct_answer: "Skin",
            explanation: "The skin is the largest organ in the human body, covering approximately 20 square feet for an average adult.",
        },
        QuizQuestion {
            id: 6,
            text: "What is the primary function of insulin in the body?",
            options: &[
                "Increase blood glucose",
                "Decrease blood glucose",
                "Increase protein synthesis",
                "Break down fats",
            ],
            correct_answer: "Decrease blood glucose",
            explanation: "Insulin is a hormone that allows cells to absorb glucose from the bloodstream, thereby decreasing blood glucose levels.",
        },
        QuizQuestion {
            id: 7,
            text: "Which of the following is not a base in DNA?",
            options: &["Adenine", "Uracil", "Guanine", "Cytosine"],
            correct_answer: "Uracil",
            explanation: "Uracil is a base found in RNA, not DNA. The four bases in DNA are Adenine, Thymine, Guanine, and Cytosine.",
        },
        QuizQuestion {
            id: 8,
            text: "What is the main function of the kidneys?",
            options: &["Filter blood", "Produce hormones", "Store waste", "Digest food"],
            correct_answer: "Filter blood",
            explanation: "The primary function of the kidneys is to filter blood, removing waste and excess substances that are then excreted as urine.",
        },
        QuizQuestion {
            id: 9,
            text: "What is the process by which plants make their own food called?",
            options: &["Respiration", "Photosynthesis", "Fermentation", "Digestion"],
            correct_answer: "Photosynthesis",
            explanation: "Photosynthesis is the process by which green plants and some other organisms use sunlight to synthesize foods with carbon dioxide and water.",
        },
        QuizQuestion {
            id: 10,
            text: "Which vitamin is produced when the skin is exposed to sunlight?",
            options: &["Vitamin A", "Vitamin C", "Vitamin D", "Vitamin E"],
            correct_answer: "Vitamin D",
            explanation: "When skin is exposed to sunlight, it produces vitamin D, which is essential for calcium absorption and bone health.",
        },
    ]
}

/// A run through the practice quiz.
///
/// Score only counts the first submission for each question, so stepping
/// back with [`QuizSession::revisit`] and answering again never inflates it.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    current: usize,
    pending: Option<String>,
    show_explanation: bool,
    answers: Vec<Option<QuizAnswer>>,
    score: u32,
    completed: bool,
}

impl QuizSession {
    #[must_use]
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        let answers = vec![None; questions.len()];
        Self {
            completed: questions.is_empty(),
            questions,
            current: 0,
            pending: None,
            show_explanation: false,
            answers,
            score: 0,
        }
    }

    #[must_use]
    pub fn standard() -> Self {
        Self::new(quiz_questions())
    }

    pub fn select(&mut self, answer: impl Into<String>) {
        if !self.completed {
            self.pending = Some(answer.into());
        }
    }

    pub fn toggle_explanation(&mut self) {
        self.show_explanation = !self.show_explanation;
    }

    /// Record the pending answer and advance. Returns `true` once the quiz is complete.
    pub fn next(&mut self) -> bool {
        if self.completed {
            return true;
        }
        let Some(question) = self.questions.get(self.current) else {
            self.completed = true;
            return true;
        };
        let selected = self.pending.take();
        let correct = selected.as_deref().is_some_and(|a| question.is_correct(a));
        let first_attempt = self.answers[self.current].is_none();
        if correct && first_attempt {
            self.score += 1;
        }
        self.answers[self.current] = Some(QuizAnswer {
            question_id: question.id,
            selected,
            correct,
        });
        self.show_explanation = false;

        if self.current + 1 < self.questions.len() {
            self.current += 1;
        } else {
            self.completed = true;
        }
        self.completed
    }

    /// Jump back to an earlier question before finishing.
    pub fn revisit(&mut self, index: usize) {
        if !self.completed && index < self.questions.len() {
            self.current = index;
            self.pending = None;
            self.show_explanation = false;
        }
    }

    pub fn restart(&mut self) {
        *self = Self::new(std::mem::take(&mut self.questions));
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        if self.completed {
            return None;
        }
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    #[must_use]
    pub fn explanation_visible(&self) -> bool {
        self.show_explanation
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        u32::try_from(self.questions.len()).unwrap_or(u32::MAX)
    }

    /// Rounded share of correct answers, 0 for an empty quiz.
    #[must_use]
    pub fn percent(&self) -> u32 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        (self.score * 100 + total / 2) / total
    }

    /// Questions paired with what was submitted, for the review screen.
    pub fn review(&self) -> impl Iterator<Item = (&QuizQuestion, Option<&QuizAnswer>)> {
        self.questions
            .iter()
            .zip(self.answers.iter().map(Option::as_ref))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_correct_scores_full_marks() {
        let mut session = QuizSession::standard();
        for q in quiz_questions() {
            session.select(q.correct_answer);
            session.next();
        }
        assert!(session.is_complete());
        assert_eq!(session.score(), 10);
        assert_eq!(session.percent(), 100);
    }

    #[test]
    fn skipped_questions_are_recorded_as_wrong() {
        let mut session = QuizSession::standard();
        session.next();
        let (question, answer) = session.review().next().unwrap();
        assert_eq!(question.id, 1);
        let answer = answer.unwrap();
        assert_eq!(answer.selected, None);
        assert!(!answer.correct);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn only_first_attempt_counts() {
        let mut session = QuizSession::standard();
        session.select("Nucleus");
        session.next();
        session.revisit(0);
        session.select("Mitochondria");
        session.next();
        assert_eq!(session.score(), 0);

        let mut session = QuizSession::standard();
        session.select("Mitochondria");
        session.next();
        session.revisit(0);
        session.select("Mitochondria");
        session.next();
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn percent_rounds_half_up() {
        let mut session = QuizSession::standard();
        for (i, q) in quiz_questions().into_iter().enumerate() {
            if i < 7 {
                session.select(q.correct_answer);
            }
            session.next();
        }
        assert_eq!(session.percent(), 70);

        let mut short = QuizSession::new(quiz_questions().into_iter().take(3).collect());
        short.select("Mitochondria");
        short.next();
        short.next();
        short.next();
        assert_eq!(short.percent(), 33);
    }

    #[test]
    fn explanation_resets_on_advance() {
        let mut session = QuizSession::standard();
        session.toggle_explanation();
        assert!(session.explanation_visible());
        session.next();
        assert!(!session.explanation_visible());
    }

    #[test]
    fn selections_ignored_after_completion() {
        let mut session = QuizSession::new(quiz_questions().into_iter().take(1).collect());
        assert!(session.next());
        session.select("Mitochondria");
        assert_eq!(session.pending(), None);
        assert!(session.current_question().is_none());
        session.restart();
        assert!(!session.is_complete());
        assert_eq!(session.total(), 1);
    }
}
