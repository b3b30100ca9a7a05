pub mod answers;
pub mod question;
pub mod validation;

pub use answers::{
    load_answers_file, parse_answers_yaml, AnswerSet, Diet, Gender, RawAnswers, StressLevel, YesNo,
};
pub use question::{QuestionId, QuestionKind, QuestionSpec, QUESTIONS};
pub use validation::{answer_problems, missing_questions, validate_answers};
