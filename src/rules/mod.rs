//! Role-specific utterance rules.
//!
//! - `validator`: the pure classification entry point
//! - `patterns`: the forbidden-question categories

pub mod patterns;
pub mod validator;

pub use patterns::{check_question, ContentRule};
pub use validator::{
    classify, FormatError, ParsedUtterance, Verdict, ACCEPTED_ANSWERS, GUESS_PREFIX,
    QUESTION_PREFIX,
};
