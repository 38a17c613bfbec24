//! # symcheck-engine
//!
//! Domain layer of the symcheck symptom checker: dataset loading, sentence
//! rendering, prompt assembly, the one-shot corpus build, and the reusable
//! [`AnswerEngine`].
//!
//! The pipeline is prepare-once, answer-many-times:
//!
//! ```text
//! dataset file -> sentences -> chunks -> vectors -> index   (build, once)
//! symptoms -> prompt -> retrieved chunks -> chat model -> advice   (per request)
//! ```

pub mod dataset;
pub mod engine;
pub mod error;
pub mod prompt;

pub use dataset::{CaseRecord, REQUIRED_COLUMNS, load_cases, render_sentence, to_documents};
pub use engine::{AnswerEngine, EngineBuilder};
pub use error::{EngineError, Result};
pub use prompt::{ADVICE_TEMPLATE, build_context, build_prompt};
