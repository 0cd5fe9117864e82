//! Password strength - external engine wrapper, tier classification, quantum adjustment

pub mod classifier;
pub mod engine;
pub mod quantum;

pub use classifier::StrengthClassifier;
pub use engine::{StrengthEngine, StrengthEstimate, ZxcvbnEngine};
pub use quantum::{adjust, format_duration, DEFAULT_QUANTUM_EXPONENT};
