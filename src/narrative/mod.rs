pub mod autofill;
pub mod client;
pub mod generator;
pub mod prompts;

pub use autofill::PersonaAutofill;
pub use client::{GeminiClient, TextGenerator};
pub use generator::{CrewLog, CrewMember, NarrativeGenerator, NarrativeResult};
