pub mod persona;

pub use persona::{Persona, PersonaDraft, PersonaField};
