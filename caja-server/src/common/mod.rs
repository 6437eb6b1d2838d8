//! Cross-cutting infrastructure shared by the server modules

pub mod logger;
