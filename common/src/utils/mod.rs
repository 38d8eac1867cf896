pub mod config;
pub mod filename;
pub mod template_engine;
pub mod text_extraction;
