//! Prompt-driven generators
//!
//! Each generator formats one prompt, performs exactly one gateway call and
//! returns the generated text or the gateway error:
//! - XML mappings: JSON-to-XML transformation snippets
//! - Code rewrites: fill a `<FILL_ME>` hole in a code fragment
//! - Scripts: complete Deluge scripts
//! - Actions: workflow action objects, or explanatory text
//! - Document analysis: free-form analysis of an uploaded file
//!
//! # Example
//! ```no_run
//! use apiflow_llm::{MockProvider, ScriptGenerator};
//! use std::sync::Arc;
//!
//! # async fn example() -> apiflow_llm::Result<()> {
//! let provider = Arc::new(MockProvider::new());
//! let generator = ScriptGenerator::with_defaults(provider);
//!
//! let script = generator.generate("count working days in the current month", None).await?;
//! println!("{}", script);
//! # Ok(())
//! # }
//! ```

pub mod action_generator;
pub mod code_rewrite_generator;
pub mod config;
pub mod document_analyzer;
pub mod json_extractor;
pub mod prompt_templates;
pub mod script_generator;
pub mod xml_mapping_generator;

// Re-export main types
pub use action_generator::{ActionGenerator, ActionOutcome};
pub use code_rewrite_generator::CodeRewriteGenerator;
pub use config::{GeneratorConfig, DEFAULT_MODEL};
pub use document_analyzer::DocumentAnalyzer;
pub use json_extractor::{extract_json_object, strip_code_fences};
pub use prompt_templates::fill_template;
pub use script_generator::ScriptGenerator;
pub use xml_mapping_generator::XmlMappingGenerator;
