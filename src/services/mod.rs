pub mod csv_writer;
pub mod llm_service;

pub use csv_writer::{enhanced_output_path, write_csv};
pub use llm_service::{build_prompt, IcebreakerFields, IcebreakerService};
