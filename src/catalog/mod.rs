// Option catalog — hierarchical hardening options and their session store

mod active;
mod defaults;
mod store;
mod types;

pub use active::{ActiveOption, ActiveOptionSet, SectionSpec, AD_HOC_ID};
pub use defaults::{default_catalog, load_defs_from_file};
pub use store::CatalogStore;
pub use types::{HardeningOption, OptionDef, PromptRefinement};
