pub mod batch;
pub mod loaders;
pub mod model_catalog;

pub use batch::{BatchResult, Outcome, OutcomeStatus, WorkItem};
pub use loaders::audio_loader::load_audio_files;
pub use model_catalog::resolve_model_id;
