pub mod app;
pub mod dispatcher;

pub use app::App;
pub use dispatcher::{run_batch, run_batch_with_progress, ProgressEvent};
