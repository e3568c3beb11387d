pub mod audio_loader;

pub use audio_loader::load_audio_files;
