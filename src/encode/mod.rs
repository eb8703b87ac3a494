pub mod gif;

pub use gif::GifRecorder;
