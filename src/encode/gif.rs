use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};

use crate::canvas::Canvas;
use crate::foundation::error::{FizzError, FizzResult};

fn ensure_gif_extension(path: &Path) -> PathBuf {
    let has_ext = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gif"));
    if has_ext {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_owned();
        name.push(".gif");
        PathBuf::from(name)
    }
}

/// Accumulates rendered frames and encodes them as a looping animated GIF.
///
/// Every frame gets the same delay, `1/framerate` seconds.
#[derive(Debug, Default)]
pub struct GifRecorder {
    frames: Vec<RgbaImage>,
}

impl GifRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the canvas's current render as the next frame.
    pub fn add(&mut self, canvas: &Canvas) -> FizzResult<()> {
        self.frames.push(canvas.render()?);
        Ok(())
    }

    /// Append an already rendered frame.
    pub fn add_frame(&mut self, frame: RgbaImage) {
        self.frames.push(frame);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Encode all captured frames into `writer` at `framerate` frames per
    /// second.
    pub fn write_to<W: Write>(&self, writer: W, framerate: u32) -> FizzResult<()> {
        if self.frames.is_empty() {
            return Err(FizzError::encode("no frames captured"));
        }
        let framerate = framerate.max(1);
        let delay = Delay::from_numer_denom_ms(1000, framerate);
        let mut encoder = GifEncoder::new(writer);
        encoder.set_repeat(Repeat::Infinite)?;
        for frame in &self.frames {
            encoder.encode_frame(Frame::from_parts(frame.clone(), 0, 0, delay))?;
        }
        Ok(())
    }

    /// Encode to a file, appending the `.gif` extension when absent.
    pub fn save(&self, path: impl AsRef<Path>, framerate: u32) -> FizzResult<()> {
        let path = ensure_gif_extension(path.as_ref());
        tracing::debug!(path = %path.display(), frames = self.frames.len(), framerate, "encoding gif");
        let file = File::create(&path)?;
        self.write_to(BufWriter::new(file), framerate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::color::Rgba;

    #[test]
    fn extension_is_appended_when_missing() {
        assert_eq!(ensure_gif_extension(Path::new("out")), PathBuf::from("out.gif"));
        assert_eq!(
            ensure_gif_extension(Path::new("clip.gif")),
            PathBuf::from("clip.gif")
        );
        assert_eq!(
            ensure_gif_extension(Path::new("frame.png")),
            PathBuf::from("frame.png.gif")
        );
    }

    #[test]
    fn empty_recorder_refuses_to_encode() {
        let recorder = GifRecorder::new();
        let mut buffer = Vec::new();
        assert!(matches!(
            recorder.write_to(&mut buffer, 10),
            Err(FizzError::Encode(_))
        ));
    }

    #[test]
    fn frames_accumulate_from_canvas_and_raw_images() {
        let canvas = Canvas::new((4.0, 4.0), Rgba::WHITE);
        let mut recorder = GifRecorder::new();
        recorder.add(&canvas).unwrap();
        recorder.add_frame(RgbaImage::new(4, 4));
        assert_eq!(recorder.len(), 2);
    }

    #[test]
    fn encoded_output_carries_the_gif_signature() {
        let mut recorder = GifRecorder::new();
        recorder.add_frame(RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255])));
        let mut buffer = Vec::new();
        recorder.write_to(&mut buffer, 10).unwrap();
        assert_eq!(&buffer[..6], b"GIF89a");
    }
}
