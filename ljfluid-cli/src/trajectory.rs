//! XYZ trajectory output

use ljfluid_core::Frame;
use std::io::{self, Write};
use std::ops::ControlFlow;

/// Writes every `every`-th frame in extended XYZ layout
pub struct XyzWriter<W: Write> {
    out: W,
    every: u64,
    frames_written: usize,
    error: Option<io::Error>,
}

impl<W: Write> XyzWriter<W> {
    pub fn new(out: W, every: u64) -> Self {
        Self {
            out,
            every,
            frames_written: 0,
            error: None,
        }
    }

    pub fn write_frame(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        writeln!(self.out, "{}", frame.positions.len())?;
        writeln!(
            self.out,
            "step={} time={:.6} box={}",
            frame.step, frame.time, frame.box_length
        )?;
        for p in frame.positions {
            writeln!(self.out, "Ar {:.8} {:.8} 0.0", p.x, p.y)?;
        }
        self.frames_written += 1;
        Ok(())
    }

    /// Frame callback for the driver; stops the run on the first I/O error
    pub fn consume(&mut self, frame: &Frame<'_>) -> ControlFlow<()> {
        if frame.step % self.every != 0 {
            return ControlFlow::Continue(());
        }
        match self.write_frame(frame) {
            Ok(()) => ControlFlow::Continue(()),
            Err(e) => {
                self.error = Some(e);
                ControlFlow::Break(())
            }
        }
    }

    /// Flush and report the number of frames written, or the error that stopped the run
    pub fn finish(mut self) -> io::Result<usize> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.frames_written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    fn frame(step: u64, positions: &[DVec2]) -> Frame<'_> {
        Frame {
            step,
            time: step as f64 * 0.005,
            positions,
            box_length: 10.0,
            radius: 0.5,
        }
    }

    #[test]
    fn test_frame_layout() {
        let positions = [DVec2::new(2.5, 2.5), DVec2::new(7.5, 2.5)];
        let mut writer = XyzWriter::new(Vec::new(), 1);
        writer.write_frame(&frame(4, &positions)).unwrap();

        let text = String::from_utf8(writer.out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "2");
        assert_eq!(lines[1], "step=4 time=0.020000 box=10");
        assert_eq!(lines[2], "Ar 2.50000000 2.50000000 0.0");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_consume_skips_off_stride_frames() {
        let positions = [DVec2::new(1.0, 1.0)];
        let mut writer = XyzWriter::new(Vec::new(), 10);
        for step in 1..=30 {
            assert!(writer.consume(&frame(step, &positions)).is_continue());
        }
        assert_eq!(writer.finish().unwrap(), 3);
    }
}
