use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crate::{Error, Result};

pub const DEFAULT_COLS: u8 = 16;
pub const DEFAULT_ROWS: u8 = 4;

/// Where finished frames go.
pub trait PanelSink: Send {
    fn present(&mut self, lines: &[String]) -> Result<()>;
}

/// Draws frames on a terminal, redrawing in place.
pub struct TerminalSink<W: Write + Send> {
    out: W,
    cols: usize,
}

impl TerminalSink<io::Stdout> {
    pub fn stdout(cols: u8) -> Self {
        Self {
            out: io::stdout(),
            cols: cols as usize,
        }
    }
}

impl<W: Write + Send> TerminalSink<W> {
    pub fn new(out: W, cols: u8) -> Self {
        Self {
            out,
            cols: cols as usize,
        }
    }
}

impl<W: Write + Send> PanelSink for TerminalSink<W> {
    fn present(&mut self, lines: &[String]) -> Result<()> {
        let border = format!("+{}+", "-".repeat(self.cols));
        write!(self.out, "\x1b[H\x1b[2J{border}\r\n")?;
        for line in lines {
            let pad = self.cols.saturating_sub(line.chars().count());
            write!(self.out, "|{line}{}|\r\n", " ".repeat(pad))?;
        }
        write!(self.out, "{border}\r\n")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Keeps the last presented frame; the test double for a real panel.
#[derive(Clone, Default)]
pub struct MemorySink {
    frames: Arc<Mutex<Vec<Vec<String>>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Option<Vec<String>> {
        self.frames.lock().ok()?.last().cloned()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.lock().map(|f| f.len()).unwrap_or(0)
    }
}

impl PanelSink for MemorySink {
    fn present(&mut self, lines: &[String]) -> Result<()> {
        let mut frames = self.frames.lock().map_err(|_| Error::DisplayLock)?;
        frames.push(lines.to_vec());
        Ok(())
    }
}

/// Character-cell facade over the dot-matrix panel.
pub struct Panel {
    cols: u8,
    rows: u8,
    lines: Vec<String>,
    sink: Box<dyn PanelSink>,
}

impl Panel {
    pub fn new(cols: u8, rows: u8, sink: Box<dyn PanelSink>) -> Result<Self> {
        if cols == 0 || rows == 0 {
            return Err(Error::InvalidArgs(format!(
                "panel size {cols}x{rows} must be non-zero"
            )));
        }
        Ok(Self {
            cols,
            rows,
            lines: vec![String::new(); rows as usize],
            sink,
        })
    }

    pub fn render_boot_message(&mut self) -> Result<()> {
        self.clear();
        self.write_line(0, "meteoclock")?;
        self.write_line(1, "starting...")?;
        self.present()
    }

    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
    }

    pub fn write_line(&mut self, row: u8, content: &str) -> Result<()> {
        if row >= self.rows {
            return Err(Error::InvalidArgs(format!(
                "row {row} out of bounds for display with {} rows",
                self.rows
            )));
        }

        let trimmed = content
            .chars()
            .take(self.cols as usize)
            .collect::<String>();
        self.lines[row as usize] = trimmed;
        Ok(())
    }

    pub fn present(&mut self) -> Result<()> {
        self.sink.present(&self.lines)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }
}
