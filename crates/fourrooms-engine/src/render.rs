//! Human-readable views of a single instance.
//!
//! [`RenderSnapshot`] borrows the map and copies one instance's state;
//! its [`Display`](fmt::Display) impl draws the grid as text. A
//! [`RenderSink`] consumes snapshots, and [`TextSink`] writes them to any
//! [`io::Write`].

use std::fmt::{self, Write as _};
use std::io;

use fourrooms_core::{CellKind, Pos, OBS_WINDOW};
use fourrooms_space::GridMap;

const HALF: i32 = (OBS_WINDOW / 2) as i32;

/// A read-only picture of one instance at the current tick.
#[derive(Clone, Copy, Debug)]
pub struct RenderSnapshot<'a> {
    /// Instance index within the batch.
    pub index: usize,
    /// The shared map.
    pub map: &'a GridMap,
    /// Agent cell.
    pub agent: Pos,
    /// Goal cell.
    pub goal: Pos,
    /// Ticks taken in the current episode.
    pub step_count: u32,
    /// Reward accumulated in the current episode.
    pub episode_return: f32,
}

impl RenderSnapshot<'_> {
    /// Whether `pos` lies inside the agent's observation window.
    pub fn in_view(&self, pos: Pos) -> bool {
        (pos.row - self.agent.row).abs() <= HALF && (pos.col - self.agent.col).abs() <= HALF
    }

    fn glyph(&self, pos: Pos, shade_view: bool) -> char {
        if pos == self.agent {
            'A'
        } else if pos == self.goal {
            'G'
        } else {
            match self.map.cell(pos) {
                CellKind::Wall => '#',
                CellKind::Floor if shade_view && self.in_view(pos) => ',',
                CellKind::Floor => '.',
            }
        }
    }

    fn write_grid(&self, f: &mut dyn fmt::Write, shade_view: bool) -> fmt::Result {
        let size = self.map.size() as i32;
        for row in 0..size {
            if row > 0 {
                f.write_char('\n')?;
            }
            for col in 0..size {
                f.write_char(self.glyph(Pos::new(row, col), shade_view))?;
            }
        }
        Ok(())
    }
}

/// Draws the grid with `#` walls, `.` floor, `A` agent and `G` goal,
/// one line per row and no trailing newline.
impl fmt::Display for RenderSnapshot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_grid(f, false)
    }
}

/// Consumer of rendered frames.
pub trait RenderSink {
    /// Present one frame.
    fn present(&mut self, frame: &RenderSnapshot<'_>) -> io::Result<()>;
}

/// Writes frames as text, each preceded by a one-line header.
///
/// With [`with_view`](Self::with_view) enabled, floor inside the agent's
/// observation window is drawn as `,`.
#[derive(Debug)]
pub struct TextSink<W: io::Write> {
    out: W,
    show_view: bool,
}

impl<W: io::Write> TextSink<W> {
    /// Write frames to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            show_view: false,
        }
    }

    /// Toggle shading of the observation window.
    pub fn with_view(mut self, show_view: bool) -> Self {
        self.show_view = show_view;
        self
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: io::Write> RenderSink for TextSink<W> {
    fn present(&mut self, frame: &RenderSnapshot<'_>) -> io::Result<()> {
        let mut text = String::with_capacity((frame.map.size() as usize + 1).pow(2) + 64);
        // Writing into a String cannot fail.
        let _ = writeln!(
            text,
            "instance {} step {} return {:.3}",
            frame.index, frame.step_count, frame.episode_return
        );
        let _ = frame.write_grid(&mut text, self.show_view);
        text.push('\n');
        self.out.write_all(text.as_bytes())
    }
}
