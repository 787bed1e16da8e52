use crate::core::models::atom::Atom;
use nalgebra::Vector3;
use tracing::debug;

/// Ordered diagnostic lines for one comparison, mirrored to `tracing` as they are written.
#[derive(Debug, Default)]
pub struct DebugTrace {
    enabled: bool,
    lines: Vec<String>,
}

impl DebugTrace {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            lines: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Records a line; `build` only runs when tracing is enabled.
    pub fn line(&mut self, build: impl FnOnce() -> String) {
        if self.enabled {
            let line = build();
            debug!("{}", line);
            self.lines.push(line);
        }
    }

    pub fn coordinates<'a>(
        &mut self,
        atoms: &[Atom],
        points: impl IntoIterator<Item = &'a Vector3<f64>>,
    ) {
        if !self.enabled {
            return;
        }
        for (atom, point) in atoms.iter().zip(points) {
            self.line(|| format_coordinate(&atom.label, point));
        }
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

pub fn format_coordinate(label: &str, point: &Vector3<f64>) -> String {
    format!(
        " {:<10}    {:6.3}    {:6.3}    {:6.3}",
        label, point.x, point.y, point.z
    )
}
