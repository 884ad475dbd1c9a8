//! Character canvas for text plots
//!
//! A growable grid of characters with line and label drawing, used by the
//! ASCII renderer.

use unicode_width::UnicodeWidthStr;

/// Character grid for plotting
#[derive(Debug, Clone)]
pub struct AsciiCanvas {
    pub width: usize,
    pub height: usize,
    pub grid: Vec<Vec<char>>,
}

impl AsciiCanvas {
    /// Create a new canvas with the specified dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let grid = vec![vec![' '; width.max(1)]; height.max(1)];
        Self {
            width,
            height,
            grid,
        }
    }

    /// Ensure the canvas is at least the specified size, expanding if needed
    pub fn ensure_size(&mut self, min_width: usize, min_height: usize) {
        if min_width > self.width {
            for row in &mut self.grid {
                row.resize(min_width, ' ');
            }
            self.width = min_width;
        }
        if min_height > self.height {
            let extra_rows = min_height - self.height;
            self.grid
                .extend((0..extra_rows).map(|_| vec![' '; self.width]));
            self.height = min_height;
        }
    }

    /// Set a character at the specified position
    pub fn set_char(&mut self, x: usize, y: usize, c: char) {
        self.ensure_size(x + 1, y + 1);
        self.grid[y][x] = c;
    }

    /// Get the character at the specified position
    pub fn get_char(&self, x: usize, y: usize) -> char {
        if y < self.height && x < self.width {
            self.grid[y][x]
        } else {
            ' '
        }
    }

    /// Draw text at the specified position (left-aligned)
    pub fn draw_text(&mut self, x: usize, y: usize, text: &str) {
        for (i, c) in text.chars().enumerate() {
            self.set_char(x + i, y, c);
        }
    }

    /// Draw text centered at the specified x position
    pub fn draw_text_centered(&mut self, center_x: usize, y: usize, text: &str) {
        let start_x = center_x.saturating_sub(UnicodeWidthStr::width(text) / 2);
        self.draw_text(start_x, y, text);
    }

    /// Draw a straight line between two cells
    ///
    /// Cells are stepped with Bresenham's algorithm; the glyph follows the
    /// overall slope (`-`, `|`, `\` or `/`). Existing non-blank cells are
    /// overwritten only by the same glyph or a `+` crossing.
    pub fn draw_line(&mut self, from: (usize, usize), to: (usize, usize)) {
        let glyph = line_glyph(from, to);
        let (x0, y0) = (from.0 as i64, from.1 as i64);
        let (x1, y1) = (to.0 as i64, to.1 as i64);

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.plot_line_cell(x as usize, y as usize, glyph);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn plot_line_cell(&mut self, x: usize, y: usize, glyph: char) {
        let existing = self.get_char(x, y);
        let c = match existing {
            ' ' => glyph,
            e if e == glyph => glyph,
            '-' | '|' | '/' | '\\' | '+' => '+',
            // Labels win over lines
            other => other,
        };
        self.set_char(x, y, c);
    }
}

fn line_glyph(from: (usize, usize), to: (usize, usize)) -> char {
    let dx = to.0 as i64 - from.0 as i64;
    let dy = to.1 as i64 - from.1 as i64;
    if dy == 0 {
        '-'
    } else if dx == 0 || dx.abs() < dy.abs() / 2 {
        '|'
    } else if dy.abs() < dx.abs() / 2 {
        '-'
    } else if (dx > 0) == (dy > 0) {
        '\\'
    } else {
        '/'
    }
}

impl std::fmt::Display for AsciiCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut rows: Vec<String> = self
            .grid
            .iter()
            .map(|row| {
                let s: String = row.iter().collect();
                s.trim_end().to_string()
            })
            .collect();

        // Trim empty rows from top and bottom
        while rows.first().is_some_and(|row| row.is_empty()) {
            rows.remove(0);
        }
        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }

        if rows.is_empty() {
            return Ok(());
        }

        // Remove common leading whitespace
        let min_indent = rows
            .iter()
            .filter(|row| !row.is_empty())
            .map(|row| row.chars().take_while(|c| *c == ' ').count())
            .min()
            .unwrap_or(0);

        if min_indent > 0 {
            for row in &mut rows {
                *row = row.chars().skip(min_indent).collect();
            }
        }

        write!(f, "{}", rows.join("\n"))
    }
}
