//! Continuous layout of a document into styled, positioned lines.
//!
//! Everything is laid out into one tall block of the content-box width, as if
//! the page were endless. Coordinates are in points, `x` from the left edge
//! of the content box and `top` downwards from the top of the block. The
//! pagination engine then slices this block into pages.

use crate::inline::{tokenize, InlineSpan};
use crate::model::{Block, Document, ListGroupId};
use std::collections::HashMap;

/// Standard Type 1 faces used by the PDF writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Regular,
    Bold,
    Oblique,
    Mono,
}

impl Face {
    pub const ALL: [Face; 4] = [Face::Regular, Face::Bold, Face::Oblique, Face::Mono];

    /// Font resource name used in content streams.
    pub fn resource_name(&self) -> &'static str {
        match self {
            Face::Regular => "F1",
            Face::Bold => "F2",
            Face::Oblique => "F3",
            Face::Mono => "F4",
        }
    }

    pub fn base_font(&self) -> &'static str {
        match self {
            Face::Regular => "Helvetica",
            Face::Bold => "Helvetica-Bold",
            Face::Oblique => "Helvetica-Oblique",
            Face::Mono => "Courier",
        }
    }

    /// Advance width of `c` in ems.
    ///
    /// Averages per character class rather than full AFM tables; close enough
    /// to wrap lines without overflowing the content box.
    fn advance(&self, c: char) -> f64 {
        if *self == Face::Mono {
            return 0.6;
        }
        let width = match c {
            ' ' => 0.278,
            'i' | 'j' | 'l' => 0.222,
            't' | 'f' | 'r' | 'I' => 0.28,
            '.' | ',' | ';' | ':' | '\'' | '!' | '|' => 0.278,
            '(' | ')' | '[' | ']' | '-' => 0.333,
            'm' | 'M' => 0.833,
            'w' => 0.722,
            'W' => 0.944,
            '0'..='9' => 0.556,
            c if c.is_ascii_uppercase() => 0.667,
            c if c.is_ascii_lowercase() => 0.53,
            _ => 0.6,
        };
        if *self == Face::Bold {
            width * 1.06
        } else {
            width
        }
    }
}

/// RGB color, components in `0.0..=1.0`.
pub type Rgb = (f64, f64, f64);

pub const TEXT_COLOR: Rgb = (0.13, 0.13, 0.13);
pub const ACCENT_COLOR: Rgb = (0.620, 0.227, 0.357);
pub const LINK_COLOR: Rgb = (0.02, 0.39, 0.76);
const RULE_COLOR: Rgb = (0.75, 0.75, 0.75);
const CODE_FILL: Rgb = (0.957, 0.957, 0.957);
const HEADER_FILL: Rgb = (0.949, 0.843, 0.878);
const ZEBRA_FILL: Rgb = (0.969, 0.969, 0.969);

const LINE_SPACING: f64 = 1.3;
const LIST_INDENT: f64 = 18.0;
const QUOTE_INDENT: f64 = 18.0;
const CELL_PADDING: f64 = 4.0;
const HEADING_SCALE: [f64; 4] = [2.0, 1.6, 1.3, 1.15];

/// Width of `text` set in `face` at `size` points.
pub fn text_width(text: &str, face: Face, size: f64) -> f64 {
    text.chars().map(|c| face.advance(c)).sum::<f64>() * size
}

/// A run of text drawn with one style.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub x: f64,
    pub text: String,
    pub face: Face,
    pub size: f64,
    pub color: Rgb,
}

/// One line of text. Lines of different table cells may share a `top`.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub top: f64,
    pub height: f64,
    /// Baseline, measured like `top`.
    pub baseline: f64,
    pub fragments: Vec<Fragment>,
}

/// A filled rectangle: shading, rules, quote bars and link underlines.
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    pub lines: Vec<Line>,
    pub rects: Vec<Rect>,
    pub total_height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    pub content_width: f64,
    pub base_font_size: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            content_width: 504.0,
            base_font_size: 11.0,
        }
    }
}

/// Lay out the whole document as one continuous block.
pub fn layout_document(doc: &Document, options: &LayoutOptions) -> Layout {
    let mut layouter = Layouter {
        options: *options,
        y: 0.0,
        trailing_gap: 0.0,
        layout: Layout::default(),
        counters: HashMap::new(),
    };
    for block in &doc.blocks {
        layouter.block(block);
    }
    // Spacing after the last block would only ever push out a blank page.
    layouter.layout.total_height = layouter.y - layouter.trailing_gap;
    layouter.layout
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Style {
    face: Face,
    size: f64,
    color: Rgb,
    underline: bool,
}

#[derive(Debug, Clone)]
struct Word {
    text: String,
    style: Style,
    space_before: bool,
}

#[derive(Debug, Clone)]
struct Placed {
    x: f64,
    text: String,
    style: Style,
    spaced: bool,
}

struct Layouter {
    options: LayoutOptions,
    y: f64,
    /// Spacing added after the most recent block.
    trailing_gap: f64,
    layout: Layout,
    /// Items seen so far per ordered run.
    counters: HashMap<ListGroupId, u32>,
}

impl Layouter {
    fn base(&self) -> f64 {
        self.options.base_font_size
    }

    fn width(&self) -> f64 {
        self.options.content_width
    }

    fn gap(&mut self, amount: f64) {
        self.y += amount;
        self.trailing_gap = amount;
    }

    fn plain_style(&self) -> Style {
        Style {
            face: Face::Regular,
            size: self.base(),
            color: TEXT_COLOR,
            underline: false,
        }
    }

    fn block(&mut self, block: &Block) {
        let base = self.base();
        match block {
            Block::Heading { level, text } => {
                let index = usize::from((*level).clamp(1, 4)) - 1;
                let size = base * HEADING_SCALE[index];
                let style = Style {
                    face: Face::Bold,
                    size,
                    color: ACCENT_COLOR,
                    underline: false,
                };
                self.y += size * 0.6;
                let height = self.place(words(text, style), 0.0, self.width(), self.y);
                self.y += height;
                self.gap(size * 0.35);
            }
            Block::Paragraph { text } => {
                let height = self.place(words(text, self.plain_style()), 0.0, self.width(), self.y);
                self.y += height;
                self.gap(base * 0.6);
            }
            Block::ListItem {
                text,
                ordered,
                level,
                ordinal_group,
            } => self.list_item(text, *ordered, *level, *ordinal_group),
            Block::CodeBlock { lines, .. } => self.code_block(lines),
            Block::Blockquote { text } => {
                let style = Style {
                    face: Face::Oblique,
                    ..self.plain_style()
                };
                let top = self.y;
                let height = self.place(
                    words(text, style),
                    QUOTE_INDENT,
                    self.width() - QUOTE_INDENT,
                    top,
                );
                self.layout.rects.push(Rect {
                    x: 4.0,
                    top,
                    width: 3.0,
                    height,
                    color: ACCENT_COLOR,
                });
                self.y += height;
                self.gap(base * 0.6);
            }
            Block::Table {
                rows,
                header_row_present,
            } => self.table(rows, *header_row_present),
            Block::HorizontalRule => {
                self.y += base * 0.5;
                self.layout.rects.push(Rect {
                    x: 0.0,
                    top: self.y,
                    width: self.width(),
                    height: 0.75,
                    color: RULE_COLOR,
                });
                self.y += 0.75;
                self.gap(base * 0.5);
            }
            Block::Blank => {}
        }
    }

    fn list_item(&mut self, text: &str, ordered: bool, level: u8, group: ListGroupId) {
        let style = self.plain_style();
        let indent = LIST_INDENT * (f64::from(level.min(2)) + 1.0);
        let marker = if ordered {
            let counter = self.counters.entry(group).or_insert(0);
            *counter += 1;
            format!("{counter}.")
        } else {
            "\u{2022}".to_string()
        };

        let top = self.y;
        let height = self.place(words(text, style), indent, self.width() - indent, top);
        let marker_width = text_width(&marker, style.face, style.size);
        self.layout.lines.push(Line {
            top,
            height: style.size * LINE_SPACING,
            baseline: top + style.size,
            fragments: vec![Fragment {
                x: (indent - 4.0 - marker_width).max(0.0),
                text: marker,
                face: style.face,
                size: style.size,
                color: style.color,
            }],
        });
        self.y += height.max(style.size * LINE_SPACING);
        self.gap(2.0);
    }

    fn code_block(&mut self, lines: &[String]) {
        let size = self.base() * 0.9;
        let style = Style {
            face: Face::Mono,
            size,
            color: TEXT_COLOR,
            underline: false,
        };
        let line_height = size * LINE_SPACING;
        let usable = self.width() - 2.0 * CELL_PADDING;
        let columns = ((usable / (0.6 * size)).floor() as usize).max(1);

        let empty = [String::new()];
        let lines = if lines.is_empty() { &empty[..] } else { lines };
        for line in lines {
            let chars: Vec<char> = line.chars().collect();
            let chunks: Vec<String> = if chars.is_empty() {
                vec![String::new()]
            } else {
                chars.chunks(columns).map(|c| c.iter().collect()).collect()
            };
            for chunk in chunks {
                // Shade per line so a block split across pages keeps its fill.
                self.layout.rects.push(Rect {
                    x: 0.0,
                    top: self.y,
                    width: self.width(),
                    height: line_height,
                    color: CODE_FILL,
                });
                let fragments = if chunk.is_empty() {
                    Vec::new()
                } else {
                    vec![Fragment {
                        x: CELL_PADDING,
                        text: chunk,
                        face: style.face,
                        size,
                        color: style.color,
                    }]
                };
                self.layout.lines.push(Line {
                    top: self.y,
                    height: line_height,
                    baseline: self.y + size,
                    fragments,
                });
                self.y += line_height;
            }
        }
        self.gap(self.base() * 0.6);
    }

    fn table(&mut self, rows: &[Vec<String>], header_row_present: bool) {
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0).max(1);
        let column_width = self.width() / columns as f64;
        let min_height = self.base() * LINE_SPACING + 2.0 * CELL_PADDING;

        for (index, row) in rows.iter().enumerate() {
            let is_header = header_row_present && index == 0;
            let style = Style {
                face: if is_header { Face::Bold } else { Face::Regular },
                ..self.plain_style()
            };
            let top = self.y;
            let rects_before = self.layout.rects.len();
            let mut height: f64 = 0.0;
            for (column, cell) in row.iter().enumerate() {
                let x = column as f64 * column_width + CELL_PADDING;
                let used = self.place(
                    words(cell, style),
                    x,
                    column_width - 2.0 * CELL_PADDING,
                    top + CELL_PADDING,
                );
                height = height.max(used + 2.0 * CELL_PADDING);
            }
            let height = height.max(min_height);

            let fill = if is_header {
                Some(HEADER_FILL)
            } else if header_row_present && (index - 1) % 2 == 1 {
                Some(ZEBRA_FILL)
            } else {
                None
            };
            if let Some(color) = fill {
                // Fill goes under the row's underlines.
                self.layout.rects.insert(
                    rects_before,
                    Rect {
                        x: 0.0,
                        top,
                        width: self.width(),
                        height,
                        color,
                    },
                );
            }
            self.layout.rects.push(Rect {
                x: 0.0,
                top: top + height,
                width: self.width(),
                height: 0.5,
                color: RULE_COLOR,
            });
            self.y += height;
        }
        self.gap(self.base() * 0.6);
    }

    /// Wrap `words` into `width` starting at `x0`, `top`; returns the height used.
    fn place(&mut self, words: Vec<Word>, x0: f64, width: f64, top: f64) -> f64 {
        let mut y = top;
        for placed in wrap(words, width) {
            let size = placed
                .iter()
                .map(|word| word.style.size)
                .fold(0.0_f64, f64::max);
            let height = size * LINE_SPACING;
            let baseline = y + size;

            let mut fragments: Vec<Fragment> = Vec::new();
            let mut last_style: Option<Style> = None;
            for word in placed {
                if word.style.underline {
                    self.layout.rects.push(Rect {
                        x: x0 + word.x,
                        top: baseline + 1.5,
                        width: text_width(&word.text, word.style.face, word.style.size),
                        height: 0.5,
                        color: word.style.color,
                    });
                }
                let style = word.style;
                let same_style = last_style == Some(style);
                match fragments.last_mut() {
                    Some(fragment) if same_style => {
                        if word.spaced {
                            fragment.text.push(' ');
                        }
                        fragment.text.push_str(&word.text);
                    }
                    _ => fragments.push(Fragment {
                        x: x0 + word.x,
                        text: word.text,
                        face: style.face,
                        size: style.size,
                        color: style.color,
                    }),
                }
                last_style = Some(style);
            }

            self.layout.lines.push(Line {
                top: y,
                height,
                baseline,
                fragments,
            });
            y += height;
        }
        y - top
    }
}

fn words(run: &str, base: Style) -> Vec<Word> {
    let mut out = Vec::new();
    let mut pending_space = false;
    for span in tokenize(run) {
        let style = match &span {
            InlineSpan::Plain { .. } => base,
            InlineSpan::Bold { .. } => Style {
                face: Face::Bold,
                ..base
            },
            InlineSpan::Italic { .. } => Style {
                face: Face::Oblique,
                ..base
            },
            InlineSpan::Code { .. } => Style {
                face: Face::Mono,
                size: base.size * 0.95,
                ..base
            },
            InlineSpan::Link { .. } => Style {
                color: LINK_COLOR,
                underline: true,
                ..base
            },
        };
        for (index, piece) in span.text().split(' ').enumerate() {
            if index > 0 {
                pending_space = true;
            }
            if piece.is_empty() {
                continue;
            }
            out.push(Word {
                text: piece.to_string(),
                style,
                space_before: pending_space,
            });
            pending_space = false;
        }
    }
    out
}

/// Greedy line breaking. Words wider than the line are split by character.
fn wrap(words: Vec<Word>, width: f64) -> Vec<Vec<Placed>> {
    let mut lines: Vec<Vec<Placed>> = Vec::new();
    let mut line: Vec<Placed> = Vec::new();
    let mut x = 0.0;

    for word in words {
        let style = word.style;
        let space = if word.space_before && !line.is_empty() {
            text_width(" ", style.face, style.size)
        } else {
            0.0
        };
        let word_width = text_width(&word.text, style.face, style.size);

        if !line.is_empty() && x + space + word_width > width {
            lines.push(std::mem::take(&mut line));
            x = 0.0;
        }

        if word_width > width {
            for piece in split_to_width(&word.text, style, width) {
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                }
                x = text_width(&piece, style.face, style.size);
                line.push(Placed {
                    x: 0.0,
                    text: piece,
                    style,
                    spaced: false,
                });
            }
            continue;
        }

        let spaced = !line.is_empty() && word.space_before;
        let gap = if spaced { space } else { 0.0 };
        line.push(Placed {
            x: x + gap,
            text: word.text,
            style,
            spaced,
        });
        x += gap + word_width;
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn split_to_width(text: &str, style: Style, width: f64) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0;
    for c in text.chars() {
        let advance = style.face.advance(c) * style.size;
        if !current.is_empty() && current_width + advance > width {
            pieces.push(std::mem::take(&mut current));
            current_width = 0.0;
        }
        current.push(c);
        current_width += advance;
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}
