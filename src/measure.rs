//! Text measurement as an injected capability.
//!
//! Auto-fit needs string pixel widths for a given font. The capability is a
//! trait so the layout core never touches a display surface: the wasm build
//! adapts the canvas 2D context, native builds (tests, CLI) use a
//! deterministic heuristic.

use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

/// Measures the pixel width of a string in a font spec like `"13px sans-serif"`.
pub trait TextMeasure {
    fn measure(&mut self, text: &str, font: &str) -> f32;
}

const MEASURE_CACHE_CAP: usize = 4096;

/// LRU-capped width cache keyed by font + text.
pub struct MeasureCache {
    entries: HashMap<Rc<str>, f32>,
    order: VecDeque<Rc<str>>,
    max_entries: usize,
    scratch: String,
}

impl Default for MeasureCache {
    fn default() -> Self {
        Self::new(MEASURE_CACHE_CAP)
    }
}

impl MeasureCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            max_entries,
            scratch: String::new(),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn get(&mut self, font: &str, text: &str) -> Option<f32> {
        if self.max_entries == 0 {
            return None;
        }
        let key = Self::build_key(&mut self.scratch, font, text);
        self.entries.get(key).copied()
    }

    pub fn insert(&mut self, font: &str, text: &str, width: f32) {
        if self.max_entries == 0 {
            return;
        }
        let key = Self::build_key(&mut self.scratch, font, text);
        if self.entries.contains_key(key) {
            return;
        }
        let key_rc: Rc<str> = key.into();
        self.entries.insert(Rc::clone(&key_rc), width);
        self.order.push_back(key_rc);
        self.enforce_cap();
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn build_key<'a>(scratch: &'a mut String, font: &str, text: &str) -> &'a str {
        scratch.clear();
        scratch.reserve(font.len() + 1 + text.len());
        scratch.push_str(font);
        scratch.push('\n');
        scratch.push_str(text);
        scratch.as_str()
    }

    fn enforce_cap(&mut self) {
        while self.entries.len() > self.max_entries {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            } else {
                break;
            }
        }
    }
}

/// Deterministic per-character measurer for native builds.
///
/// Approximates proportional glyph widths as fractions of the font size.
/// Not pixel-accurate against any real font; stable across runs, which is
/// what tests and the CLI need.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicMeasure;

impl TextMeasure for HeuristicMeasure {
    fn measure(&mut self, text: &str, font: &str) -> f32 {
        let px = font_px(font);
        text.chars().map(|c| char_factor(c) * px).sum()
    }
}

/// Extracts the `<size>px` component of a font spec, defaulting to 13.
fn font_px(font: &str) -> f32 {
    for token in font.split_whitespace() {
        if let Some(num) = token.strip_suffix("px") {
            if let Ok(px) = num.parse::<f32>() {
                return px;
            }
        }
    }
    13.0
}

fn char_factor(c: char) -> f32 {
    match c {
        'i' | 'l' | 'j' | '.' | ',' | '\'' | '|' | '!' | ':' | ';' => 0.30,
        'f' | 't' | 'r' | '(' | ')' | '[' | ']' | ' ' => 0.40,
        'm' | 'w' | 'M' | 'W' | '@' => 0.90,
        '0'..='9' => 0.60,
        'A'..='Z' => 0.68,
        _ => 0.55,
    }
}
