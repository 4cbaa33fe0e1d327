use super::labels::LabelSet;
use crate::weather::PRECIP_GLYPH;

/// Narrowest panel on which every composed row fits without cutting a
/// label: an 8-char date, a gap, the glyph, a space and `99.99`.
pub const MIN_COLS: u8 = 16;

/// Lay the labels out on a `cols` x `rows` character grid:
///
/// ```text
/// 01:00PM     72°F
/// 07/04/24  # 0.15
/// # Rain
/// ```
pub fn compose(labels: &LabelSet, cols: u8, rows: u8) -> Vec<String> {
    let width = cols as usize;
    let mut lines = vec![String::new(); rows as usize];
    let precip = format!("{PRECIP_GLYPH} {}", labels.precipitation);
    let weather = format!("{} {}", labels.weather.glyph, labels.weather.name);
    let composed = [
        split_line(labels.time.as_str(), labels.temperature.as_str(), width),
        split_line(labels.date.as_str(), &precip, width),
        weather,
    ];
    for (slot, line) in lines.iter_mut().zip(composed) {
        *slot = line.chars().take(width).collect();
    }
    lines
}

/// `left` flush left, `right` flush right, at least one space between them.
fn split_line(left: &str, right: &str, width: usize) -> String {
    let used = left.chars().count() + right.chars().count();
    let gap = width.saturating_sub(used).max(1);
    format!("{left}{}{right}", " ".repeat(gap))
}
