/// Position text shown in the lightbox counter, e.g. `"2 / 7"`.
pub fn counter_text(index: usize, total: usize) -> String {
    format!("{} / {}", index + 1, total)
}
