/// Series palette; device slots cycle through it in order
const PALETTE: [&str; 6] = [
    "#4dc9f6", "#f67019", "#f53794", "#537bc4", "#acc236", "#166a8f",
];

/// Deterministic display color for a device slot
pub fn color_for(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}
