/// Symmetric padding: `x` is applied to the left and right edges, `y` to the
/// top and bottom edges.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insets {
    /// Horizontal inset, applied on both sides.
    pub x: u32,
    /// Vertical inset, applied on both sides.
    pub y: u32,
}

impl Insets {
    /// Construct insets.
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Total horizontal padding, both sides.
    pub fn horizontal(&self) -> u32 {
        self.x.saturating_mul(2)
    }

    /// Total vertical padding, both sides.
    pub fn vertical(&self) -> u32 {
        self.y.saturating_mul(2)
    }
}

impl From<(u32, u32)> for Insets {
    fn from(v: (u32, u32)) -> Self {
        Self { x: v.0, y: v.1 }
    }
}
