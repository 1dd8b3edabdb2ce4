/// Which defined object groups the frame composer draws.
///
/// Every group stays defined and callable regardless of these flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawPlan {
    /// House roof and walls.
    pub house: bool,
    /// Sky, grass and sun.
    pub background: bool,
    /// Title text, limited to the title window.
    pub title: bool,
}

impl Default for DrawPlan {
    fn default() -> Self {
        Self {
            house: true,
            background: false,
            title: false,
        }
    }
}

/// Open interval of animation time (seconds) during which the title shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleWindow {
    pub start_sec: f64,
    pub end_sec: f64,
}

impl Default for TitleWindow {
    fn default() -> Self {
        Self {
            start_sec: 0.0,
            end_sec: 8.0,
        }
    }
}

impl TitleWindow {
    pub fn contains(&self, t_sec: f64) -> bool {
        t_sec > self.start_sec && t_sec < self.end_sec
    }
}
