//! Terminal palette for traces and grammar dumps.

/// Escape sequences keyed by what they mark. [`Colors::OFF`] holds empty
/// strings, so callers interpolate the fields unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colors {
    /// Rule names.
    pub rule: &'static str,
    /// Matched text and successful exits.
    pub ok: &'static str,
    /// Failed exits.
    pub fail: &'static str,
    /// Offsets, separators and other bookkeeping.
    pub meta: &'static str,
    pub reset: &'static str,
}

impl Colors {
    /// Basic 16-color codes, legible on light and dark backgrounds.
    pub const ON: Self = Self {
        rule: "\x1b[34m",
        ok: "\x1b[32m",
        fail: "\x1b[31m",
        meta: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        rule: "",
        ok: "",
        fail: "",
        meta: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        match enabled {
            true => Self::ON,
            false => Self::OFF,
        }
    }

    pub fn is_enabled(&self) -> bool {
        *self == Self::ON
    }
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}
