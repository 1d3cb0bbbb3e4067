use serde::Serialize;

/// Character set matched by `[...]`.
///
/// Ranges are inclusive. `negated` flips membership after case folding is
/// applied, so `[^a-z]i` rejects both `q` and `Q`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CharClass {
    ranges: Vec<(char, char)>,
    negated: bool,
    ignore_case: bool,
}

impl CharClass {
    pub fn new(ranges: Vec<(char, char)>, negated: bool, ignore_case: bool) -> Self {
        Self {
            ranges,
            negated,
            ignore_case,
        }
    }

    pub fn ranges(&self) -> &[(char, char)] {
        &self.ranges
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn ignores_case(&self) -> bool {
        self.ignore_case
    }

    pub fn contains(&self, c: char) -> bool {
        let hit = self.in_ranges(c)
            || (self.ignore_case
                && (c.to_lowercase().any(|l| self.in_ranges(l))
                    || c.to_uppercase().any(|u| self.in_ranges(u))));
        hit != self.negated
    }

    fn in_ranges(&self, c: char) -> bool {
        self.ranges.iter().any(|&(lo, hi)| lo <= c && c <= hi)
    }
}
