//! Two-digit year expansion.
//!
//! A short year only keeps the last two digits, so parsing needs a rule to
//! put it back into a century. The rule is a window around a boundary year:
//!
//! ```text
//!                  boundary
//!     0 ───────────────┼─────────────── 99
//!  `-`   base century  │ previous century
//!  `+` previous century│  base century
//! ```
//!
//! With the default window (century 21, boundary 40, `-`), `24` reads as 2024
//! and `87` as 1987. Values of 100 and above were typed in full and are kept.

/// Century disambiguation settings for short years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CenturyWindow {
    /// Century short years normally fall in; `21` means the 2000s.
    pub default_century: u8,
    /// Two-digit year where the window flips, `0..=99`.
    pub boundary_year: u8,
    /// `true` (`+`): years below the boundary belong to the previous century.
    /// `false` (`-`): years at or above the boundary do.
    pub anchor_before_boundary: bool,
}

impl Default for CenturyWindow {
    fn default() -> Self {
        CenturyWindow { default_century: 21, boundary_year: 40, anchor_before_boundary: false }
    }
}

impl CenturyWindow {
    /// Both numbers are reduced modulo 100 to fit the two-digit wire format.
    pub const fn new(default_century: u8, boundary_year: u8, anchor_before_boundary: bool) -> Self {
        CenturyWindow { default_century: default_century % 100, boundary_year: boundary_year % 100, anchor_before_boundary }
    }

    /// Read the five-character suffix (`+2140`) of a pattern.
    pub(crate) fn from_suffix(suffix: &[char]) -> Option<Self> {
        let [sign, c1, c2, b1, b2] = suffix else {
            return None;
        };
        let anchor_before_boundary = match sign {
            '+' => true,
            '-' => false,
            _ => return None,
        };
        let two_digits = |hi: &char, lo: &char| Some(hi.to_digit(10)? * 10 + lo.to_digit(10)?);
        let default_century = u8::try_from(two_digits(c1, c2)?).ok()?;
        let boundary_year = u8::try_from(two_digits(b1, b2)?).ok()?;

        Some(CenturyWindow { default_century, boundary_year, anchor_before_boundary })
    }

    /// Render as the five-character pattern suffix.
    pub fn to_suffix(&self) -> String {
        let sign = if self.anchor_before_boundary { '+' } else { '-' };
        format!("{sign}{:02}{:02}", self.default_century, self.boundary_year)
    }

    /// Expand a parsed short year into a full one.
    pub fn resolve(&self, year: i32) -> i32 {
        if !(0..100).contains(&year) {
            return year;
        }

        let base = (i32::from(self.default_century) - 1) * 100;
        let below = year < i32::from(self.boundary_year);
        let previous_century = below == self.anchor_before_boundary;

        if previous_century { base - 100 + year } else { base + year }
    }

    /// Last two digits of `year`, zero padded.
    pub fn shorten(year: i32) -> String {
        format!("{:02}", year.rem_euclid(100))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_splits_at_forty() {
        let window = CenturyWindow::default();
        assert_eq!(window.resolve(24), 2024);
        assert_eq!(window.resolve(0), 2000);
        assert_eq!(window.resolve(39), 2039);
        assert_eq!(window.resolve(40), 1940);
        assert_eq!(window.resolve(87), 1987);
    }

    // Pinned rule: the sign picks which side of the boundary is the previous
    // century; the boundary year itself always sits on the upper side.
    #[test]
    fn anchor_sign_selects_previous_century_side() {
        let cases: Vec<(bool, i32, i32)> = vec![
            (true, 20, 1920),
            (true, 15, 1915),
            (true, 0, 1900),
            (true, 30, 2030),
            (true, 38, 2038),
            (false, 20, 2020),
            (false, 15, 2015),
            (false, 0, 2000),
            (false, 30, 1930),
            (false, 38, 1938),
        ];

        for (anchor, short, expected) in cases {
            let window = CenturyWindow::new(21, 30, anchor);
            assert_eq!(window.resolve(short), expected, "anchor={anchor} short={short}");
        }
    }

    #[test]
    fn full_years_pass_through() {
        let window = CenturyWindow::new(21, 30, true);
        assert_eq!(window.resolve(100), 100);
        assert_eq!(window.resolve(1987), 1987);
        assert_eq!(window.resolve(-5), -5);
    }

    #[test]
    fn suffix_round_trips_through_text() {
        let window = CenturyWindow::from_suffix(&['+', '1', '9', '0', '5']).unwrap();
        assert_eq!(window, CenturyWindow::new(19, 5, true));
        assert_eq!(window.to_suffix(), "+1905");
        assert_eq!(CenturyWindow::default().to_suffix(), "-2140");
    }

    #[test]
    fn malformed_suffixes_are_rejected() {
        assert_eq!(CenturyWindow::from_suffix(&['*', '2', '1', '4', '0']), None);
        assert_eq!(CenturyWindow::from_suffix(&['+', '2', 'x', '4', '0']), None);
        assert_eq!(CenturyWindow::from_suffix(&['+', '2', '1', '4']), None);
    }

    #[test]
    fn shorten_keeps_two_digits() {
        assert_eq!(CenturyWindow::shorten(2024), "24");
        assert_eq!(CenturyWindow::shorten(1900), "00");
        assert_eq!(CenturyWindow::shorten(7), "07");
    }
}
