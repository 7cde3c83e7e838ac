//! Working weekdays and output buckets.
//!
//! The schedule speaks several dialects: English day names, 1-based day
//! numbers, and Georgian day names. Anything else is unrecognized and sends
//! the shop's rows to the `Unassigned` bucket.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        }
    }

    pub fn georgian(self) -> &'static str {
        match self {
            Weekday::Monday => "ორშაბათი",
            Weekday::Tuesday => "სამშაბათი",
            Weekday::Wednesday => "ოთხშაბათი",
            Weekday::Thursday => "ხუთშაბათი",
            Weekday::Friday => "პარასკევი",
        }
    }

    /// Parses a schedule cell into a working weekday. Accepts English names
    /// (any casing), day numbers 1..=5, and Georgian names; surrounding
    /// whitespace is ignored. Returns `None` for anything else, including
    /// Saturday/Sunday spellings and blank cells.
    pub fn parse(raw: &str) -> Option<Weekday> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.chars().all(|c| c.is_ascii_digit()) {
            return match trimmed.parse::<u32>() {
                Ok(number @ 1..=5) => Some(Self::ALL[(number - 1) as usize]),
                _ => None,
            };
        }
        let lowered = trimmed.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|day| lowered == day.name().to_lowercase() || trimmed == day.georgian())
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where an order row ends up: a working weekday, or the fallback bucket
/// for rows whose shop is unscheduled or has unrecognized weekday text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bucket {
    Day(Weekday),
    Unassigned,
}

impl Bucket {
    pub const ALL: [Bucket; 6] = [
        Bucket::Day(Weekday::Monday),
        Bucket::Day(Weekday::Tuesday),
        Bucket::Day(Weekday::Wednesday),
        Bucket::Day(Weekday::Thursday),
        Bucket::Day(Weekday::Friday),
        Bucket::Unassigned,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Bucket::Day(day) => day.name(),
            Bucket::Unassigned => "Unassigned",
        }
    }

    pub fn georgian(self) -> &'static str {
        match self {
            Bucket::Day(day) => day.georgian(),
            Bucket::Unassigned => "გაურკვეველი დღე",
        }
    }

    /// Position of this bucket in [`Bucket::ALL`].
    pub fn index(self) -> usize {
        match self {
            Bucket::Day(day) => day as usize,
            Bucket::Unassigned => 5,
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_english_names_in_any_casing() {
        assert_eq!(Weekday::parse("Monday"), Some(Weekday::Monday));
        assert_eq!(Weekday::parse("FRIDAY"), Some(Weekday::Friday));
        assert_eq!(Weekday::parse("  wednesday "), Some(Weekday::Wednesday));
    }

    #[test]
    fn parse_accepts_day_numbers_one_through_five() {
        assert_eq!(Weekday::parse("1"), Some(Weekday::Monday));
        assert_eq!(Weekday::parse(" 5 "), Some(Weekday::Friday));
        assert_eq!(Weekday::parse("0"), None);
        assert_eq!(Weekday::parse("6"), None);
        assert_eq!(Weekday::parse("12"), None);
    }

    #[test]
    fn parse_accepts_georgian_names() {
        assert_eq!(Weekday::parse("ორშაბათი"), Some(Weekday::Monday));
        assert_eq!(Weekday::parse(" პარასკევი "), Some(Weekday::Friday));
    }

    #[test]
    fn parse_rejects_everything_else() {
        assert_eq!(Weekday::parse("Someday"), None);
        assert_eq!(Weekday::parse("Saturday"), None);
        assert_eq!(Weekday::parse(""), None);
        assert_eq!(Weekday::parse("   "), None);
    }

    #[test]
    fn buckets_are_ordered_monday_to_unassigned() {
        let names: Vec<&str> = Bucket::ALL.iter().map(|b| b.name()).collect();
        assert_eq!(
            names,
            ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Unassigned"]
        );
        for (position, bucket) in Bucket::ALL.iter().enumerate() {
            assert_eq!(bucket.index(), position);
        }
    }
}
