//! Name-table keys and the shared lookup and matching rules.

/// The width of a localized name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameWidth {
    /// A single character or two, e.g. `J` for January.
    Narrow,
    /// Short day names, e.g. `Tu`.
    Short,
    /// Abbreviated names, e.g. `Jan`.
    Abbreviated,
    /// Full names, e.g. `January`.
    Wide,
}

impl NameWidth {
    /// Returns the widths tried, in order, when a table for `self` is absent.
    pub const fn fallback_chain(self) -> &'static [NameWidth] {
        match self {
            Self::Narrow => &[Self::Narrow, Self::Abbreviated, Self::Wide],
            Self::Short => &[Self::Short, Self::Abbreviated, Self::Wide],
            Self::Abbreviated => &[Self::Abbreviated, Self::Wide],
            Self::Wide => &[Self::Wide, Self::Abbreviated],
        }
    }
}

/// Whether a name is used inside a larger date string or on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameContext {
    Formatting,
    Standalone,
}

/// The category of a name table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameCategory {
    /// Indexed `0 = BC`, `1 = AD`.
    Era,
    /// Indexed `0..4`.
    Quarter,
    /// Indexed `0..12`, January first.
    Month,
    /// Indexed `0..7`, Sunday first.
    Day,
    /// Indexed by [`DayPeriod`].
    DayPeriod,
}

/// A named period of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayPeriod {
    Am = 0,
    Pm,
    Midnight,
    Noon,
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl DayPeriod {
    pub const ALL: [DayPeriod; 8] = [
        Self::Am,
        Self::Pm,
        Self::Midnight,
        Self::Noon,
        Self::Morning,
        Self::Afternoon,
        Self::Evening,
        Self::Night,
    ];

    /// Returns the period stored at `index` in a day-period table.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The hour of day a parsed period resolves to.
    pub const fn to_hours(self) -> u8 {
        match self {
            Self::Morning => 4,
            Self::Evening => 17,
            Self::Pm | Self::Noon | Self::Afternoon => 12,
            Self::Am | Self::Midnight | Self::Night => 0,
        }
    }
}

/// Finds the longest table entry that prefixes `text`, ignoring case.
///
/// Returns the entry's index and the number of bytes of `text` it covers.
/// Ties go to the lowest index, so ambiguous narrow names resolve to
/// their first occurrence.
pub fn match_prefix(table: &[&str], text: &str) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    for (index, name) in table.iter().enumerate() {
        if name.is_empty() {
            continue;
        }
        let Some(consumed) = strip_prefix_ignore_case(text, name) else {
            continue;
        };
        if best.is_none_or(|(_, len)| consumed > len) {
            best = Some((index, consumed));
        }
    }
    best
}

pub(crate) fn strip_prefix_ignore_case(text: &str, prefix: &str) -> Option<usize> {
    let mut consumed = 0;
    let mut chars = text.chars();
    for expected in prefix.chars() {
        let actual = chars.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
        consumed += actual.len_utf8();
    }
    Some(consumed)
}
