//! ISO 8601 rendering.

use core::fmt::{self, Write};

use writeable::{impl_display_with_writeable, Writeable};

use crate::{
    iso::IsoDateTime,
    options::{IsoFormat, IsoFormatOptions, IsoRepresentation},
    DateError, DateLike, DateResult,
};

use super::{
    to_instant,
    tokens::{write_offset, write_padded},
};

/// The local fields and offset of a date, ready to be written as ISO 8601.
#[derive(Debug, Clone, Copy)]
pub struct FormattedIso {
    local: IsoDateTime,
    offset_minutes: i16,
    options: IsoFormatOptions,
}

impl FormattedIso {
    /// Prepares `date` for rendering.
    pub fn try_new<D: DateLike>(date: &D, options: IsoFormatOptions) -> DateResult<Self> {
        let instant = to_instant(date);
        let local = instant
            .to_iso_date_time()
            .ok_or_else(|| DateError::range().with_message("Invalid time value"))?;
        Ok(Self {
            local,
            offset_minutes: instant.offset().minutes(),
            options,
        })
    }
}

impl Writeable for FormattedIso {
    fn write_to<W: Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        let (date_delimiter, time_delimiter) = match self.options.format {
            IsoFormat::Extended => ("-", ":"),
            IsoFormat::Basic => ("", ""),
        };
        let representation = self.options.representation;
        let (date, time) = (self.local.date, self.local.time);

        if representation != IsoRepresentation::Time {
            write_padded(sink, i64::from(date.year), 4)?;
            write!(sink, "{date_delimiter}{:02}{date_delimiter}{:02}", date.month, date.day)?;
        }
        if representation != IsoRepresentation::Date {
            if representation == IsoRepresentation::Complete {
                sink.write_char('T')?;
            }
            write!(
                sink,
                "{:02}{time_delimiter}{:02}{time_delimiter}{:02}",
                time.hour, time.minute, time.second
            )?;
            if self.offset_minutes == 0 {
                sink.write_char('Z')?;
            } else {
                // The offset keeps its colon in both formats.
                write_offset(sink, self.offset_minutes, ":")?;
            }
        }
        Ok(())
    }
}

impl_display_with_writeable!(FormattedIso);

/// Renders `date` as ISO 8601 in its own offset, e.g.
/// `2019-09-18T19:00:52Z` or, in basic format, `20190918T190052Z`.
///
/// ```rust
/// use calendrical::{
///     format::format_iso,
///     options::{IsoFormat, IsoFormatOptions, IsoRepresentation},
///     Instant, UtcOffset,
/// };
///
/// let offset = UtcOffset::from_minutes(120).unwrap();
/// let date = Instant::from_local(offset, 2019, 9, 18, 19, 0, 52, 234);
/// assert_eq!(
///     format_iso(&date, &IsoFormatOptions::default()).unwrap(),
///     "2019-09-18T19:00:52+02:00"
/// );
///
/// let basic_date = IsoFormatOptions {
///     format: IsoFormat::Basic,
///     representation: IsoRepresentation::Date,
/// };
/// assert_eq!(format_iso(&date, &basic_date).unwrap(), "20190918");
/// ```
///
/// # Errors
///
/// A `Range` error for an invalid date.
pub fn format_iso<D: DateLike>(date: &D, options: &IsoFormatOptions) -> DateResult<String> {
    FormattedIso::try_new(date, *options).map(|formatted| formatted.write_to_string().into_owned())
}
