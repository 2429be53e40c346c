/// Sheet row number of the first data row (the header is row 1).
pub const HEADER_OFFSET: usize = 2;

/// Sheet the job records live in, unless configured otherwise.
pub const DEFAULT_SHEET_NAME: &str = "Calendar Events Data";

/// Every job appointment is a fixed one hour slot.
pub const SLOT_START_HOUR: u32 = 11;
pub const SLOT_END_HOUR: u32 = 12;

pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Reminder offsets (in days) applied on every pass: one week and three days.
pub const DEFAULT_REMINDER_DAYS: [u32; 2] = [7, 3];

/// Locale date layout used when rendering dates into descriptions.
pub const DATE_STRING_FORMAT: &str = "%a %b %d %Y";
