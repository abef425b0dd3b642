pub mod day_record;
pub mod punch;
pub mod rows;
pub mod schedule;
pub mod verdict;

pub use day_record::DayRecord;
pub use punch::{Layout, Punch, PunchOrigin};
pub use rows::{IdentityStatus, PerDayRow, PerEmployeeRow, ScheduleSource};
pub use schedule::{FixedSchedule, FlexSchedule, Schedule, ShiftSchedule, WeeklyExclusion};
pub use verdict::{DayVerdict, EvalStatus, HhmmSpan};
