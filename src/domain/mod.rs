mod clip;
mod object_name;
mod time_range;

pub use clip::{ClipId, ClipRecord};
pub use object_name::ObjectName;
pub use time_range::TimeRange;
