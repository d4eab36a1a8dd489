/// Raw start/end positions for a cut, carried to the transcoder unmodified.
///
/// Accepted literal formats are the ones the transcoder itself accepts for
/// its seek and stop arguments: a clock value such as `00:01:30` or a plain
/// seconds offset such as `90`. No format, ordering, or range checking
/// happens here; the transcoder owns the interpretation and reports its own
/// errors for values it rejects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRange {
    start: String,
    end: String,
}

impl TimeRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }
}
