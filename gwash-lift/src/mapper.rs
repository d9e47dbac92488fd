/// One destination candidate for a lifted coordinate, 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedPosition {
    pub chrom: String,
    pub pos: u64,
}

///
/// Per-coordinate translation between two genome builds.
///
/// Implementations answer point queries with zero or more destination
/// candidates; the table-level lift decides what to do with them. The
/// handle is passed explicitly into every operation that needs it, so a
/// run can hold several mappings at once (e.g. a round trip).
///
pub trait CoordinateMapper {
    /// Map a 1-based position on `chrom` to the destination build.
    /// Candidates are ordered; an empty vector means unconvertible.
    fn map_position(&self, chrom: &str, pos: u64) -> Vec<MappedPosition>;
}
