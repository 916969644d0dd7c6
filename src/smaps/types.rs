//! Data types produced by the smaps reader.

use serde::Serialize;

/// Name given to mappings whose header line has no path field.
pub const ANONYMOUS: &str = "anonymous";

/// One memory region parsed from a smaps file. All values are in bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MappingRecord {
    pub name: String,
    pub size: u64,
    pub rss: u64,
    pub pss: u64,
}

impl MappingRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.name == ANONYMOUS
    }
}

/// Aggregate memory usage for one process.
///
/// The totals always equal the sums over `mappings`; the only way to add a
/// record is [`AggregateResult::push`], which keeps both in step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateResult {
    count: u64,
    total_size: u64,
    total_rss: u64,
    total_pss: u64,
    mappings: Vec<MappingRecord>,
}

impl AggregateResult {
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    pub fn total_rss(&self) -> u64 {
        self.total_rss
    }

    pub fn total_pss(&self) -> u64 {
        self.total_pss
    }

    /// Mappings in the order they appear in the file.
    pub fn mappings(&self) -> &[MappingRecord] {
        &self.mappings
    }

    /// Appends a finished record and folds it into the totals.
    /// Returns `None` if any total would overflow; the result is unchanged then.
    pub(crate) fn push(&mut self, record: MappingRecord) -> Option<()> {
        let total_size = self.total_size.checked_add(record.size)?;
        let total_rss = self.total_rss.checked_add(record.rss)?;
        let total_pss = self.total_pss.checked_add(record.pss)?;

        self.total_size = total_size;
        self.total_rss = total_rss;
        self.total_pss = total_pss;
        self.count += 1;
        self.mappings.push(record);
        Some(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, size: u64, rss: u64, pss: u64) -> MappingRecord {
        MappingRecord {
            name: name.into(),
            size,
            rss,
            pss,
        }
    }

    #[test]
    fn test_push_keeps_totals_in_step() {
        let mut result = AggregateResult::default();
        result.push(record("/usr/lib/libc.so.6", 8192, 4096, 2048)).unwrap();
        result.push(record(ANONYMOUS, 4096, 4096, 4096)).unwrap();

        assert_eq!(result.count(), 2);
        assert_eq!(result.mappings().len(), 2);
        assert_eq!(result.total_size(), 12288);
        assert_eq!(result.total_rss(), 8192);
        assert_eq!(result.total_pss(), 6144);
        assert!(result.mappings()[1].is_anonymous());
    }

    #[test]
    fn test_push_overflow_leaves_result_untouched() {
        let mut result = AggregateResult::default();
        result.push(record("a", u64::MAX, 0, 0)).unwrap();
        assert!(result.push(record("b", 1, 0, 0)).is_none());
        assert_eq!(result.count(), 1);
        assert_eq!(result.total_size(), u64::MAX);
    }

    #[test]
    fn test_new_record_is_empty() {
        let r = MappingRecord::new("/tmp/m.txt");
        assert_eq!(r.name, "/tmp/m.txt");
        assert_eq!((r.size, r.rss, r.pss), (0, 0, 0));
        assert!(!r.is_anonymous());
    }
}
