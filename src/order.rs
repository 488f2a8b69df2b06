//! Locality ordering for metadata warming.
//!
//! Metadata lookups issued in ascending `(device, inode)` order touch far
//! fewer inode-table blocks than lookups in access-recency order, so the
//! scheduler warms metadata through this permutation while content reads
//! keep the original order (content does not benefit from inode locality,
//! and recency order best matches the access pattern about to re-occur).

use crate::record::FileRecord;

/// Build the locality permutation of `records`.
///
/// Pure re-ordering: same length, same records, sorted ascending by
/// `(device_id, inode_number)`. The sort is unstable; inode numbers are
/// practically unique per device, so tie order does not matter.
pub fn sort_by_locality(records: &[FileRecord]) -> Vec<&FileRecord> {
    let mut by_locality: Vec<&FileRecord> = records.iter().collect();
    by_locality.sort_unstable_by_key(|r| (r.device_id, r.inode_number));
    by_locality
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn record(device_id: u64, inode_number: u64, path: &str) -> FileRecord {
        FileRecord {
            device_id,
            inode_number,
            path: PathBuf::from(path),
        }
    }

    #[test]
    fn test_sorted_by_device_then_inode() {
        let records = vec![
            record(2050, 10, "/e"),
            record(2049, 500, "/a"),
            record(2049, 7, "/b"),
            record(2050, 2, "/c"),
            record(2049, 90, "/d"),
        ];

        let ordered = sort_by_locality(&records);
        for pair in ordered.windows(2) {
            let (x, y) = (pair[0], pair[1]);
            assert!(
                x.device_id < y.device_id
                    || (x.device_id == y.device_id && x.inode_number <= y.inode_number),
                "{x:?} before {y:?}"
            );
        }
    }

    #[test]
    fn test_pure_permutation() {
        let records = vec![
            record(3, 1, "/x"),
            record(1, 9, "/y"),
            record(2, 4, "/z"),
        ];

        let ordered = sort_by_locality(&records);
        assert_eq!(ordered.len(), records.len());

        let mut keys: Vec<_> = ordered
            .iter()
            .map(|r| (r.device_id, r.inode_number, r.path.clone()))
            .collect();
        keys.sort();
        let mut expected: Vec<_> = records
            .iter()
            .map(|r| (r.device_id, r.inode_number, r.path.clone()))
            .collect();
        expected.sort();
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_empty_list() {
        assert!(sort_by_locality(&[]).is_empty());
    }
}
