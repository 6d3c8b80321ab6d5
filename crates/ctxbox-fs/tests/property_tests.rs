use ctxbox_fs::{resolve_relative, short_checksum};
use proptest::prelude::*;
use std::path::Path;

proptest! {
    #[test]
    fn test_checksum_shape(s in "\\PC*") {
        let checksum = short_checksum(&s);
        prop_assert_eq!(checksum.len(), 16);
        prop_assert!(checksum.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_resolved_paths_are_absolute(segment in "[a-z]{1,8}(/[a-z]{1,8}){0,3}") {
        let resolved = resolve_relative(Path::new("/base"), &segment, None);
        prop_assert!(Path::new(&resolved).is_absolute());
        prop_assert!(resolved.starts_with("/base/"));
    }
}
