use proptest::prelude::*;
use rawbuf::{SIZE_OF_I32, read_block, read_i32};
use segvec::{
    DirtyTracker, FixedListSegment, NULL_OFFSET, VariableListSegment, write_fixed_list,
    write_variable_list,
};

fn nullable_strings() -> impl Strategy<Value = Vec<Option<String>>> {
    proptest::collection::vec(proptest::option::of(".{0,12}"), 0..24)
}

proptest! {
    #[test]
    fn prop_fixed_get_matches_raw_decode(prefix in 0usize..16, values in proptest::collection::vec(any::<i32>(), 0..64)) {
        let mut buf = vec![0; prefix];
        write_fixed_list(&mut buf, prefix, &values).unwrap();

        let (list, consumed) = FixedListSegment::<i32>::create(&DirtyTracker::new(), &buf, prefix).unwrap();
        prop_assert_eq!(consumed, SIZE_OF_I32 * (values.len() + 1));
        for i in 0..list.len() {
            let raw = read_i32(&buf, prefix + SIZE_OF_I32 + i * SIZE_OF_I32).unwrap();
            prop_assert_eq!(list.get(i).unwrap(), raw);
        }
    }

    #[test]
    fn prop_variable_get_matches_raw_decode(values in nullable_strings()) {
        let mut buf = Vec::new();
        write_variable_list(&mut buf, 0, &values).unwrap();

        let (list, _) = VariableListSegment::<String>::create(&DirtyTracker::new(), &buf, 0).unwrap();
        prop_assert_eq!(list.len(), values.len());
        for i in 0..list.len() {
            let entry = read_i32(&buf, SIZE_OF_I32 * (i + 1)).unwrap();
            let raw = if entry == NULL_OFFSET {
                None
            } else {
                Some(String::from_utf8(read_block(&buf, entry as usize).unwrap().to_vec()).unwrap())
            };
            prop_assert_eq!(list.get(i).unwrap().cloned(), raw);
        }
    }

    #[test]
    fn prop_copy_to_leaves_surroundings(values in nullable_strings(), before in 0usize..8, after in 0usize..8) {
        let mut buf = Vec::new();
        write_variable_list(&mut buf, 0, &values).unwrap();
        let (list, _) = VariableListSegment::<String>::create(&DirtyTracker::new(), &buf, 0).unwrap();

        let marker = Some("marker".to_string());
        let mut dest = vec![marker.clone(); before + values.len() + after];
        list.copy_to(&mut dest, before).unwrap();

        prop_assert!(dest[..before].iter().all(|v| *v == marker));
        prop_assert_eq!(&dest[before..before + values.len()], &values[..]);
        prop_assert!(dest[before + values.len()..].iter().all(|v| *v == marker));
    }

    #[test]
    fn prop_unpromoted_roundtrip(fixed in proptest::collection::vec(any::<u64>(), 0..32), variable in nullable_strings()) {
        let tracker = DirtyTracker::new();

        let mut buf = Vec::new();
        write_fixed_list(&mut buf, 0, &fixed).unwrap();
        let (list, _) = FixedListSegment::<u64>::create(&tracker, &buf, 0).unwrap();
        let mut reencoded = Vec::new();
        write_fixed_list(&mut reencoded, 0, &list.to_vec().unwrap()).unwrap();
        prop_assert_eq!(&reencoded, &buf);

        let mut buf = Vec::new();
        write_variable_list(&mut buf, 0, &variable).unwrap();
        let (list, _) = VariableListSegment::<String>::create(&tracker, &buf, 0).unwrap();
        let mut reencoded = Vec::new();
        write_variable_list(&mut reencoded, 0, &list.to_vec().unwrap()).unwrap();
        let (reread, _) = VariableListSegment::<String>::create(&tracker, &reencoded, 0).unwrap();
        prop_assert_eq!(reread.to_vec().unwrap(), variable);

        prop_assert!(!tracker.is_dirty());
    }

    #[test]
    fn prop_promotion_marks_dirty_once(values in proptest::collection::vec(any::<i16>(), 1..32), extra in any::<i16>()) {
        let tracker = DirtyTracker::new();
        let mut buf = Vec::new();
        write_fixed_list(&mut buf, 0, &values).unwrap();
        let (mut list, _) = FixedListSegment::<i16>::create(&tracker, &buf, 0).unwrap();

        prop_assert!(!tracker.is_dirty());
        list.push(extra).unwrap();
        prop_assert!(list.is_promoted());
        prop_assert!(tracker.is_dirty());
        list.remove_at(values.len()).unwrap();
        prop_assert!(tracker.is_dirty());
        prop_assert_eq!(list.to_vec().unwrap(), values);
    }
}
