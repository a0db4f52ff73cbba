use segvec::{
    DirtyTracker, FixedListSegment, Result, VariableListSegment, write_fixed_list,
    write_variable_list,
};

/// A parent record holding one fixed and one variable list back to back.
fn parent_bytes() -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let len = write_fixed_list(&mut bytes, 0, &[1_i64, 2, 3])?;
    write_variable_list(
        &mut bytes,
        len,
        &[Some("a".to_string()), None, Some("b".to_string())],
    )?;
    Ok(bytes)
}

#[test]
fn test_segments_share_parent_tracker() -> Result<()> {
    let tracker = DirtyTracker::new();
    let bytes = parent_bytes()?;

    let (numbers, consumed) = FixedListSegment::<i64>::create(&tracker, &bytes, 0)?;
    let (mut names, _) = VariableListSegment::<String>::create(&tracker, &bytes, consumed)?;

    assert!(numbers.tracker().same_as(names.tracker()));
    assert_eq!(numbers.to_vec()?, [1, 2, 3]);
    assert_eq!(names.get(2)?.map(String::as_str), Some("b"));
    assert!(!tracker.is_dirty());

    names.set(1, Some("c".to_string()))?;
    assert!(tracker.is_dirty());
    assert!(!numbers.is_promoted());

    Ok(())
}

#[test]
fn test_dirty_is_terminal() -> Result<()> {
    let tracker = DirtyTracker::new();
    let bytes = parent_bytes()?;

    let (mut numbers, _) = FixedListSegment::<i64>::create(&tracker, &bytes, 0)?;
    numbers.push(4)?;
    assert!(tracker.is_dirty());

    // Undoing the change does not make the parent clean again.
    numbers.remove_at(3)?;
    assert_eq!(numbers.to_vec()?, [1, 2, 3]);
    assert!(tracker.is_dirty());

    // Neither does a fresh, unmutated segment on the same tracker.
    let (fresh, _) = FixedListSegment::<i64>::create(&tracker, &bytes, 0)?;
    assert!(!fresh.is_promoted());
    assert!(tracker.is_dirty());

    Ok(())
}

#[test]
fn test_child_tracker_reports_to_parent() -> Result<()> {
    let root = DirtyTracker::new();
    let nested = root.child();
    let sibling = root.child();
    let bytes = parent_bytes()?;

    let (mut numbers, _) = FixedListSegment::<i64>::create(&nested, &bytes, 0)?;
    numbers.clear();

    assert!(nested.is_dirty());
    assert!(root.is_dirty());
    assert!(!sibling.is_dirty());

    Ok(())
}
