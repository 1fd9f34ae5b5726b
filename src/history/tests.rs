use super::*;

fn entry(fill: u8) -> Snapshot {
    Snapshot::from_raw(2, 2, 8, vec![fill; 16])
}

#[test]
fn base_entry_is_never_popped() {
    let mut history = History::new(entry(0));
    assert!(!history.can_undo());
    assert!(history.undo().is_none());
    assert_eq!(history.undo_len(), 1);
    assert_eq!(history.current(), &entry(0));
}

#[test]
fn undo_returns_previous_entry() {
    let mut history = History::new(entry(0));
    history.commit(entry(1));
    history.commit(entry(2));
    history.commit(entry(3));

    assert_eq!(history.undo(), Some(&entry(2)));
    assert_eq!(history.undo(), Some(&entry(1)));
    assert_eq!(history.redo(), Some(&entry(2)));
    assert_eq!(history.current(), &entry(2));
}

#[test]
fn n_commits_and_n_minus_one_undos_land_on_first_commit() {
    let mut history = History::new(entry(0));
    for i in 1..=6 {
        history.commit(entry(i));
    }
    for _ in 0..5 {
        history.undo();
    }
    assert_eq!(history.current(), &entry(1));
    // extra undos stop at the base
    for _ in 0..10 {
        history.undo();
    }
    assert_eq!(history.current(), &entry(0));
}

#[test]
fn commit_after_undo_discards_redo_branch() {
    let mut history = History::new(entry(0));
    history.commit(entry(1));
    history.commit(entry(2));
    history.undo();
    assert!(history.can_redo());

    history.commit(entry(9));
    assert!(!history.can_redo());
    assert!(history.redo().is_none());
    assert_eq!(history.current(), &entry(9));
}

#[test]
fn redo_without_undo_is_a_no_op() {
    let mut history = History::new(entry(0));
    history.commit(entry(1));
    assert!(history.redo().is_none());
    assert_eq!(history.undo_len(), 2);
}

#[test]
fn dirty_tracks_commits() {
    let mut history = History::new(entry(0));
    assert!(!history.is_dirty());
    history.commit(entry(1));
    assert!(history.is_dirty());
    history.mark_clean();
    assert!(!history.is_dirty());
}

#[test]
fn reset_base_drops_both_stacks() {
    let mut history = History::new(entry(0));
    history.commit(entry(1));
    history.commit(entry(2));
    history.undo();

    history.reset_base(entry(7));
    assert_eq!(history.undo_len(), 1);
    assert_eq!(history.redo_len(), 0);
    assert_eq!(history.current(), &entry(7));
}
