use peglet_core::RuleId;

use super::*;

fn key(rule: usize, offset: usize) -> MemoKey {
    MemoKey {
        rule: RuleId::new(rule),
        offset,
        no_skip: false,
    }
}

#[test]
fn lookup_returns_stored_entry() {
    let mut memo = MemoTable::new();
    assert!(memo.is_empty());

    memo.store(
        key(0, 3),
        MemoEntry::Matched {
            end: 5,
            value: Value::new(1u8),
        },
    );
    memo.store(key(1, 3), MemoEntry::Failed);

    assert_eq!(memo.len(), 2);
    assert_eq!(memo.lookup(&key(0, 3)).and_then(MemoEntry::end), Some(5));
    assert!(matches!(memo.lookup(&key(1, 3)), Some(MemoEntry::Failed)));
    assert!(memo.lookup(&key(0, 4)).is_none());
}

#[test]
fn entries_are_written_once() {
    let mut memo = MemoTable::new();

    memo.store(key(0, 0), MemoEntry::Failed);
    memo.store(
        key(0, 0),
        MemoEntry::Matched {
            end: 1,
            value: Value::unit(),
        },
    );

    assert_eq!(memo.len(), 1);
    assert!(matches!(memo.lookup(&key(0, 0)), Some(MemoEntry::Failed)));
}

#[test]
fn skip_flag_is_part_of_the_key() {
    let mut memo = MemoTable::new();
    let token = MemoKey {
        no_skip: true,
        ..key(0, 0)
    };

    memo.store(key(0, 0), MemoEntry::Failed);

    assert!(memo.lookup(&token).is_none());
}
