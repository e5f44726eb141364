//! Integration tests for slot reconciliation.

use people_generate::Generator;
use people_model::{Gender, Person};
use people_store::{
    CorruptSlotPolicy, DEFAULT_SLOT_KEY, FileStore, MemoryStore, MutationOutcome, Origin,
    ReconcileError, Reconciler, ReconcilerConfig, RecordSource, SlotStore, clear_slot,
    decode_forest, encode_forest,
};
use tempfile::tempdir;

/// Record source that counts how often it is asked for records.
struct CountingSource {
    generator: Generator,
    calls: usize,
}

impl CountingSource {
    fn new() -> Self {
        Self {
            generator: Generator::seeded(99),
            calls: 0,
        }
    }
}

impl RecordSource for CountingSource {
    fn records(&mut self, sizes: &[usize]) -> Vec<Person> {
        self.calls += 1;
        self.generator.generate(sizes)
    }
}

fn config(sizes: &str) -> ReconcilerConfig {
    ReconcilerConfig::default().with_seed_sizes(sizes.parse().expect("valid sizes"))
}

fn replacement(id: &str) -> Person {
    Person {
        id: id.to_string(),
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        age: 39,
        gender: Gender::Female,
        state: "New York".to_string(),
        salary: 49999.99,
        sub_rows: None,
    }
}

fn stored(store: &MemoryStore) -> Vec<Person> {
    let content = store.get(DEFAULT_SLOT_KEY).expect("slot written");
    decode_forest(content).expect("valid json").expect("non-empty slot")
}

#[test]
fn empty_store_is_seeded_with_configured_shape() {
    let mut source = CountingSource::new();
    let reconciler =
        Reconciler::initialize(MemoryStore::new(), config("3,2"), &mut source).unwrap();

    assert_eq!(source.calls, 1);
    assert_eq!(reconciler.origin(), Origin::Generated);
    assert_eq!(reconciler.records().len(), 3);
    assert!(
        reconciler
            .records()
            .iter()
            .all(|person| person.children().len() == 2)
    );
    assert!(!reconciler.is_dirty());
    assert_eq!(stored(reconciler.store()), reconciler.records());
}

#[test]
fn stored_slot_is_used_without_generating() {
    let existing = Generator::seeded(5).generate(&[4]);
    let store = MemoryStore::with_slot(DEFAULT_SLOT_KEY, &encode_forest(&existing).unwrap());
    let mut source = CountingSource::new();

    let reconciler = Reconciler::initialize(store, config("50"), &mut source).unwrap();

    assert_eq!(source.calls, 0);
    assert_eq!(reconciler.origin(), Origin::Stored);
    assert_eq!(reconciler.records(), existing.as_slice());
    assert_eq!(reconciler.store().write_count(), 0);
}

#[test]
fn stored_empty_array_is_not_regenerated() {
    let store = MemoryStore::with_slot(DEFAULT_SLOT_KEY, "[]");
    let mut source = CountingSource::new();
    let reconciler = Reconciler::initialize(store, config("5"), &mut source).unwrap();
    assert_eq!(source.calls, 0);
    assert!(reconciler.records().is_empty());
}

#[test]
fn blank_slot_counts_as_absent() {
    let store = MemoryStore::with_slot(DEFAULT_SLOT_KEY, "   ");
    let mut source = CountingSource::new();
    let reconciler = Reconciler::initialize(store, config("2"), &mut source).unwrap();
    assert_eq!(source.calls, 1);
    assert_eq!(reconciler.records().len(), 2);
}

#[test]
fn edit_replaces_only_target_position() {
    let mut source = CountingSource::new();
    let mut reconciler =
        Reconciler::initialize(MemoryStore::new(), config("4"), &mut source).unwrap();
    let before = reconciler.records().to_vec();

    let outcome = reconciler.edit_record(2, replacement("new-id")).unwrap();

    assert_eq!(outcome, MutationOutcome::Applied);
    let after = reconciler.records();
    assert_eq!(after.len(), 4);
    assert_eq!(after[2], replacement("new-id"));
    for index in [0, 1, 3] {
        assert_eq!(after[index], before[index]);
    }
    assert_eq!(stored(reconciler.store()), after);
}

#[test]
fn edit_out_of_range_is_a_no_op() {
    let mut source = CountingSource::new();
    let mut reconciler =
        Reconciler::initialize(MemoryStore::new(), config("2"), &mut source).unwrap();
    let writes = reconciler.store().write_count();
    let before = reconciler.records().to_vec();

    let outcome = reconciler.edit_record(7, replacement("x")).unwrap();

    assert_eq!(outcome, MutationOutcome::NotFound);
    assert_eq!(reconciler.records(), before.as_slice());
    assert_eq!(reconciler.store().write_count(), writes);
}

#[test]
fn delete_removes_first_match_and_keeps_children_of_others() {
    let mut first = replacement("dup");
    first.first_name = "First".to_string();
    let mut second = replacement("dup");
    second.first_name = "Second".to_string();
    let mut parent = replacement("parent");
    parent.sub_rows = Some(vec![replacement("child-a"), replacement("child-b")]);
    let forest = vec![first, parent.clone(), second.clone()];
    let store = MemoryStore::with_slot(DEFAULT_SLOT_KEY, &encode_forest(&forest).unwrap());
    let mut source = CountingSource::new();
    let mut reconciler = Reconciler::initialize(store, config("1"), &mut source).unwrap();

    let outcome = reconciler.delete_record("dup").unwrap();

    assert_eq!(outcome, MutationOutcome::Applied);
    assert_eq!(reconciler.records(), &[parent, second]);
    assert_eq!(stored(reconciler.store()), reconciler.records());
}

#[test]
fn delete_never_reaches_nested_records() {
    let mut source = CountingSource::new();
    let mut reconciler =
        Reconciler::initialize(MemoryStore::new(), config("2,2"), &mut source).unwrap();
    let nested_id = reconciler.records()[0].children()[0].id.clone();
    let before = reconciler.records().to_vec();

    assert_eq!(
        reconciler.delete_record(&nested_id).unwrap(),
        MutationOutcome::NotFound
    );
    assert_eq!(
        reconciler.delete_record("missing").unwrap(),
        MutationOutcome::NotFound
    );
    assert_eq!(reconciler.records(), before.as_slice());
}

#[test]
fn deleting_second_of_two_keeps_first_with_children() {
    let mut source = CountingSource::new();
    let mut reconciler =
        Reconciler::initialize(MemoryStore::new(), config("2,2"), &mut source).unwrap();
    let first = reconciler.records()[0].clone();
    let second_id = reconciler.records()[1].id.clone();

    reconciler.delete_record(&second_id).unwrap();

    assert_eq!(reconciler.records().len(), 1);
    assert_eq!(reconciler.records()[0], first);
    assert_eq!(reconciler.records()[0].children().len(), 2);
}

#[test]
fn corrupt_slot_regenerates_by_default() {
    let store = MemoryStore::with_slot(DEFAULT_SLOT_KEY, "{\"broken\":");
    let mut source = CountingSource::new();
    let reconciler = Reconciler::initialize(store, config("3"), &mut source).unwrap();

    assert_eq!(source.calls, 1);
    assert_eq!(reconciler.records().len(), 3);
    assert_eq!(stored(reconciler.store()), reconciler.records());
}

#[test]
fn corrupt_slot_fails_under_fail_policy() {
    let store = MemoryStore::with_slot(DEFAULT_SLOT_KEY, "not json");
    let mut source = CountingSource::new();
    let result = Reconciler::initialize(
        store,
        config("3").with_on_corrupt(CorruptSlotPolicy::Fail),
        &mut source,
    );

    assert!(matches!(result, Err(ReconcileError::CorruptSlot { .. })));
    assert_eq!(source.calls, 0);
}

#[test]
fn unreadable_store_follows_policy() {
    let mut store = MemoryStore::new();
    store.set_reads_fail(true);
    let mut source = CountingSource::new();
    let result = Reconciler::initialize(
        store.clone(),
        config("2").with_on_corrupt(CorruptSlotPolicy::Fail),
        &mut source,
    );
    assert!(matches!(result, Err(ReconcileError::StoreRead { .. })));

    let reconciler = Reconciler::initialize(store, config("2"), &mut source).unwrap();
    assert_eq!(reconciler.records().len(), 2);
}

#[test]
fn failed_write_keeps_in_memory_change() {
    let mut source = CountingSource::new();
    let mut reconciler =
        Reconciler::initialize(MemoryStore::new(), config("3"), &mut source).unwrap();
    let persisted = stored(reconciler.store());
    let doomed = reconciler.records()[0].id.clone();
    reconciler.store_mut().set_writes_fail(true);

    let error = reconciler.delete_record(&doomed).unwrap_err();

    assert!(matches!(error, ReconcileError::StoreWrite { .. }));
    assert!(error.is_unsaved_change());
    assert!(!error.user_message().is_empty());
    assert_eq!(reconciler.records().len(), 2);
    assert!(reconciler.is_dirty());
    assert_eq!(stored(reconciler.store()), persisted);

    reconciler.store_mut().set_writes_fail(false);
    reconciler.flush().unwrap();
    assert!(!reconciler.is_dirty());
    assert_eq!(stored(reconciler.store()), reconciler.records());
}

#[test]
fn reload_with_unsaved_change_keeps_it() {
    let mut source = CountingSource::new();
    let mut reconciler =
        Reconciler::initialize(MemoryStore::new(), config("3"), &mut source).unwrap();
    let doomed = reconciler.records()[0].id.clone();
    reconciler.store_mut().set_writes_fail(true);
    reconciler.delete_record(&doomed).unwrap_err();

    let error = reconciler.reload(&mut source).unwrap_err();

    assert!(matches!(error, ReconcileError::UnsavedChanges { .. }));
    assert!(error.is_unsaved_change());
    assert!(reconciler.is_dirty());
    assert_eq!(reconciler.records().len(), 2);
    assert!(reconciler.records().iter().all(|p| p.id != doomed));

    reconciler.store_mut().set_writes_fail(false);
    reconciler.reload(&mut source).unwrap();
    assert!(!reconciler.is_dirty());
    assert_eq!(reconciler.origin(), Origin::Stored);
    assert_eq!(reconciler.records().len(), 2);
    assert!(reconciler.records().iter().all(|p| p.id != doomed));
    assert_eq!(source.calls, 1);
}

#[test]
fn non_finite_salary_edit_is_refused_and_slot_survives() {
    let mut source = CountingSource::new();
    let mut reconciler =
        Reconciler::initialize(MemoryStore::new(), config("3,1"), &mut source).unwrap();
    let before = reconciler.records().to_vec();
    let writes = reconciler.store().write_count();

    let mut infinite = replacement("bad");
    infinite.salary = f64::INFINITY;
    let error = reconciler.edit_record(0, infinite).unwrap_err();
    assert!(matches!(error, ReconcileError::InvalidRecord { ref id, .. } if id == "bad"));
    assert!(!error.is_unsaved_change());

    let mut nested = replacement("parent");
    let mut child = replacement("child");
    child.salary = f64::NAN;
    nested.sub_rows = Some(vec![child]);
    assert!(matches!(
        reconciler.edit_record(1, nested),
        Err(ReconcileError::InvalidRecord { ref id, .. }) if id == "child"
    ));

    assert_eq!(reconciler.records(), before.as_slice());
    assert!(!reconciler.is_dirty());
    assert_eq!(reconciler.store().write_count(), writes);

    let reopened =
        Reconciler::initialize(reconciler.into_store(), config("3,1"), &mut source).unwrap();
    assert_eq!(reopened.origin(), Origin::Stored);
    assert_eq!(reopened.records(), before.as_slice());
    assert_eq!(source.calls, 1);
}

#[test]
fn clear_slot_removes_configured_key_only() {
    let mut store = MemoryStore::with_slot("archive", "[]");
    store.write(DEFAULT_SLOT_KEY, "[]").unwrap();
    let cfg = config("2").with_key("archive");

    clear_slot(&mut store, &cfg).unwrap();

    assert_eq!(store.get("archive"), None);
    assert_eq!(store.get(DEFAULT_SLOT_KEY), Some("[]"));
}

#[test]
fn seeding_survives_failed_write() {
    let mut store = MemoryStore::new();
    store.set_writes_fail(true);
    let mut source = CountingSource::new();
    let reconciler = Reconciler::initialize(store, config("2"), &mut source).unwrap();
    assert_eq!(reconciler.records().len(), 2);
    assert!(reconciler.is_dirty());
}

#[test]
fn clear_then_reload_regenerates() {
    let mut source = CountingSource::new();
    let mut reconciler =
        Reconciler::initialize(MemoryStore::new(), config("2"), &mut source).unwrap();
    let original = reconciler.records().to_vec();

    reconciler.clear().unwrap();
    assert!(reconciler.records().is_empty());
    assert_eq!(reconciler.store().get(DEFAULT_SLOT_KEY), None);

    reconciler.reload(&mut source).unwrap();
    assert_eq!(source.calls, 2);
    assert_eq!(reconciler.records().len(), 2);
    assert_ne!(reconciler.records(), original.as_slice());
}

#[test]
fn file_store_persists_across_sessions() {
    let dir = tempdir().unwrap();
    let mut source = CountingSource::new();
    let mut first =
        Reconciler::initialize(FileStore::new(dir.path()), config("3,1"), &mut source).unwrap();
    first.edit_record(0, replacement("edited")).unwrap();
    let expected = first.records().to_vec();
    drop(first);

    let second =
        Reconciler::initialize(FileStore::new(dir.path()), config("3,1"), &mut source).unwrap();
    assert_eq!(source.calls, 1);
    assert_eq!(second.origin(), Origin::Stored);
    assert_eq!(second.records(), expected.as_slice());
}
