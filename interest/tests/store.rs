use jobdesk_interest::factory::Backend;
use jobdesk_interest::factory::open_store;
use jobdesk_interest::store::InterestStore;
use jobdesk_interest::store::json::JsonInterestStore;
use jobdesk_interest::types::InterestKey;
use jobdesk_interest::types::InterestRecord;
use jobdesk_interest::types::ListingKind;

fn backends() -> Vec<Backend> {
    #[cfg(feature = "sqlite")]
    {
        vec![Backend::Json, Backend::Sqlite]
    }
    #[cfg(not(feature = "sqlite"))]
    {
        vec![Backend::Json]
    }
}

fn saved_record() -> InterestRecord {
    InterestRecord {
        saved: true,
        applied: false,
        applied_at_ms: None,
    }
}

fn applied_record(at_ms: i64) -> InterestRecord {
    InterestRecord {
        saved: false,
        applied: true,
        applied_at_ms: Some(at_ms),
    }
}

#[test]
fn store_crud_import_export_stats() {
    for be in backends() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(dir.path(), Some(be)).unwrap();

        let job_42 = InterestKey::new(ListingKind::Job, 42);
        let sch_7 = InterestKey::new(ListingKind::Scholarship, 7);

        // missing key reads as "no interest yet"
        assert_eq!(store.get(&job_42).unwrap(), None);
        assert!(store.list(None).unwrap().is_empty());

        // create
        store.put(&job_42, &applied_record(1_000)).unwrap();
        store.put(&sch_7, &saved_record()).unwrap();
        assert_eq!(store.get(&job_42).unwrap(), Some(applied_record(1_000)));

        // update
        let mut rec = saved_record();
        rec.applied = true;
        rec.applied_at_ms = Some(2_000);
        store.put(&sch_7, &rec).unwrap();
        assert_eq!(store.get(&sch_7).unwrap(), Some(rec));

        // list, with and without the kind filter
        assert_eq!(store.list(None).unwrap().len(), 2);
        let jobs = store.list(Some(ListingKind::Job)).unwrap();
        assert_eq!(jobs.len(), 1);
        assert!(jobs.contains_key(&job_42));

        // stats
        let stats = store.stats().unwrap();
        assert_eq!(stats["total"], 2);
        assert_eq!(stats["saved"], 1);
        assert_eq!(stats["applied"], 2);
        assert_eq!(stats["by_kind"]["job"]["applied"], 1);
        assert_eq!(stats["by_kind"]["scholarship"]["saved"], 1);
        assert_eq!(stats["by_kind"]["training"]["saved"], 0);

        // export, import into a fresh store of the same backend
        let mut buf = Vec::new();
        store.export(&mut buf).unwrap();
        let dir2 = tempfile::tempdir().unwrap();
        let store2 = open_store(dir2.path(), Some(be)).unwrap();
        let n = store2.import(&mut buf.as_slice()).unwrap();
        assert_eq!(n, 2);
        assert_eq!(store2.list(None).unwrap(), store.list(None).unwrap());

        // remove
        store2.remove(&job_42).unwrap();
        assert_eq!(store2.get(&job_42).unwrap(), None);
        assert_eq!(store2.list(None).unwrap().len(), 1);
    }
}

#[test]
fn persisted_map_round_trips_unchanged() {
    for be in backends() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(dir.path(), Some(be)).unwrap();

        let keys = [
            InterestKey::new(ListingKind::Job, 1),
            InterestKey::new(ListingKind::Training, 3),
            InterestKey::new(ListingKind::Scholarship, 7),
        ];
        store.put(&keys[0], &saved_record()).unwrap();
        store.put(&keys[1], &applied_record(1_234)).unwrap();
        let mut both = saved_record();
        both.applied = true;
        both.applied_at_ms = Some(5_678);
        store.put(&keys[2], &both).unwrap();

        let first = store.list(None).unwrap();
        // re-open the same location and re-read
        let reopened = open_store(dir.path(), Some(be)).unwrap();
        let second = reopened.list(None).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            second.keys().copied().collect::<Vec<_>>(),
            keys.to_vec()
        );
    }
}

#[test]
fn import_is_last_writer_wins_per_key() {
    for be in backends() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(dir.path(), Some(be)).unwrap();

        let key = InterestKey::new(ListingKind::Job, 9);
        store.put(&key, &saved_record()).unwrap();
        store
            .put(&InterestKey::new(ListingKind::Job, 10), &saved_record())
            .unwrap();

        let incoming = r#"{ "job-9": { "saved": false, "applied": true, "applied_at_ms": 99 } }"#;
        let n = store.import(&mut incoming.as_bytes()).unwrap();
        assert_eq!(n, 1);

        // imported record replaced job-9; job-10 untouched
        assert_eq!(store.get(&key).unwrap(), Some(applied_record(99)));
        assert_eq!(store.list(None).unwrap().len(), 2);
    }
}

#[test]
fn json_store_repairs_invariant_violations_on_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("interests.json");
    // applied without a timestamp, and a stray timestamp without the flag
    let data = r#"{
        "job-1": { "saved": false, "applied": true },
        "job-2": { "saved": true, "applied": false, "applied_at_ms": 123 }
    }"#;
    std::fs::write(&path, data).unwrap();

    let store = JsonInterestStore::new(&path);
    let map = store.list(None).unwrap();

    // job-1 normalizes to an empty record and is dropped
    assert!(!map.contains_key(&InterestKey::new(ListingKind::Job, 1)));
    // job-2 keeps saved but loses the stray timestamp
    let rec = map[&InterestKey::new(ListingKind::Job, 2)];
    assert!(rec.saved);
    assert!(!rec.applied);
    assert_eq!(rec.applied_at_ms, None);
}

#[test]
fn json_store_surfaces_unreadable_path() {
    let dir = tempfile::tempdir().unwrap();
    // the path is a directory, so every read fails
    let store = JsonInterestStore::new(dir.path());
    assert!(store.get(&InterestKey::new(ListingKind::Job, 1)).is_err());
}
