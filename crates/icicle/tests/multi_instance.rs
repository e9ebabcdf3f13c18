use icicle::{
    BasicSnowflakeGenerator, LockSnowflakeGenerator, MAX_BATCH_SIZE, MAX_INSTANCE, SnowflakeId,
    decompose,
};
use std::{collections::HashSet, sync::Arc, thread};

#[test]
fn distinct_instances_never_collide() {
    let a = LockSnowflakeGenerator::new(1).unwrap();
    let b = LockSnowflakeGenerator::new(2).unwrap();

    let mut seen = HashSet::new();
    for _ in 0..64 {
        for id in a.batch(MAX_BATCH_SIZE as i64).unwrap() {
            assert!(seen.insert(id));
        }
        for id in b.batch(MAX_BATCH_SIZE as i64).unwrap() {
            assert!(seen.insert(id));
        }
    }
    assert_eq!(seen.len(), 2 * 64 * MAX_BATCH_SIZE);
}

#[test]
fn arc_shared_generator_across_threads() {
    let threads = num_cpus::get().clamp(2, 16);
    let per_thread = 8192;

    let generator = Arc::new(LockSnowflakeGenerator::new(MAX_INSTANCE).unwrap());
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let generator = Arc::clone(&generator);
            thread::spawn(move || {
                let mut ids = Vec::with_capacity(per_thread);
                let mut last: Option<SnowflakeId> = None;
                for _ in 0..per_thread {
                    let id = generator.next_id().unwrap();
                    // Each thread still sees its own IDs strictly increase.
                    if let Some(prev) = last {
                        assert!(id > prev);
                    }
                    last = Some(id);
                    ids.push(id);
                }
                ids
            })
        })
        .collect();

    let mut all = HashSet::with_capacity(threads * per_thread);
    for handle in handles {
        for id in handle.join().unwrap() {
            assert_eq!(decompose(id.to_raw()).instance, MAX_INSTANCE);
            assert!(all.insert(id));
        }
    }
    assert_eq!(all.len(), threads * per_thread);
}

#[test]
fn per_worker_basic_generators() {
    let handles: Vec<_> = (0..4)
        .map(|instance| {
            thread::spawn(move || {
                let generator = BasicSnowflakeGenerator::new(instance).unwrap();
                let ids = generator.batch(-1).unwrap();
                assert_eq!(ids.len(), MAX_BATCH_SIZE);
                ids
            })
        })
        .collect();

    let mut all = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(all.insert(id));
        }
    }
    assert_eq!(all.len(), 4 * MAX_BATCH_SIZE);
}

#[test]
fn minted_ids_are_non_negative_and_recent() {
    let generator = LockSnowflakeGenerator::new(0).unwrap();
    let before = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis() as i64;
    let id = generator.next_id().unwrap();
    assert!(id.to_raw() > 0);
    assert!(id.timestamp() >= before);
}
