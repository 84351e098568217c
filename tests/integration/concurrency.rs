//! Concurrent readers over one repository

use std::sync::Arc;
use std::thread;

use holocron_runtime::Session;
use holocron_storage::seed::load_bundled;

const QUERIES: [&str; 4] = [
    r#"people(name: "Luke") { name height(unit: METER) homeworld { name } }"#,
    "films { title planets { name diameter(unit: KILOMETER) } }",
    "starships { name pilots { name species { name } } }",
    "species { name homeworld { name residents { name } } characters { name } }",
];

#[test]
fn threads_share_one_repository() {
    let repo = Arc::new(load_bundled().unwrap());
    let session = Session::new(Arc::clone(&repo));
    let expected: Vec<String> = QUERIES
        .iter()
        .map(|q| session.query_json(q, false).unwrap())
        .collect();

    thread::scope(|scope| {
        for offset in 0..8 {
            let session = session.clone();
            let expected = &expected;
            scope.spawn(move || {
                for round in 0..20 {
                    let i = (offset + round) % QUERIES.len();
                    assert_eq!(session.query_json(QUERIES[i], false).unwrap(), expected[i]);
                }
            });
        }
    });

    // The session clones were the only other owners.
    assert_eq!(Arc::strong_count(&repo), 2);
}

#[test]
fn repository_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<holocron_storage::Repository>();
    assert_send_sync::<Session>();
}
