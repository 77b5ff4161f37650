//! End-to-end command-sequence scenarios, run through the full parser +
//! dispatcher + executor stack.

use kvengine::{Engine, Reply, StoreConfig};
use tempfile::tempdir;

fn engine(dir: &tempfile::TempDir) -> Engine {
    let mut engine = Engine::new(StoreConfig {
        hash_seed: 0x1234_5678,
        persistence_filepath: dir.path().join("db.json"),
    });
    engine.load().unwrap();
    engine.start().unwrap();
    engine
}

#[test]
fn scenario_1_set_overwrite_then_get() {
    let dir = tempdir().unwrap();
    let engine = engine(&dir);

    assert_eq!(engine.submit_line("SET author cch"), Reply::Bool(true));
    assert_eq!(engine.submit_line("SET author cch137"), Reply::Bool(true));
    assert_eq!(engine.submit_line("GET author"), Reply::String("cch137".into()));
}

#[test]
fn scenario_2_list_push_pop_and_length() {
    let dir = tempdir().unwrap();
    let engine = engine(&dir);

    assert_eq!(engine.submit_line("RPUSH list1 a b c d e f g"), Reply::UInt(7));
    assert_eq!(engine.submit_line("LPUSH list2 x y z"), Reply::UInt(3));
    assert_eq!(
        engine.submit_line("RPOP list1 2"),
        Reply::List(vec!["g".into(), "f".into()])
    );
    assert_eq!(engine.submit_line("LPOP list2 1"), Reply::List(vec!["z".into()]));
    assert_eq!(engine.submit_line("LLEN list1"), Reply::UInt(5));
    assert_eq!(engine.submit_line("LLEN list2"), Reply::UInt(2));
}

#[test]
fn scenario_3_lrange_negative_one_is_end_of_list() {
    let dir = tempdir().unwrap();
    let engine = engine(&dir);

    engine.submit_line("RPUSH list1 a b c d e f g");
    assert_eq!(
        engine.submit_line("LRANGE list1 0 -1"),
        Reply::List(vec!["a".into(), "b".into(), "c".into(), "d".into(), "e".into(), "f".into(), "g".into()])
    );
}

#[test]
fn scenario_4_zcount_inclusive_and_exclusive() {
    let dir = tempdir().unwrap();
    let engine = engine(&dir);

    for (score, member) in [(1, "a"), (2, "b"), (3, "c"), (4, "d"), (5, "e")] {
        engine.submit_line(&format!("ZADD scores {score} {member}"));
    }
    assert_eq!(engine.submit_line("ZCOUNT scores 1 true 5 true"), Reply::UInt(5));
    assert_eq!(engine.submit_line("ZCOUNT scores 1 false 5 false"), Reply::UInt(3));
}

#[test]
fn scenario_5_zinterstore_sums_common_members() {
    let dir = tempdir().unwrap();
    let engine = engine(&dir);

    for (score, member) in [(1, "a"), (2, "b"), (3, "c")] {
        engine.submit_line(&format!("ZADD z1 {score} {member}"));
    }
    for (score, member) in [(3, "c"), (4, "b"), (5, "d")] {
        engine.submit_line(&format!("ZADD z2 {score} {member}"));
    }

    assert_eq!(engine.submit_line("ZINTERSTORE dest 2 z1 z2"), Reply::UInt(2));
    assert_eq!(engine.submit_line("ZSCORE dest b"), Reply::Double(6.0));
    assert_eq!(engine.submit_line("ZSCORE dest c"), Reply::Double(6.0));
}

#[test]
fn scenario_6_zunionstore_covers_every_member() {
    let dir = tempdir().unwrap();
    let engine = engine(&dir);

    for (score, member) in [(1, "a"), (2, "b")] {
        engine.submit_line(&format!("ZADD z1 {score} {member}"));
    }
    for (score, member) in [(3, "b"), (4, "c")] {
        engine.submit_line(&format!("ZADD z2 {score} {member}"));
    }

    assert_eq!(engine.submit_line("ZUNIONSTORE dest 2 z1 z2"), Reply::UInt(3));
    assert_eq!(engine.submit_line("ZSCORE dest a"), Reply::Double(1.0));
    assert_eq!(engine.submit_line("ZSCORE dest b"), Reply::Double(5.0));
    assert_eq!(engine.submit_line("ZSCORE dest c"), Reply::Double(4.0));
}

#[test]
fn scenario_7_keys_glob_filters_by_prefix() {
    let dir = tempdir().unwrap();
    let engine = engine(&dir);

    engine.submit_line("SET user:1 a");
    engine.submit_line("SET user:2 b");
    engine.submit_line("SET admin:x c");

    let Reply::List(mut keys) = engine.submit_line("KEYS user:*") else {
        panic!("expected a list reply");
    };
    keys.sort();
    assert_eq!(keys, vec!["user:1".to_string(), "user:2".to_string()]);
}

#[test]
fn unknown_command_and_wrongtype_errors() {
    let dir = tempdir().unwrap();
    let engine = engine(&dir);

    assert_eq!(engine.submit_line("FROBNICATE x"), Reply::Error("ERR unknown command".into()));

    engine.submit_line("RPUSH mylist a");
    assert_eq!(
        engine.submit_line("GET mylist"),
        Reply::Error("WRONGTYPE Operation against a key holding the wrong kind of value".into())
    );

    assert_eq!(engine.submit_line("RENAME missing new"), Reply::Error("ERR no such key".into()));
}

#[test]
fn save_then_restart_reloads_persisted_state() {
    let dir = tempdir().unwrap();
    let mut engine = engine(&dir);

    engine.submit_line("SET k v");
    engine.submit_line("RPUSH mylist a b c");
    assert_eq!(engine.submit_line("SAVE"), Reply::Bool(true));
    engine.shutdown().unwrap();

    engine.load().unwrap();
    engine.start().unwrap();
    assert_eq!(engine.submit_line("GET k"), Reply::String("v".into()));
    assert_eq!(
        engine.submit_line("LRANGE mylist 0 -1"),
        Reply::List(vec!["a".into(), "b".into(), "c".into()])
    );
    engine.shutdown().unwrap();
}

#[test]
fn shutdown_command_stops_the_worker() {
    let dir = tempdir().unwrap();
    let mut engine = engine(&dir);

    engine.submit_line("SET k v");
    assert_eq!(engine.submit_line("SHUTDOWN"), Reply::Bool(true));

    // The worker has already stopped itself; the public state machine
    // transition is still required to release the dispatcher handle.
    engine.shutdown().unwrap();
    assert_eq!(engine.state(), kvengine::State::Stopped);
}

#[test]
fn submit_after_shutdown_command_returns_database_closed_instead_of_hanging() {
    let dir = tempdir().unwrap();
    let engine = engine(&dir);

    assert_eq!(engine.submit_line("SHUTDOWN"), Reply::Bool(true));

    // `engine` is still `Running` here (no lifecycle `shutdown()` call yet),
    // but the worker has already stopped itself. This must return
    // `ERR database is closed`, not block forever on a completion nothing
    // will ever fill in.
    assert_eq!(
        engine.submit_line("GET k"),
        Reply::Error("ERR database is closed".into())
    );
}
