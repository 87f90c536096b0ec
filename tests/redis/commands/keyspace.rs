use std::time::Duration;

use crate::test_utils::{TestEnv, TestUtils};

#[test]
fn test_handle_del_command() {
    let mut env = TestEnv::new();

    env.exec_command_ok(TestUtils::del_command("grape"), &TestUtils::expected_integer(0));
    env.exec_command_ok(
        TestUtils::sadd_command("grape", &["a"]),
        &TestUtils::expected_integer(1),
    );
    env.exec_command_ok(TestUtils::del_command("grape"), &TestUtils::expected_integer(1));
    env.exec_command_ok(TestUtils::del_command("grape"), &TestUtils::expected_integer(0));
}

#[test]
fn test_handle_type_command() {
    let mut env = TestEnv::new();

    env.exec_command_ok(TestUtils::set_command("s", "v"), &TestUtils::expected_simple_string("OK"));
    env.exec_command_ok(TestUtils::rpush_command("l", &["v"]), &TestUtils::expected_integer(1));
    env.exec_command_ok(TestUtils::sadd_command("st", &["v"]), &TestUtils::expected_integer(1));
    env.exec_command_ok(TestUtils::hset_command("h", &[("f", "v")]), &TestUtils::expected_integer(1));
    env.exec_command_ok(TestUtils::zadd_command("z", &[("1", "v")]), &TestUtils::expected_integer(1));

    let test_cases = vec![
        ("s", "string"),
        ("l", "list"),
        ("st", "set"),
        ("h", "hash"),
        ("z", "zset"),
        ("missing", "none"),
    ];

    for (key, expected) in test_cases {
        env.exec_command_ok(
            TestUtils::type_command(key),
            &TestUtils::expected_simple_string(expected),
        );
    }
}

#[tokio::test(start_paused = true)]
async fn test_handle_expire_and_ttl_commands() {
    let mut env = TestEnv::new();

    env.exec_command_ok(TestUtils::ttl_command("grape"), &TestUtils::expected_integer(-2));
    env.exec_command_ok(TestUtils::expire_command("grape", 10), &TestUtils::expected_integer(0));

    env.exec_command_ok(
        TestUtils::rpush_command("grape", &["a"]),
        &TestUtils::expected_integer(1),
    );
    env.exec_command_ok(TestUtils::ttl_command("grape"), &TestUtils::expected_integer(-1));
    env.exec_command_ok(TestUtils::expire_command("grape", 10), &TestUtils::expected_integer(1));
    env.exec_command_ok(TestUtils::ttl_command("grape"), &TestUtils::expected_integer(10));

    tokio::time::advance(Duration::from_millis(2600)).await;
    env.exec_command_ok(TestUtils::ttl_command("grape"), &TestUtils::expected_integer(7));

    tokio::time::advance(Duration::from_millis(7400)).await;
    env.exec_command_ok(TestUtils::ttl_command("grape"), &TestUtils::expected_integer(-2));
    env.exec_command_ok(TestUtils::llen_command("grape"), &TestUtils::expected_integer(0));
    env.exec_command_ok(TestUtils::type_command("grape"), &TestUtils::expected_simple_string("none"));
}

#[test]
fn test_expire_with_non_positive_seconds_deletes() {
    let mut env = TestEnv::new();

    env.exec_command_ok(TestUtils::set_command("grape", "v"), &TestUtils::expected_simple_string("OK"));
    env.exec_command_ok(TestUtils::expire_command("grape", -1), &TestUtils::expected_integer(1));
    env.exec_command_ok(TestUtils::get_command("grape"), &TestUtils::expected_null());
    assert!(env.store.is_empty());
}

#[test]
fn test_set_clears_expiration() {
    let mut env = TestEnv::new();

    env.exec_command_ok(TestUtils::set_command("grape", "v1"), &TestUtils::expected_simple_string("OK"));
    env.exec_command_ok(TestUtils::expire_command("grape", 100), &TestUtils::expected_integer(1));
    env.exec_command_ok(TestUtils::set_command("grape", "v2"), &TestUtils::expected_simple_string("OK"));
    env.exec_command_ok(TestUtils::ttl_command("grape"), &TestUtils::expected_integer(-1));
}
