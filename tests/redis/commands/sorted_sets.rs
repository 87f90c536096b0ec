use crate::test_utils::{TestEnv, TestUtils};

#[test]
fn test_handle_zadd_and_zrange_commands() {
    let mut env = TestEnv::new();

    env.exec_command_ok(
        TestUtils::zadd_command("board", &[("10", "m1"), ("20", "m2")]),
        &TestUtils::expected_integer(2),
    );
    env.exec_command_ok(
        TestUtils::zadd_command("board", &[("15", "m1")]),
        &TestUtils::expected_integer(0),
    );
    env.exec_command_ok(
        TestUtils::zrange_command("board", 0, -1, true),
        &TestUtils::expected_bulk_string_array(&["m1", "15", "m2", "20"]),
    );
    env.exec_command_ok(
        TestUtils::zrange_command("board", 0, -1, false),
        &TestUtils::expected_bulk_string_array(&["m1", "m2"]),
    );
}

#[test]
fn test_zrange_orders_ties_by_member() {
    let mut env = TestEnv::new();

    env.exec_command_ok(
        TestUtils::zadd_command("board", &[("1.5", "b"), ("1.5", "a"), ("-inf", "low"), ("0.1", "c")]),
        &TestUtils::expected_integer(4),
    );
    env.exec_command_ok(
        TestUtils::zrange_command("board", 0, -1, true),
        &TestUtils::expected_bulk_string_array(&["low", "-inf", "c", "0.1", "a", "1.5", "b", "1.5"]),
    );
    env.exec_command_ok(
        TestUtils::zrange_command("board", -2, -1, false),
        &TestUtils::expected_bulk_string_array(&["a", "b"]),
    );
    env.exec_command_ok(
        TestUtils::command(&["zrange", "board", "0", "0", "withscores"]),
        &TestUtils::expected_bulk_string_array(&["low", "-inf"]),
    );
}

#[test]
fn test_handle_zscore_zcard_and_zrem_commands() {
    let mut env = TestEnv::new();

    env.exec_command_ok(
        TestUtils::zadd_command("board", &[("3", "m1"), ("2.25", "m2")]),
        &TestUtils::expected_integer(2),
    );
    env.exec_command_ok(
        TestUtils::zscore_command("board", "m2"),
        &TestUtils::expected_bulk_string("2.25"),
    );
    env.exec_command_ok(
        TestUtils::zscore_command("board", "nobody"),
        &TestUtils::expected_null(),
    );
    env.exec_command_ok(TestUtils::zcard_command("board"), &TestUtils::expected_integer(2));
    env.exec_command_ok(
        TestUtils::zrem_command("board", &["m1", "m9"]),
        &TestUtils::expected_integer(1),
    );
    env.exec_command_ok(
        TestUtils::zrem_command("board", &["m2"]),
        &TestUtils::expected_integer(1),
    );

    env.exec_command_ok(TestUtils::type_command("board"), &TestUtils::expected_simple_string("none"));
    env.exec_command_ok(TestUtils::zcard_command("board"), &TestUtils::expected_integer(0));
    env.exec_command_ok(
        TestUtils::zrange_command("board", 0, -1, true),
        &TestUtils::expected_bulk_string_array(&[]),
    );
}
