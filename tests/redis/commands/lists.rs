use crate::test_utils::{TestEnv, TestUtils};

#[test]
fn test_handle_lpush_command() {
    let mut env = TestEnv::new();

    env.exec_command_ok(
        TestUtils::lpush_command("grape", &["a", "b", "c"]),
        &TestUtils::expected_integer(3),
    );
    env.exec_command_ok(
        TestUtils::lrange_command("grape", 0, -1),
        &TestUtils::expected_bulk_string_array(&["c", "b", "a"]),
    );
    env.exec_command_ok(
        TestUtils::llen_command("grape"),
        &TestUtils::expected_integer(3),
    );
}

#[test]
fn test_handle_rpush_and_pop_commands() {
    let mut env = TestEnv::new();

    env.exec_command_ok(
        TestUtils::rpush_command("grape", &["a", "b", "c"]),
        &TestUtils::expected_integer(3),
    );
    env.exec_command_ok(
        TestUtils::lpop_command("grape"),
        &TestUtils::expected_bulk_string("a"),
    );
    env.exec_command_ok(
        TestUtils::lrange_command("grape", 0, -1),
        &TestUtils::expected_bulk_string_array(&["b", "c"]),
    );
    env.exec_command_ok(
        TestUtils::rpop_command("grape"),
        &TestUtils::expected_bulk_string("c"),
    );
    env.exec_command_ok(
        TestUtils::lrange_command("grape", 0, -1),
        &TestUtils::expected_bulk_string_array(&["b"]),
    );
}

#[test]
fn test_handle_lrange_command() {
    let mut env = TestEnv::new();

    env.exec_command_ok(
        TestUtils::rpush_command("fruits", &["grape", "apple", "pineapple", "mango", "raspberry"]),
        &TestUtils::expected_integer(5),
    );

    let test_cases = vec![
        (0, 2, vec!["grape", "apple", "pineapple"]),
        (2, 9, vec!["pineapple", "mango", "raspberry"]),
        (-2, -1, vec!["mango", "raspberry"]),
        (-9, 0, vec!["grape"]),
        (3, 1, vec![]),
        (5, 6, vec![]),
    ];

    for (start, stop, expected) in test_cases {
        env.exec_command_ok(
            TestUtils::lrange_command("fruits", start, stop),
            &TestUtils::expected_bulk_string_array(&expected),
        );
    }

    env.exec_command_ok(
        TestUtils::lrange_command("missing", 0, -1),
        &TestUtils::expected_bulk_string_array(&[]),
    );
}

#[test]
fn test_pop_with_count() {
    let mut env = TestEnv::new();

    env.exec_command_ok(
        TestUtils::rpush_command("grape", &["a", "b", "c"]),
        &TestUtils::expected_integer(3),
    );
    env.exec_command_ok(
        TestUtils::lpop_command_multiple_items("grape", 2),
        &TestUtils::expected_bulk_string_array(&["a", "b"]),
    );
    env.exec_command_ok(
        TestUtils::lpop_command_multiple_items("grape", 5),
        &TestUtils::expected_bulk_string_array(&["c"]),
    );
    env.exec_command_ok(
        TestUtils::lpop_command_multiple_items("grape", 1),
        &TestUtils::expected_null_array(),
    );
}

#[test]
fn test_emptied_list_is_deleted() {
    let mut env = TestEnv::new();

    env.exec_command_ok(
        TestUtils::rpush_command("grape", &["a"]),
        &TestUtils::expected_integer(1),
    );
    env.exec_command_ok(
        TestUtils::rpop_command("grape"),
        &TestUtils::expected_bulk_string("a"),
    );

    env.exec_command_ok(TestUtils::type_command("grape"), &TestUtils::expected_simple_string("none"));
    env.exec_command_ok(TestUtils::llen_command("grape"), &TestUtils::expected_integer(0));
    env.exec_command_ok(TestUtils::lpop_command("grape"), &TestUtils::expected_null());
    env.exec_command_ok(TestUtils::get_command("grape"), &TestUtils::expected_null());
    assert!(env.store.is_empty());
}
