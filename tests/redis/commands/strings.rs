use crate::test_utils::{TestEnv, TestUtils};

#[test]
fn test_handle_ping_command() {
    let mut env = TestEnv::new();

    env.exec_command_ok(
        TestUtils::ping_command(),
        &TestUtils::expected_simple_string("PONG"),
    );
    env.exec_command_ok(
        TestUtils::command(&["ping", "hello"]),
        &TestUtils::expected_bulk_string("hello"),
    );
}

#[test]
fn test_handle_echo_command() {
    let mut env = TestEnv::new();

    env.exec_command_ok(
        TestUtils::echo_command("hello world"),
        &TestUtils::expected_bulk_string("hello world"),
    );
}

#[test]
fn test_handle_set_and_get_commands() {
    let mut env = TestEnv::new();

    env.exec_command_ok(
        TestUtils::get_command("grape"),
        &TestUtils::expected_null(),
    );
    env.exec_command_ok(
        TestUtils::set_command("grape", "mango"),
        &TestUtils::expected_simple_string("OK"),
    );
    env.exec_command_ok(
        TestUtils::get_command("grape"),
        &TestUtils::expected_bulk_string("mango"),
    );
    env.exec_command_ok(
        TestUtils::set_command("grape", "apple"),
        &TestUtils::expected_simple_string("OK"),
    );
    env.exec_command_ok(
        TestUtils::get_command("grape"),
        &TestUtils::expected_bulk_string("apple"),
    );
}

#[test]
fn test_set_replaces_any_type() {
    let mut env = TestEnv::new();

    env.exec_command_ok(
        TestUtils::rpush_command("fruits", &["apple"]),
        &TestUtils::expected_integer(1),
    );
    env.exec_command_ok(
        TestUtils::set_command("fruits", "none left"),
        &TestUtils::expected_simple_string("OK"),
    );
    env.exec_command_ok(
        TestUtils::type_command("fruits"),
        &TestUtils::expected_simple_string("string"),
    );
}

#[test]
fn test_get_on_absent_key_is_null_repeatedly() {
    let mut env = TestEnv::new();

    for _ in 0..3 {
        env.exec_command_ok(TestUtils::get_command("missing"), &TestUtils::expected_null());
    }
    assert!(env.store.is_empty());
}

#[test]
fn test_values_are_binary_safe() {
    let mut env = TestEnv::new();

    env.exec_command_ok(
        TestUtils::set_command("bin", "a\r\nb\0c"),
        &TestUtils::expected_simple_string("OK"),
    );
    env.exec_command_ok(
        TestUtils::get_command("bin"),
        &TestUtils::expected_bulk_string("a\r\nb\0c"),
    );
}

#[tokio::test(start_paused = true)]
async fn test_set_with_expiration() {
    let mut env = TestEnv::new();

    env.exec_command_ok(
        TestUtils::set_command_with_expiration("grape", "mango", 100),
        &TestUtils::expected_simple_string("OK"),
    );

    tokio::time::advance(std::time::Duration::from_millis(99)).await;
    env.exec_command_ok(
        TestUtils::get_command("grape"),
        &TestUtils::expected_bulk_string("mango"),
    );

    tokio::time::advance(std::time::Duration::from_millis(1)).await;
    env.exec_command_ok(TestUtils::get_command("grape"), &TestUtils::expected_null());
}
