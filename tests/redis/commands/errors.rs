use sharded_redis::{commands::CommandError, key_value_store::StoreError, resp::RespValue};

use crate::test_utils::{TestEnv, TestUtils};

#[test]
fn test_wrong_type_operations() {
    let mut env = TestEnv::new();

    env.exec_command_ok(
        TestUtils::set_command("text", "v"),
        &TestUtils::expected_simple_string("OK"),
    );
    env.exec_command_ok(
        TestUtils::rpush_command("list", &["a"]),
        &TestUtils::expected_integer(1),
    );

    let test_cases = vec![
        TestUtils::lpush_command("text", &["a"]),
        TestUtils::llen_command("text"),
        TestUtils::lrange_command("text", 0, -1),
        TestUtils::sadd_command("text", &["a"]),
        TestUtils::smembers_command("text"),
        TestUtils::hset_command("text", &[("f", "v")]),
        TestUtils::hget_command("text", "f"),
        TestUtils::zadd_command("text", &[("1", "m")]),
        TestUtils::zscore_command("text", "m"),
        TestUtils::get_command("list"),
    ];

    for command in test_cases {
        env.exec_command_err(command, CommandError::TypeMismatch(StoreError::TypeMismatch));
    }

    env.exec_command_ok(
        TestUtils::get_command("text"),
        &TestUtils::expected_bulk_string("v"),
    );
    env.exec_command_ok(
        TestUtils::lrange_command("list", 0, -1),
        &TestUtils::expected_bulk_string_array(&["a"]),
    );
}

#[test]
fn test_wrong_type_reply() {
    let mut env = TestEnv::new();
    env.exec_command_ok(
        TestUtils::set_command("text", "v"),
        &TestUtils::expected_simple_string("OK"),
    );

    let error = env.exec_command(TestUtils::llen_command("text")).unwrap_err();

    assert_eq!(TestUtils::wire(&error.as_resp()), TestUtils::expected_wrongtype());
}

#[test]
fn test_wrong_number_of_arguments() {
    let mut env = TestEnv::new();

    let test_cases = vec![
        (vec!["GET"], "get"),
        (vec!["GET", "a", "b"], "get"),
        (vec!["SET", "a"], "set"),
        (vec!["DEL"], "del"),
        (vec!["LPUSH", "a"], "lpush"),
        (vec!["LRANGE", "a", "0"], "lrange"),
        (vec!["HSET", "a", "f"], "hset"),
        (vec!["ZADD", "a", "1"], "zadd"),
        (vec!["ZSCORE", "a"], "zscore"),
        (vec!["ECHO"], "echo"),
    ];

    for (parts, name) in test_cases {
        env.exec_command_err(
            TestUtils::command(&parts),
            CommandError::WrongNumberOfArguments(name.to_string()),
        );
    }
}

#[test]
fn test_invalid_arguments() {
    let mut env = TestEnv::new();

    let test_cases = vec![
        (TestUtils::command(&["LRANGE", "a", "x", "1"]), CommandError::InvalidInteger),
        (TestUtils::command(&["EXPIRE", "a", "1.5"]), CommandError::InvalidInteger),
        (TestUtils::command(&["LPOP", "a", "-1"]), CommandError::InvalidInteger),
        (TestUtils::command(&["ZADD", "a", "nan", "m"]), CommandError::InvalidFloat),
        (TestUtils::command(&["ZADD", "a", "1", "m", "2"]), CommandError::SyntaxError),
        (
            TestUtils::command(&["ZRANGE", "a", "0", "1", "BYSCORE"]),
            CommandError::SyntaxError,
        ),
        (
            TestUtils::command(&["SET", "a", "v", "EX", "0"]),
            CommandError::InvalidExpireTime("set".to_string()),
        ),
    ];

    for (command, expected) in test_cases {
        env.exec_command_err(command, expected);
    }
    assert!(env.store.is_empty());
}

#[test]
fn test_invalid_requests() {
    let mut env = TestEnv::new();

    let test_cases = vec![
        (RespValue::Array(vec![]), CommandError::InvalidCommand),
        (RespValue::bulk("PING"), CommandError::InvalidCommand),
        (
            RespValue::Array(vec![RespValue::Integer(1)]),
            CommandError::InvalidCommand,
        ),
        (
            TestUtils::command(&["FLUSHALL"]),
            CommandError::UnknownCommand("FLUSHALL".to_string()),
        ),
        (
            TestUtils::command(&["blpop", "a", "0"]),
            CommandError::UnknownCommand("blpop".to_string()),
        ),
    ];

    for (command, expected) in test_cases {
        env.exec_command_err(command, expected);
    }
}

#[test]
fn test_command_names_are_case_insensitive() {
    let mut env = TestEnv::new();

    env.exec_command_ok(
        TestUtils::command(&["sEt", "k", "v"]),
        &TestUtils::expected_simple_string("OK"),
    );
    env.exec_command_ok(
        TestUtils::command(&["get", "k"]),
        &TestUtils::expected_bulk_string("v"),
    );
}
