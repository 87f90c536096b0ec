use crate::test_utils::{ServerEnv, TestClient, TestUtils};

const CLIENTS: usize = 16;
const OPERATIONS: usize = 50;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_clients_on_disjoint_keys() {
    let server = ServerEnv::start(4).await;

    let mut tasks = Vec::new();
    for client_id in 0..CLIENTS {
        let mut client = TestClient::new(server.connect().await);

        tasks.push(tokio::spawn(async move {
            let key = format!("client-{}", client_id);
            let mut expected = Vec::new();

            for i in 0..OPERATIONS {
                let value = format!("{}-{}", client_id, i);
                assert_eq!(
                    client.request(TestUtils::rpush_command(&key, &[value.as_str()])).await,
                    TestUtils::expected_integer(i as i64 + 1)
                );
                expected.push(value);
            }

            let expected: Vec<&str> = expected.iter().map(String::as_str).collect();
            assert_eq!(
                client.request(TestUtils::lrange_command(&key, 0, -1)).await,
                TestUtils::expected_bulk_string_array(&expected)
            );
        }));
    }

    for task in tasks {
        task.await.unwrap();
    }

    server.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_clients_on_one_key() {
    let server = ServerEnv::start(4).await;

    let mut tasks = Vec::new();
    for client_id in 0..CLIENTS {
        let mut client = TestClient::new(server.connect().await);

        tasks.push(tokio::spawn(async move {
            for i in 0..OPERATIONS {
                let field = format!("{}-{}", client_id, i);
                assert_eq!(
                    client
                        .request(TestUtils::hset_command("counters", &[(field.as_str(), "1")]))
                        .await,
                    TestUtils::expected_integer(1)
                );
            }
        }));
    }

    for task in tasks {
        task.await.unwrap();
    }

    let mut client = TestClient::new(server.connect().await);
    assert_eq!(
        client.request(TestUtils::hlen_command("counters")).await,
        TestUtils::expected_integer((CLIENTS * OPERATIONS) as i64)
    );

    server.stop().await;
}
