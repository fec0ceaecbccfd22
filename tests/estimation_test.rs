use anyhow::Result;
use httpmock::prelude::*;
use review_estimator::{EstimatorEngine, OpenAiClient, ReviewPipeline};
use tempfile::TempDir;

fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [
            {
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }
        ]
    })
}

fn engine(
    server: &MockServer,
    input: &std::path::Path,
) -> EstimatorEngine<ReviewPipeline<OpenAiClient>> {
    let client = OpenAiClient::new(server.url(""), "test-key", "gpt-3.5-turbo");
    EstimatorEngine::new(ReviewPipeline::new(client, input))
}

#[tokio::test]
async fn test_two_reviews_scored_and_sorted_descending() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("reviews.csv");
    std::fs::write(&input, "email,review text\na@x.com,good\nb@x.com,bad\n")?;

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(completion_body("a@x.com 9\nb@x.com 2"));
    });

    let output_path = engine(&server, &input).run().await?;

    api_mock.assert();
    assert_eq!(output_path, temp_dir.path().join("reviews_analyzed.csv"));

    let written = std::fs::read_to_string(&output_path)?;
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 3); // header + 2 records, none added or dropped
    assert_eq!(lines[0], "email,review text,rate");
    assert_eq!(lines[1], "a@x.com,good,9");
    assert_eq!(lines[2], "b@x.com,bad,2");

    Ok(())
}

#[tokio::test]
async fn test_bulleted_response_and_resorted_order() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("reviews.csv");
    std::fs::write(
        &input,
        "email,review text\nlow@x.com,meh\nhigh@x.com,superb\nmid@x.com,fine\n",
    )?;

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200)
            .json_body(completion_body("- high@x.com 10\n- mid@x.com 5\n- low@x.com 2"));
    });

    let output_path = engine(&server, &input).run().await?;

    // Rates are non-increasing across consecutive rows.
    let written = std::fs::read_to_string(&output_path)?;
    let rates: Vec<i64> = written
        .lines()
        .skip(1)
        .map(|line| line.rsplit(',').next().unwrap().parse().unwrap())
        .collect();
    assert_eq!(rates, vec![10, 5, 2]);
    assert!(rates.windows(2).all(|w| w[0] >= w[1]));

    Ok(())
}

#[tokio::test]
async fn test_missing_input_file_fails_before_any_request() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("does_not_exist.csv");

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200).json_body(completion_body("unused 0"));
    });

    let result = engine(&server, &input).run().await;

    assert!(result.is_err());
    api_mock.assert_hits(0);

    Ok(())
}

#[tokio::test]
async fn test_empty_input_file_is_no_data_to_send() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("reviews.csv");
    std::fs::write(&input, "email,review text\n")?;

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200).json_body(completion_body("unused 0"));
    });

    let err = engine(&server, &input).run().await.unwrap_err();

    assert_eq!(err.to_string(), "No data to send");
    api_mock.assert_hits(0);

    Ok(())
}

#[tokio::test]
async fn test_unmatched_and_unscored_emails() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("reviews.csv");
    std::fs::write(&input, "email,review text\na@x.com,good\nb@x.com,bad\n")?;

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        // b@x.com never scored; stranger@x.com not in the input.
        then.status(200)
            .json_body(completion_body("a@x.com 7\nstranger@x.com 10"));
    });

    let output_path = engine(&server, &input).run().await?;

    let written = std::fs::read_to_string(&output_path)?;
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "a@x.com,good,7");
    assert_eq!(lines[2], "b@x.com,bad,0");

    Ok(())
}

#[tokio::test]
async fn test_malformed_response_halts_before_writing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("reviews.csv");
    std::fs::write(&input, "email,review text\na@x.com,good\n")?;

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200)
            .json_body(completion_body("a@x.com 9 extra-token"));
    });

    let result = engine(&server, &input).run().await;

    assert!(result.is_err());
    assert!(!temp_dir.path().join("reviews_analyzed.csv").exists());

    Ok(())
}

#[tokio::test]
async fn test_extra_columns_pass_through_untouched() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("reviews.csv");
    std::fs::write(
        &input,
        "name,email,review text\nAlice,a@x.com,good\nBob,b@x.com,bad\n",
    )?;

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200)
            .json_body(completion_body("b@x.com 8\na@x.com 3"));
    });

    let output_path = engine(&server, &input).run().await?;

    let written = std::fs::read_to_string(&output_path)?;
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], "name,email,review text,rate");
    assert_eq!(lines[1], "Bob,b@x.com,bad,8");
    assert_eq!(lines[2], "Alice,a@x.com,good,3");

    Ok(())
}

#[tokio::test]
async fn test_api_error_status_propagates() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("reviews.csv");
    std::fs::write(&input, "email,review text\na@x.com,good\n")?;

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(429).body("rate limited");
    });

    let err = engine(&server, &input).run().await.unwrap_err();

    assert!(err.to_string().contains("429"));
    assert!(!temp_dir.path().join("reviews_analyzed.csv").exists());

    Ok(())
}
