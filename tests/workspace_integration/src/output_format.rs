//! Output format tests.
//!
//! Every tool call, successful or not, must come back as a single text
//! content block holding a `{success, output, error}` JSON object.

use rmcp::model::{CallToolResult, RawContent};
use serde_json::Value;

/// Validates that a CallToolResult carries exactly one well-formed response.
fn validate_tool_result(result: &CallToolResult) -> Result<Value, String> {
    if result.content.len() != 1 {
        return Err(format!("Expected one content item, got {}", result.content.len()));
    }

    let text = match &result.content[0].raw {
        RawContent::Text(text_content) => &text_content.text,
        other => return Err(format!("Expected text content, got {:?}", other)),
    };

    let body: Value =
        serde_json::from_str(text).map_err(|e| format!("Content is not JSON: {}", e))?;
    let obj = body.as_object().ok_or("Response must be an object")?;

    let success = obj
        .get("success")
        .and_then(Value::as_bool)
        .ok_or("Response must have boolean 'success'")?;
    let output = obj.get("output").ok_or("Response must have 'output'")?;
    let error = obj.get("error").ok_or("Response must have 'error'")?;

    match (success, output.is_string(), error.is_string()) {
        (true, true, false) if error.is_null() => {}
        (false, false, true) if output.is_null() => {}
        _ => return Err(format!("Inconsistent response: {}", body)),
    }

    if result.is_error.unwrap_or(false) == success {
        return Err("is_error flag must be set exactly for failures".to_string());
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ffmpeg_mcp::ToolResponse;
    use ffmpeg_mcp::server::to_call_tool_result;
    use proptest::prelude::*;

    #[test]
    fn test_success_format() {
        let result = to_call_tool_result(&ToolResponse::success("Video trimmed to /w/out.mp4")).unwrap();
        let body = validate_tool_result(&result).unwrap();
        assert_eq!(body["output"], "Video trimmed to /w/out.mp4");
    }

    #[test]
    fn test_failure_format() {
        let result = to_call_tool_result(&ToolResponse::failure("bad codec")).unwrap();
        let body = validate_tool_result(&result).unwrap();
        assert_eq!(body["error"], "bad codec");
    }

    #[tokio::test]
    async fn test_rejected_call_format() {
        let tmp = tempfile::tempdir().unwrap();
        let server = crate::server_startup::test_server(&tmp).await;
        let result = server
            .trim_video(ffmpeg_mcp::TrimVideoParams {
                input_path: "missing.mp4".to_string(),
                start_time: 0.0,
                duration: 2.0,
                output_path: "out.mp4".to_string(),
            })
            .await
            .unwrap();

        let body = validate_tool_result(&result).unwrap();
        assert_eq!(body["success"], false);
    }

    proptest! {
        #[test]
        fn any_message_round_trips(message in "[ -~]{1,200}", success in proptest::bool::ANY) {
            let response = if success {
                ToolResponse::success(message.clone())
            } else {
                ToolResponse::failure(message.clone())
            };
            let result = to_call_tool_result(&response).unwrap();
            let body = validate_tool_result(&result).map_err(TestCaseError::fail)?;
            let parsed: ToolResponse = serde_json::from_value(body).unwrap();
            prop_assert_eq!(parsed, response);
        }
    }
}
