//! Input parameter validation tests.
//!
//! Requests that escape the working directory, reference a missing input or
//! carry out-of-range times must fail with a structured error, and the
//! failure must not depend on ffmpeg being installed.

#[cfg(test)]
mod tests {
    use crate::server_startup::test_server;
    use ffmpeg_mcp::{ConvertVideoFormatParams, ToolResponse, TrimVideoParams, is_safe};
    use proptest::prelude::*;
    use std::path::Path;

    const PATH_ESCAPE: &str = "Path outside working directory not allowed";

    fn trim(input: &str, start: f64, duration: f64, output: &str) -> TrimVideoParams {
        TrimVideoParams {
            input_path: input.to_string(),
            start_time: start,
            duration,
            output_path: output.to_string(),
        }
    }

    #[tokio::test]
    async fn test_trim_rejects_traversal() {
        let tmp = tempfile::tempdir().unwrap();
        let server = test_server(&tmp).await;

        let response = server
            .handler()
            .trim_video(trim("../../etc/passwd", 0.0, 1.0, "out.mp4"))
            .await;
        assert_eq!(response, ToolResponse::failure(PATH_ESCAPE));
    }

    #[tokio::test]
    async fn test_trim_rejects_sibling_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let server = test_server(&tmp).await;
        let root = server.handler().working_dir().to_path_buf();

        // Same string prefix as the working directory, different directory.
        let sibling = format!("{}2/clip.mp4", root.display());
        std::fs::create_dir_all(Path::new(&sibling).parent().unwrap()).unwrap();
        std::fs::write(&sibling, b"x").unwrap();

        let response = server.handler().trim_video(trim(&sibling, 0.0, 1.0, "out.mp4")).await;
        assert_eq!(response, ToolResponse::failure(PATH_ESCAPE));
    }

    #[tokio::test]
    async fn test_trim_missing_input() {
        let tmp = tempfile::tempdir().unwrap();
        let server = test_server(&tmp).await;

        let response = server.handler().trim_video(trim("absent.mp4", 0.0, 1.0, "out.mp4")).await;
        assert_eq!(
            response,
            ToolResponse::failure("Input file absent.mp4 does not exist")
        );
    }

    #[tokio::test]
    async fn test_trim_invalid_time_parameters() {
        let tmp = tempfile::tempdir().unwrap();
        let server = test_server(&tmp).await;

        let negative_start = server.handler().trim_video(trim("absent.mp4", -1.0, 1.0, "out.mp4")).await;
        let zero_duration = server.handler().trim_video(trim("absent.mp4", 0.0, 0.0, "out.mp4")).await;

        assert_eq!(negative_start, ToolResponse::failure("Invalid time parameters"));
        assert_eq!(zero_duration, ToolResponse::failure("Invalid time parameters"));
    }

    #[tokio::test]
    async fn test_convert_rejects_escaping_output() {
        let tmp = tempfile::tempdir().unwrap();
        let server = test_server(&tmp).await;

        let response = server
            .handler()
            .convert_video_format(ConvertVideoFormatParams {
                input_path: "in.mp4".to_string(),
                output_format: "webm".to_string(),
                output_path: "/tmp/elsewhere".to_string(),
            })
            .await;
        assert_eq!(response, ToolResponse::failure(PATH_ESCAPE));
    }

    #[tokio::test]
    async fn test_convert_missing_input() {
        let tmp = tempfile::tempdir().unwrap();
        let server = test_server(&tmp).await;

        let response = server
            .handler()
            .convert_video_format(ConvertVideoFormatParams {
                input_path: "absent.mov".to_string(),
                output_format: "MP4".to_string(),
                output_path: "out".to_string(),
            })
            .await;
        assert_eq!(
            response,
            ToolResponse::failure("Input file absent.mov does not exist")
        );
    }

    proptest! {
        #[test]
        fn negative_start_or_non_positive_duration_is_invalid(
            start in -1.0e6f64..0.0,
            duration in -1.0e6f64..=0.0,
            pick in 0u8..3,
        ) {
            let (s, d) = match pick {
                0 => (start, 1.0),
                1 => (0.0, duration),
                _ => (start, duration),
            };
            let params = trim("in.mp4", s, d, "out.mp4");
            prop_assert!(params.validate_times().is_err());
        }

        #[test]
        fn containment_matches_component_prefix(
            root in "/[a-z]{1,8}",
            child in "[a-z0-9_]{1,8}",
            suffix in "[a-z0-9]{1,4}",
        ) {
            let root_path = Path::new(&root);
            let inside = format!("{}/{}", root, child);
            let sibling = format!("{}{}/{}", root, suffix, child);
            prop_assert!(is_safe(root_path, Path::new(&inside)));
            prop_assert!(!is_safe(root_path, Path::new(&sibling)));
            prop_assert!(!is_safe(root_path, root_path));
        }
    }
}
