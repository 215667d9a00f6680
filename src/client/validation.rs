//! Preconditions checked before a request may touch the network.

use crate::error::ValidationError;
use crate::models::GenerationRequest;

pub const MIN_PROMPT_CHARS: usize = 3;
pub const MIN_DIMENSION: u32 = 256;
pub const MAX_DIMENSION: u32 = 2048;

/// Checks prompt then dimensions, stopping at the first failing rule.
///
/// A zero dimension is treated like a missing one.
pub fn validate_request(
    prompt: &str,
    width: Option<i64>,
    height: Option<i64>,
) -> Result<GenerationRequest, ValidationError> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return Err(ValidationError::EmptyPrompt);
    }
    let chars = prompt.chars().count();
    if chars < MIN_PROMPT_CHARS {
        return Err(ValidationError::PromptTooShort(chars));
    }

    let (width, height) = match (width, height) {
        (Some(w), Some(h)) if w != 0 && h != 0 => (w, h),
        _ => return Err(ValidationError::MissingDimensions),
    };

    match (checked_dimension(width), checked_dimension(height)) {
        (Some(w), Some(h)) => Ok(GenerationRequest {
            prompt: prompt.to_string(),
            width: w,
            height: h,
        }),
        _ => Err(ValidationError::DimensionOutOfRange { width, height }),
    }
}

fn checked_dimension(value: i64) -> Option<u32> {
    u32::try_from(value)
        .ok()
        .filter(|v| (MIN_DIMENSION..=MAX_DIMENSION).contains(v))
}

/// Parses a free-text dimension field; anything but an integer is absent.
pub fn parse_dimension(input: &str) -> Option<i64> {
    input.trim().parse().ok()
}

/// Filenames are opaque but must fit in a single URL path segment.
pub fn validate_filename(filename: &str) -> Result<&str, ValidationError> {
    let invalid = filename.is_empty()
        || filename == "."
        || filename == ".."
        || filename
            .chars()
            .any(|c| matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_whitespace() || c.is_control());

    if invalid {
        Err(ValidationError::InvalidFilename(filename.to_string()))
    } else {
        Ok(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_valid_request_and_trims_prompt() {
        let request = validate_request("  a tiny cabin in the woods \n", Some(512), Some(768)).unwrap();
        assert_eq!(request.prompt, "a tiny cabin in the woods");
        assert_eq!((request.width, request.height), (512, 768));
    }

    #[test]
    fn test_prompt_rules() {
        assert_eq!(validate_request("   ", Some(512), Some(512)), Err(ValidationError::EmptyPrompt));
        assert_eq!(validate_request(" ab ", Some(512), Some(512)), Err(ValidationError::PromptTooShort(2)));
        assert!(validate_request("abc", Some(512), Some(512)).is_ok());
        // characters, not bytes
        assert_eq!(validate_request("дом", Some(512), Some(512)).unwrap().prompt, "дом");
    }

    #[test]
    fn test_prompt_checked_before_dimensions() {
        assert_eq!(validate_request("", None, Some(10)), Err(ValidationError::EmptyPrompt));
    }

    #[test]
    fn test_missing_dimensions() {
        assert_eq!(validate_request("cabin", None, Some(512)), Err(ValidationError::MissingDimensions));
        assert_eq!(validate_request("cabin", Some(512), None), Err(ValidationError::MissingDimensions));
        assert_eq!(validate_request("cabin", Some(0), Some(512)), Err(ValidationError::MissingDimensions));
    }

    #[test]
    fn test_dimension_bounds_are_inclusive() {
        assert!(validate_request("cabin", Some(256), Some(2048)).is_ok());
        for (w, h) in [(255, 512), (512, 2049), (-512, 512), (4096, 4096), (i64::MAX, 512)] {
            assert_eq!(
                validate_request("cabin", Some(w), Some(h)),
                Err(ValidationError::DimensionOutOfRange { width: w, height: h }),
                "{}x{} should be rejected",
                w,
                h
            );
        }
    }

    #[test]
    fn test_parse_dimension() {
        assert_eq!(parse_dimension(" 1024 "), Some(1024));
        assert_eq!(parse_dimension("-3"), Some(-3));
        assert_eq!(parse_dimension("512.5"), None);
        assert_eq!(parse_dimension(""), None);
    }

    #[test]
    fn test_validate_filename() {
        assert!(validate_filename("image_1a2b3c4d_1700000000.png").is_ok());
        for bad in ["", ".", "..", "../secret", "a/b.png", "a b.png", "a?.png", "a%2F.png"] {
            assert!(validate_filename(bad).is_err(), "{:?} should be rejected", bad);
        }
    }
}
