/// Error code registry for statmerge
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 2000-2999: Empty input errors
/// - 3000-3999: Schema load errors
/// - 4000-4999: Per-artifact merge errors (recoverable)
/// - 5000-5999: Output write errors
/// - 6000-6999: Missing input errors
/// - 9000-9999: Other errors
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_GENERIC: u16 = 1000;
    pub const CONFIG_PRECONDITIONS_FAILED: u16 = 1001;
    pub const CONFIG_FILE_UNREADABLE: u16 = 1002;
    pub const CONFIG_PARSE_ERROR: u16 = 1003;
    pub const CONFIG_INVALID_VALUE: u16 = 1004;

    // Empty input errors (2000-2999)
    pub const EMPTY_INPUT_GENERIC: u16 = 2000;
    pub const EMPTY_INPUT_NO_MATCH: u16 = 2001;
    pub const EMPTY_INPUT_BAD_PATTERN: u16 = 2002;

    // Schema load errors (3000-3999)
    pub const SCHEMA_GENERIC: u16 = 3000;
    pub const SCHEMA_UNREADABLE: u16 = 3001;
    pub const SCHEMA_MISSING_DIRECTORY: u16 = 3002;
    pub const SCHEMA_MALFORMED_OBJECT: u16 = 3003;

    // Per-artifact merge errors (4000-4999)
    pub const ARTIFACT_GENERIC: u16 = 4000;
    pub const ARTIFACT_UNREADABLE: u16 = 4001;
    pub const ARTIFACT_MISSING_DIRECTORY: u16 = 4002;
    pub const ARTIFACT_MISSING_OBJECT: u16 = 4003;
    pub const ARTIFACT_INCOMPATIBLE: u16 = 4004;

    // Output write errors (5000-5999)
    pub const OUTPUT_GENERIC: u16 = 5000;
    pub const OUTPUT_CREATE_DIR_FAILED: u16 = 5001;
    pub const OUTPUT_WRITE_FAILED: u16 = 5002;
    pub const OUTPUT_SERIALIZATION_ERROR: u16 = 5003;

    // Missing input errors (6000-6999)
    pub const INPUT_MISSING_GENERIC: u16 = 6000;
    pub const INPUT_MISSING_FILE: u16 = 6001;

    // Other errors (9000-9999)
    pub const OTHER_GENERIC: u16 = 9000;
    pub const OTHER_INTERNAL_ERROR: u16 = 9001;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        1000 => "Generic configuration error",
        1001 => "One or more preconditions failed",
        1002 => "Configuration file could not be read",
        1003 => "Failed to parse configuration",
        1004 => "Invalid value in configuration",

        2000 => "Generic empty input error",
        2001 => "No files matched the discovery pattern",
        2002 => "Discovery pattern is invalid",

        3000 => "Generic schema load error",
        3001 => "Schema source artifact could not be read",
        3002 => "Schema source has no statistics directory",
        3003 => "Schema source contains a malformed object",

        4000 => "Generic artifact merge error",
        4001 => "Artifact could not be read",
        4002 => "Artifact has no statistics directory",
        4003 => "Artifact is missing a template object",
        4004 => "Artifact object is incompatible with the template",

        5000 => "Generic output error",
        5001 => "Failed to create output directory",
        5002 => "Failed to write output file",
        5003 => "Failed to serialize output",

        6000 => "Generic missing input error",
        6001 => "Input file does not exist",

        9000 => "Generic error",
        9001 => "Internal error",

        _ => "Unknown error code",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_has_description() {
        let codes = [
            ErrorCode::CONFIG_PRECONDITIONS_FAILED,
            ErrorCode::EMPTY_INPUT_NO_MATCH,
            ErrorCode::SCHEMA_UNREADABLE,
            ErrorCode::ARTIFACT_INCOMPATIBLE,
            ErrorCode::OUTPUT_WRITE_FAILED,
            ErrorCode::INPUT_MISSING_FILE,
            ErrorCode::OTHER_INTERNAL_ERROR,
        ];
        for code in codes {
            assert_ne!(describe_error_code(code), "Unknown error code");
        }
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(describe_error_code(4242), "Unknown error code");
    }
}
