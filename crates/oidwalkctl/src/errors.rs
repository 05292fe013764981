//! Exit codes for oidwalkctl

use oidwalk_common::error::ConfigError;

/// Exit code for success (also `--help` and `--version`)
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for general runtime errors
pub const EXIT_GENERAL_ERROR: i32 = 1;

/// Exit code for bad arguments or configuration
pub const EXIT_USAGE: i32 = 64;

/// Map a runtime error to its exit status.
pub fn exit_code_for(error: &anyhow::Error) -> i32 {
    if error.downcast_ref::<ConfigError>().is_some() {
        EXIT_USAGE
    } else {
        EXIT_GENERAL_ERROR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_usage_errors() {
        let err = anyhow::Error::new(ConfigError::InvalidVersion("4".to_string()));
        assert_eq!(exit_code_for(&err), EXIT_USAGE);

        let err = anyhow::anyhow!("stdout closed");
        assert_eq!(exit_code_for(&err), EXIT_GENERAL_ERROR);
    }
}
