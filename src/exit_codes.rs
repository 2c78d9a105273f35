//! Exit code constants for the morio CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid variable name)
//! - 2: Variable storage failure
//! - 3: Template render or parse failure
//! - 4: Module state could not be read or changed
//! - 5: Service manager or agent binary failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or invalid input.
pub const USER_ERROR: i32 = 1;

/// A variable could not be read, written or removed.
pub const STORAGE_FAILURE: i32 = 2;

/// A template failed to render, or its docs failed to parse.
pub const TEMPLATE_FAILURE: i32 = 3;

/// A module area could not be enumerated or a module could not be renamed.
pub const MODULE_STATE_FAILURE: i32 = 4;

/// The service manager or a collector binary reported a failure.
pub const AGENT_FAILURE: i32 = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            SUCCESS,
            USER_ERROR,
            STORAGE_FAILURE,
            TEMPLATE_FAILURE,
            MODULE_STATE_FAILURE,
            AGENT_FAILURE,
        ];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn success_is_zero() {
        assert_eq!(SUCCESS, 0);
    }
}
