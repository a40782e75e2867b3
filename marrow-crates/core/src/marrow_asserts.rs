//! Leveled assertions for structural invariants.
//!
//! Simple assertions are always compiled in; the moderate and extreme levels are only enabled in
//! tests or when the `debug-checks` feature is active. Structural invariant violations (such as
//! popping an empty decision stack) are programming errors and are guarded with these macros
//! rather than recoverable error paths.

#[cfg(all(not(test), not(feature = "debug-checks")))]
pub const MARROW_ASSERT_LEVEL_DEFINITION: u8 = MARROW_ASSERT_SIMPLE;

#[cfg(any(test, feature = "debug-checks"))]
pub const MARROW_ASSERT_LEVEL_DEFINITION: u8 = MARROW_ASSERT_EXTREME;

pub const MARROW_ASSERT_SIMPLE: u8 = 1;
pub const MARROW_ASSERT_MODERATE: u8 = 2;
pub const MARROW_ASSERT_EXTREME: u8 = 3;

#[macro_export]
#[doc(hidden)]
macro_rules! marrow_assert_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::MARROW_ASSERT_LEVEL_DEFINITION >= $crate::asserts::MARROW_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! marrow_assert_eq_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::MARROW_ASSERT_LEVEL_DEFINITION >= $crate::asserts::MARROW_ASSERT_SIMPLE {
            assert_eq!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! marrow_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::asserts::MARROW_ASSERT_LEVEL_DEFINITION >= $crate::asserts::MARROW_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! marrow_assert_extreme {
    ($($arg:tt)*) => {
        if $crate::asserts::MARROW_ASSERT_LEVEL_DEFINITION >= $crate::asserts::MARROW_ASSERT_EXTREME {
            assert!($($arg)*);
        }
    };
}
