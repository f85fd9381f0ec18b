//! Correctness verification for assignment solutions
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod certificate;
pub mod exhaustive;

pub use self::certificate::OptimalityCertificate;
pub use self::exhaustive::{brute_force_minimum, MAX_EXHAUSTIVE_DIMENSION};
