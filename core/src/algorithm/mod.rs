//! Assignment Algorithm Framework
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod traits;
pub mod assignment;

pub use self::traits::*;
pub use self::assignment::*;
