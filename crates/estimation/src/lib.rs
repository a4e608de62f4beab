//! Specification Estimation
//!
//! Rule tables, distribution estimation, the post-estimation sum check and
//! largest-remainder question allocation.

#![warn(missing_docs)]

pub mod tables;
pub mod estimator;
pub mod sum_check;
pub mod allocator;
pub mod planner;

pub use tables::{ComplexityRange, RuleTables};
pub use estimator::{AppliedRule, Estimation, Estimator, CREATE_FLOOR, RIGOR_FLOOR};
pub use sum_check::{SumCheck, DEFAULT_SUM_TOLERANCE};
pub use allocator::allocate;
pub use planner::{estimate_item_count, ContentSpecification, Planner, SpecificationRequest};
