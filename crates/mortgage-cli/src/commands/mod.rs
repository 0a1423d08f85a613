pub mod compare;
pub mod loan;
pub mod pricing;
pub mod scenario;
