pub mod accuracy;
pub mod audit;
pub mod config;
pub mod non_prime;
pub mod predicate;
pub mod prime_set;
pub mod sieve;

pub use audit::AuditReport;
pub use config::AuditConfig;
pub use predicate::{GmpPredicate, PrimalityPredicate};
pub use prime_set::PrimeSet;
