
/// Relation loading and cascade behaviour against a live database
pub mod relation_tests;
