mod middleware_tests;
mod query_pruner_tests;
mod utils;
