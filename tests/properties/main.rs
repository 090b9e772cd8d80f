mod filter_tests;
mod parser_tests;
mod store_tests;
